use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::cli::Cli;
use crate::model::{DiscoveredSystem, MetricRecord, REPORT_COLUMNS, ReportRow};
use crate::util::{ensure_parent_directory, json_kind, read_json_array, read_json_value};

mod discovery;
mod driver;
mod matcher;
mod metrics;
mod normalize;
mod report;
#[cfg(test)]
mod tests;

use self::discovery::*;
use self::driver::*;
use self::matcher::*;
use self::metrics::*;
use self::normalize::*;
use self::report::*;

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    ReportWritten {
        path: PathBuf,
        row_count: usize,
        system_count: usize,
    },
    NoSystemsDiscovered,
}

pub fn run(args: Cli) -> Result<RunOutcome> {
    let inputs = load_inputs(&args.queries, &args.ground_truth)?;
    info!(
        queries = inputs.queries.len(),
        ground_truth = inputs.ground_truth.len(),
        "loaded evaluation inputs"
    );

    if args.strict {
        ensure_aligned_inputs(&inputs)?;
    }

    let search_dirs = args.search_dirs();
    let filter = args.system_filter();
    let systems = discover_systems(&search_dirs, &filter)?;
    if systems.is_empty() {
        return Ok(RunOutcome::NoSystemsDiscovered);
    }

    let rows = build_rows(&inputs, &systems, args.strict)?;
    write_report(&args.out, &rows)?;
    info!(
        path = %args.out.display(),
        rows = rows.len(),
        systems = systems.len(),
        "wrote report"
    );

    Ok(RunOutcome::ReportWritten {
        path: args.out,
        row_count: rows.len(),
        system_count: systems.len(),
    })
}
