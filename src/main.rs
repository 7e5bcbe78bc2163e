mod cli;
mod evaluate;
mod model;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::evaluate::RunOutcome;

const EXIT_FAILURE: i32 = 1;
const EXIT_NO_SYSTEMS: i32 = 2;
const NO_SYSTEMS_NOTICE: &str = "no results_*.json files discovered; no report written";

fn main() {
    init_tracing();

    match run() {
        Ok(RunOutcome::ReportWritten { path, .. }) => {
            println!("report written to {}", path.display());
        }
        Ok(RunOutcome::NoSystemsDiscovered) => {
            warn!("{NO_SYSTEMS_NOTICE}");
            eprintln!("warning: {NO_SYSTEMS_NOTICE}");
            std::process::exit(EXIT_NO_SYSTEMS);
        }
        Err(err) => {
            error!("{err:#}");
            eprintln!("{}", failure_notice(&err));
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn run() -> Result<RunOutcome> {
    let cli = Cli::parse();
    evaluate::run(cli)
}

/// One line, with the full cause chain, regardless of the log filter.
fn failure_notice(err: &anyhow::Error) -> String {
    format!("error: {err:#}")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
