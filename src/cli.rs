use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "fieldeval",
    version,
    about = "Score retrieval systems against ground-truth field lists"
)]
pub struct Cli {
    /// JSON array of queries (strings or records with query/text/question/prompt).
    #[arg(long)]
    pub queries: PathBuf,

    /// JSON array of expected field lists, index-aligned with the queries.
    #[arg(long)]
    pub ground_truth: PathBuf,

    /// Directories searched for results_<system>.json files.
    #[arg(long, value_delimiter = ',', default_value = ".")]
    pub dirs: Vec<String>,

    /// Only evaluate these system names (exact match).
    #[arg(long, value_delimiter = ',')]
    pub systems: Vec<String>,

    #[arg(long, default_value = "results_report.csv")]
    pub out: PathBuf,

    /// Fail when queries, ground truth, and system results differ in length.
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

impl Cli {
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        split_list(&self.dirs).map(PathBuf::from).collect()
    }

    pub fn system_filter(&self) -> Vec<String> {
        split_list(&self.systems).map(ToOwned::to_owned).collect()
    }
}

fn split_list(values: &[String]) -> impl Iterator<Item = &str> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}
