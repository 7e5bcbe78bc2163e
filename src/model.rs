use std::path::PathBuf;

pub const REPORT_COLUMNS: [&str; 8] = [
    "query_id",
    "query",
    "system_name",
    "retrieved_fields",
    "ground_truth",
    "precision",
    "recall",
    "f1_score",
];

pub const AVERAGE_MARKER: &str = "AVERAGE";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricRecord {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl MetricRecord {
    /// Four-decimal copy for the report; non-finite values become 0.
    pub fn rounded(self) -> Self {
        Self {
            precision: round_metric(self.precision),
            recall: round_metric(self.recall),
            f1: round_metric(self.f1),
        }
    }
}

pub fn round_metric(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10_000.0).round() / 10_000.0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredSystem {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportRow {
    Detail {
        query_id: usize,
        query: String,
        system_name: String,
        retrieved_fields: String,
        ground_truth: String,
        metrics: MetricRecord,
    },
    Average {
        system_name: String,
        metrics: MetricRecord,
    },
}

impl ReportRow {
    /// Cells in `REPORT_COLUMNS` order.
    pub fn to_record(&self) -> [String; 8] {
        match self {
            Self::Detail {
                query_id,
                query,
                system_name,
                retrieved_fields,
                ground_truth,
                metrics,
            } => [
                query_id.to_string(),
                query.clone(),
                system_name.clone(),
                retrieved_fields.clone(),
                ground_truth.clone(),
                metrics.precision.to_string(),
                metrics.recall.to_string(),
                metrics.f1.to_string(),
            ],
            Self::Average {
                system_name,
                metrics,
            } => [
                String::new(),
                AVERAGE_MARKER.to_string(),
                system_name.clone(),
                String::new(),
                String::new(),
                metrics.precision.to_string(),
                metrics.recall.to_string(),
                metrics.f1.to_string(),
            ],
        }
    }
}
