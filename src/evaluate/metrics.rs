use super::*;

/// Set-based precision, recall and F1. Empty denominators score 0.
pub fn compute_metrics(retrieved: &[Value], ground_truth: &[Value]) -> MetricRecord {
    let retrieved_set = to_case_insensitive_set(retrieved);
    let expected_set = to_case_insensitive_set(ground_truth);
    let matched = retrieved_set.shared_display_forms(&expected_set);
    let relevant = matched.len();
    debug!(
        ?matched,
        retrieved = retrieved_set.len(),
        expected = expected_set.len(),
        "matched fields"
    );

    let precision = ratio_or_zero(relevant, retrieved_set.len());
    let recall = ratio_or_zero(relevant, expected_set.len());
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    MetricRecord {
        precision,
        recall,
        f1,
    }
}

fn ratio_or_zero(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Running per-system totals, averaged over the rows evaluated.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricTotals {
    precision: f64,
    recall: f64,
    f1: f64,
    count: usize,
}

impl MetricTotals {
    pub fn add(&mut self, metrics: MetricRecord) {
        self.precision += metrics.precision;
        self.recall += metrics.recall;
        self.f1 += metrics.f1;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// All-zero when nothing was evaluated.
    pub fn mean(&self) -> MetricRecord {
        if self.count == 0 {
            return MetricRecord::default();
        }
        let count = self.count as f64;
        MetricRecord {
            precision: self.precision / count,
            recall: self.recall / count,
            f1: self.f1 / count,
        }
    }
}
