//! Per-class and micro-averaged classification metrics.

use serde::Serialize;

/// Outcome counts for one class treated as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    /// Actual and predicted positive.
    pub true_positives: u64,
    /// Predicted positive, actually another class.
    pub false_positives: u64,
    /// Actually positive, predicted another class.
    pub false_negatives: u64,
    /// Neither actual nor predicted positive.
    pub true_negatives: u64,
}

impl ClassCounts {
    /// Element-wise sum.
    pub fn add(self, other: Self) -> Self {
        Self {
            true_positives: self.true_positives + other.true_positives,
            false_positives: self.false_positives + other.false_positives,
            false_negatives: self.false_negatives + other.false_negatives,
            true_negatives: self.true_negatives + other.true_negatives,
        }
    }

    /// Derives the ratio metrics from these counts.
    pub fn metrics(&self) -> Metrics {
        let tp = self.true_positives as f64;
        let fp = self.false_positives as f64;
        let fn_ = self.false_negatives as f64;
        let tn = self.true_negatives as f64;

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        Metrics {
            precision,
            recall,
            specificity: ratio(tn, tn + fp),
            f1: ratio(2.0 * precision * recall, precision + recall),
            false_positive_rate: ratio(fp, fp + tn),
            accuracy: ratio(tp + tn, tp + fp + fn_ + tn),
        }
    }
}

/// `num / den`, or 0 when `den` is 0.
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 { 0.0 } else { num / den }
}

/// Ratio metrics. Every value falls back to 0 when its denominator is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    /// TP / (TP + FP).
    pub precision: f64,
    /// TP / (TP + FN).
    pub recall: f64,
    /// TN / (TN + FP).
    pub specificity: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// FP / (FP + TN).
    pub false_positive_rate: f64,
    /// (TP + TN) / total.
    pub accuracy: f64,
}

/// Counts and metrics for one class label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    /// Class label, 1-based.
    pub class: u32,
    /// Raw counts.
    pub counts: ClassCounts,
    /// Derived metrics.
    pub metrics: Metrics,
}

/// Per-class metrics plus the micro-averaged aggregate.
///
/// `overall` applies the per-class formulas to ΣTP, ΣFP, ΣFN and ΣTN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    /// One entry per class, in label order.
    pub per_class: Vec<ClassMetrics>,
    /// Summed counts over all classes.
    pub overall_counts: ClassCounts,
    /// Metrics of `overall_counts`.
    pub overall: Metrics,
}
