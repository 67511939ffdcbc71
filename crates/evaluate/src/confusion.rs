//! C×C confusion matrix over 1-based class labels.

use serde::Serialize;

use crate::error::EvaluateError;
use crate::metrics::{ClassCounts, ClassMetrics, ClassificationReport};

/// Counts of (actual, predicted) label pairs.
///
/// Labels run from 1 to `class_count`; row is the actual class and column
/// the predicted one. Pairs with a label outside that range are dropped
/// by [`update`](Self::update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    class_count: usize,
    /// Row-major `class_count × class_count`.
    counts: Vec<u64>,
}

impl ConfusionMatrix {
    /// Creates an all-zero `class_count × class_count` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::InvalidClassCount`] for `class_count == 0`
    /// and [`EvaluateError::AllocationFailed`] when `class_count²` cells
    /// overflow or cannot be allocated.
    pub fn new(class_count: usize) -> Result<Self, EvaluateError> {
        if class_count == 0 {
            return Err(EvaluateError::InvalidClassCount);
        }
        let elements = class_count
            .checked_mul(class_count)
            .ok_or(EvaluateError::AllocationFailed { elements: usize::MAX })?;
        let mut counts = Vec::new();
        counts
            .try_reserve_exact(elements)
            .map_err(|_| EvaluateError::AllocationFailed { elements })?;
        counts.resize(elements, 0);
        Ok(Self {
            class_count,
            counts,
        })
    }

    /// Number of classes C.
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// 0-based cell index, if both labels are in `1..=C`.
    fn index(&self, actual: u32, predicted: u32) -> Option<usize> {
        let c = self.class_count;
        let a = (actual as usize).checked_sub(1).filter(|&a| a < c)?;
        let p = (predicted as usize).checked_sub(1).filter(|&p| p < c)?;
        Some(a * c + p)
    }

    /// Records one prediction. Returns `false`, leaving the matrix
    /// unchanged, when either label is outside `1..=C`.
    pub fn update(&mut self, actual: u32, predicted: u32) -> bool {
        match self.index(actual, predicted) {
            Some(idx) => {
                self.counts[idx] += 1;
                true
            }
            None => false,
        }
    }

    /// Count for `(actual, predicted)`, or `None` for out-of-range labels.
    pub fn get(&self, actual: u32, predicted: u32) -> Option<u64> {
        self.index(actual, predicted).map(|idx| self.counts[idx])
    }

    /// Row of actual class `actual` (1-based).
    pub fn row(&self, actual: u32) -> Option<&[u64]> {
        let a = (actual as usize).checked_sub(1).filter(|&a| a < self.class_count)?;
        Some(&self.counts[a * self.class_count..(a + 1) * self.class_count])
    }

    /// Iterates rows in actual-class order.
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> {
        self.counts.chunks_exact(self.class_count)
    }

    /// Number of recorded predictions.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Sum of the diagonal, i.e. correct predictions.
    pub fn trace(&self) -> u64 {
        (0..self.class_count)
            .map(|i| self.counts[i * self.class_count + i])
            .sum()
    }

    /// Adds `other` cell by cell, e.g. to pool cross-validation folds.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::ClassCountMismatch`] if the sizes differ.
    pub fn merge(&mut self, other: &ConfusionMatrix) -> Result<(), EvaluateError> {
        if other.class_count != self.class_count {
            return Err(EvaluateError::ClassCountMismatch {
                left: self.class_count,
                right: other.class_count,
            });
        }
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += b;
        }
        Ok(())
    }

    /// TP/FP/FN/TN for class `class` (1-based) against all others.
    pub fn class_counts(&self, class: u32) -> Option<ClassCounts> {
        let c = self.class_count;
        let i = (class as usize).checked_sub(1).filter(|&i| i < c)?;

        let mut counts = ClassCounts::default();
        for a in 0..c {
            for p in 0..c {
                let n = self.counts[a * c + p];
                match (a == i, p == i) {
                    (true, true) => counts.true_positives += n,
                    (true, false) => counts.false_negatives += n,
                    (false, true) => counts.false_positives += n,
                    (false, false) => counts.true_negatives += n,
                }
            }
        }
        Some(counts)
    }

    /// Per-class metrics and their micro-average.
    pub fn metrics(&self) -> ClassificationReport {
        let mut per_class = Vec::with_capacity(self.class_count);
        let mut overall_counts = ClassCounts::default();
        for class in 1..=self.class_count as u32 {
            let counts = self.class_counts(class).unwrap_or_default();
            overall_counts = overall_counts.add(counts);
            per_class.push(ClassMetrics {
                class,
                counts,
                metrics: counts.metrics(),
            });
        }
        ClassificationReport {
            per_class,
            overall: overall_counts.metrics(),
            overall_counts,
        }
    }
}
