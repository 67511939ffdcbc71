//! Validated collection of samples sharing one feature count.

use std::collections::BTreeSet;

use crate::error::DataError;
use crate::sample::Sample;

/// Ordered sequence of samples with a common feature count.
///
/// Invariants enforced by [`Dataset::new`]:
/// - at least one sample,
/// - every feature vector is non-empty, finite and of the same length,
/// - every class label is >= 1.
#[derive(Debug, Clone)]
pub struct Dataset {
    samples: Vec<Sample>,
    feature_count: usize,
    classes: BTreeSet<u32>,
}

impl Dataset {
    /// Builds a dataset, validating all samples.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] for an empty sample list, an empty or
    /// inconsistent feature vector, a zero class label, or a non-finite
    /// feature value.
    pub fn new(samples: Vec<Sample>) -> Result<Self, DataError> {
        let first = samples.first().ok_or(DataError::Empty)?;
        let feature_count = first.feature_count();

        let mut classes = BTreeSet::new();
        for s in &samples {
            if s.feature_count() == 0 {
                return Err(DataError::EmptyFeatures {
                    sample_id: s.sample_id(),
                });
            }
            if s.feature_count() != feature_count {
                return Err(DataError::InconsistentFeatureCount {
                    sample_id: s.sample_id(),
                    expected: feature_count,
                    got: s.feature_count(),
                });
            }
            if s.class() == 0 {
                return Err(DataError::InvalidClass {
                    sample_id: s.sample_id(),
                    class: s.class(),
                });
            }
            if let Some(index) = s.features().iter().position(|v| !v.is_finite()) {
                return Err(DataError::NonFiniteFeature {
                    sample_id: s.sample_id(),
                    index,
                });
            }
            classes.insert(s.class());
        }

        Ok(Self {
            samples,
            feature_count,
            classes,
        })
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false` for a constructed dataset; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the shared feature count F.
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Returns the observed class labels in ascending order.
    pub fn classes(&self) -> &BTreeSet<u32> {
        &self.classes
    }

    /// Returns the largest observed class label.
    ///
    /// Used as the confusion-matrix size C when none is configured, so that
    /// labels `1..=C` all have a row even if some are absent.
    pub fn class_count(&self) -> usize {
        self.classes.last().copied().unwrap_or(0) as usize
    }

    /// Returns the samples.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns the samples for in-place preprocessing.
    ///
    /// Only feature values can be changed through this slice; the
    /// feature count cannot, so the dataset invariants hold afterwards.
    pub fn samples_mut(&mut self) -> &mut [Sample] {
        &mut self.samples
    }

    /// Consumes the dataset and returns its samples.
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}
