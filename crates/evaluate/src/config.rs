//! Evaluation configuration.

use crate::error::EvaluateError;

/// Configuration for single-pass and cross-validation runs.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluateConfig {
    training_fraction: f64,
    class_count: Option<usize>,
    folds: usize,
    shuffle_folds: bool,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            training_fraction: 0.8,
            class_count: None,
            folds: 5,
            shuffle_folds: true,
        }
    }
}

impl EvaluateConfig {
    /// Set the fraction of samples used for training in a single pass.
    pub fn with_training_fraction(mut self, fraction: f64) -> Self {
        self.training_fraction = fraction;
        self
    }

    /// Fix the confusion-matrix size instead of deriving it from the data.
    pub fn with_class_count(mut self, class_count: Option<usize>) -> Self {
        self.class_count = class_count;
        self
    }

    /// Set the number of cross-validation folds.
    pub fn with_folds(mut self, folds: usize) -> Self {
        self.folds = folds;
        self
    }

    /// Shuffle samples before building folds.
    pub fn with_shuffle_folds(mut self, shuffle: bool) -> Self {
        self.shuffle_folds = shuffle;
        self
    }

    /// Returns the training fraction.
    pub fn training_fraction(&self) -> f64 {
        self.training_fraction
    }

    /// Returns the configured class count, if any.
    pub fn class_count(&self) -> Option<usize> {
        self.class_count
    }

    /// Returns the fold count.
    pub fn folds(&self) -> usize {
        self.folds
    }

    /// Returns whether folds are shuffled.
    pub fn shuffle_folds(&self) -> bool {
        self.shuffle_folds
    }

    /// Configured class count, or `observed_max` when none is set.
    pub fn resolve_class_count(&self, observed_max: usize) -> usize {
        self.class_count.unwrap_or(observed_max)
    }

    /// Checks the settings a single-pass run uses.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::InvalidConfig`] for a fraction outside
    /// `[0, 1]` or a zero class count.
    pub fn validate(&self) -> Result<(), EvaluateError> {
        if !(0.0..=1.0).contains(&self.training_fraction) {
            return Err(EvaluateError::InvalidConfig {
                reason: format!(
                    "training fraction must be in [0, 1], got {}",
                    self.training_fraction
                ),
            });
        }
        if self.class_count == Some(0) {
            return Err(EvaluateError::InvalidConfig {
                reason: "class count must be >= 1".to_string(),
            });
        }
        Ok(())
    }

    /// [`validate`](Self::validate) plus the fold count of a cross-validation run.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::InvalidConfig`] for fewer than 2 folds or
    /// any error of [`validate`](Self::validate).
    pub fn validate_cross_validation(&self) -> Result<(), EvaluateError> {
        self.validate()?;
        if self.folds < 2 {
            return Err(EvaluateError::InvalidConfig {
                reason: format!("folds must be >= 2, got {}", self.folds),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = EvaluateConfig::default();
        assert_eq!(config.training_fraction(), 0.8);
        assert_eq!(config.class_count(), None);
        assert_eq!(config.folds(), 5);
        assert!(config.shuffle_folds());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = EvaluateConfig::default()
            .with_training_fraction(0.5)
            .with_class_count(Some(9))
            .with_folds(10)
            .with_shuffle_folds(false);

        assert_eq!(config.training_fraction(), 0.5);
        assert_eq!(config.class_count(), Some(9));
        assert_eq!(config.folds(), 10);
        assert!(!config.shuffle_folds());
        assert_eq!(config.resolve_class_count(3), 9);
        assert_eq!(EvaluateConfig::default().resolve_class_count(3), 3);
    }

    #[test]
    fn test_validate_rejects() {
        for config in [
            EvaluateConfig::default().with_training_fraction(1.5),
            EvaluateConfig::default().with_training_fraction(f64::NAN),
            EvaluateConfig::default().with_class_count(Some(0)),
        ] {
            assert!(
                matches!(config.validate(), Err(EvaluateError::InvalidConfig { .. })),
                "{config:?} should be rejected"
            );
            assert!(config.validate_cross_validation().is_err());
        }
    }

    #[test]
    fn test_fold_count_only_checked_for_cross_validation() {
        let config = EvaluateConfig::default().with_folds(1);
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.validate_cross_validation(),
            Err(EvaluateError::InvalidConfig { .. })
        ));
        assert!(EvaluateConfig::default().validate_cross_validation().is_ok());
    }
}
