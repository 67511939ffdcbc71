//! Error types for morpho-preprocess.

/// Error type for all fallible operations in the morpho-preprocess crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreprocessError {
    /// Returned when there are no rows to rescale.
    #[error("no rows to preprocess")]
    Empty,

    /// Returned when the rows have no features.
    #[error("rows have no features")]
    EmptyFeatures,

    /// Returned when a row's length differs from the first row's.
    #[error("row {row} has {got} features, expected {expected}")]
    DimensionMismatch {
        /// Offending row index.
        row: usize,
        /// Feature count of row 0.
        expected: usize,
        /// Feature count of the offending row.
        got: usize,
    },

    /// Returned when the worker count for the parallel pass is zero.
    #[error("worker count must be >= 1, got {workers}")]
    InvalidWorkers {
        /// The invalid worker count.
        workers: usize,
    },

    /// Returned when a preprocessing method name is not recognised.
    #[error("unknown preprocessing '{name}' (expected none, normalize or standardize)")]
    UnknownMethod {
        /// Name as given.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_dimension_mismatch() {
        let err = PreprocessError::DimensionMismatch {
            row: 4,
            expected: 16,
            got: 15,
        };
        assert_eq!(err.to_string(), "row 4 has 15 features, expected 16");
    }

    #[test]
    fn display_unknown_method() {
        let err = PreprocessError::UnknownMethod {
            name: "scale".into(),
        };
        assert_eq!(
            err.to_string(),
            "unknown preprocessing 'scale' (expected none, normalize or standardize)"
        );
    }

    #[test]
    fn is_std_error() {
        let err: Box<dyn std::error::Error + Send + Sync> = Box::new(PreprocessError::Empty);
        assert_eq!(err.to_string(), "no rows to preprocess");
    }
}
