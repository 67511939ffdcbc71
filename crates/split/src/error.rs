//! Error types for morpho-split.

/// Error type for all fallible operations in the morpho-split crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitError {
    /// Returned when there is nothing to partition.
    #[error("cannot split an empty sequence")]
    Empty,

    /// Returned when the training fraction is outside `[0, 1]` or NaN.
    #[error("training fraction must be in [0, 1], got {fraction}")]
    InvalidFraction {
        /// The invalid fraction.
        fraction: f64,
    },

    /// Returned when the fold count is outside `2..=n`.
    #[error("fold count must be in 2..={n}, got {k}")]
    InvalidFolds {
        /// Requested number of folds.
        k: usize,
        /// Number of items available.
        n: usize,
    },
}
