//! Error types for the morpho-kmeans crate.

/// Error type for all fallible operations in the morpho-kmeans crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KMeansError {
    /// Returned when k is zero or exceeds the number of training samples.
    #[error("k must be in 1..={n}, got {k}")]
    InvalidK {
        /// Requested cluster count.
        k: usize,
        /// Number of training samples.
        n: usize,
    },

    /// Returned when the Minkowski exponent is not a finite positive number.
    #[error("p must be finite and > 0, got {p}")]
    InvalidP {
        /// The invalid exponent.
        p: f64,
    },

    /// Returned when the iteration cap is zero.
    #[error("max_iterations must be >= 1")]
    InvalidMaxIterations,

    /// Returned when the training set is empty.
    #[error("no training samples provided")]
    EmptyTrainingSet,

    /// Returned when the training rows have no features.
    #[error("training rows have no features")]
    EmptyFeatures,

    /// Returned when a row's length differs from the clustering dimension.
    #[error("row {row} has {got} features, expected {expected}")]
    DimensionMismatch {
        /// Offending row index, or 0 for a single query point.
        row: usize,
        /// Feature count of the clustering.
        expected: usize,
        /// Feature count of the row.
        got: usize,
    },

    /// Returned when the label slice does not match the training set size.
    #[error("{labels} labels provided for {n} training samples")]
    LabelCountMismatch {
        /// Number of labels.
        labels: usize,
        /// Number of clustered samples.
        n: usize,
    },

    /// Returned when centroid or membership buffers cannot be allocated.
    #[error("failed to allocate {elements} elements for clustering")]
    AllocationFailed {
        /// Requested element count.
        elements: usize,
    },
}
