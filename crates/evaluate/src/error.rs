//! Evaluation error types.

use std::path::PathBuf;

use morpho_kmeans::KMeansError;
use morpho_knn::KnnError;
use morpho_split::SplitError;

/// Errors that can occur during evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvaluateError {
    /// The confusion-matrix class count is zero.
    #[error("class count must be >= 1")]
    InvalidClassCount,

    /// Two confusion matrices of different sizes were merged.
    #[error("cannot merge a {right}x{right} confusion matrix into a {left}x{left} one")]
    ClassCountMismatch {
        /// Class count of the receiving matrix.
        left: usize,
        /// Class count of the merged matrix.
        right: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// The matrix buffer could not be allocated.
    #[error("failed to allocate {elements} confusion-matrix cells")]
    AllocationFailed {
        /// Number of `u64` cells requested.
        elements: usize,
    },

    /// Partitioning failed.
    #[error("split failed: {0}")]
    Split(#[from] SplitError),

    /// k-NN classification failed.
    #[error("k-NN failed: {0}")]
    Knn(#[from] KnnError),

    /// k-means clustering failed.
    #[error("k-means failed: {0}")]
    KMeans(#[from] KMeansError),

    /// Writing a report failed.
    #[error("failed to write {}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serializer failure.
        reason: String,
    },
}
