//! Error types for the morpho-knn crate.

/// Error type for all fallible operations in the morpho-knn crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnnError {
    /// Returned when the Minkowski exponent is not a finite positive number.
    #[error("p must be finite and > 0, got {p}")]
    InvalidP {
        /// The invalid exponent.
        p: f64,
    },

    /// Returned when k is zero or exceeds the training set size.
    #[error("k must be in 1..={n_train}, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
        /// Number of training samples available.
        n_train: usize,
    },

    /// Returned when a feature vector is empty.
    #[error("feature vector is empty")]
    EmptyFeatures,

    /// Returned when two feature vectors have different lengths.
    #[error("feature length {left} does not match {right}")]
    DimensionMismatch {
        /// Length of the first vector.
        left: usize,
        /// Length of the second vector.
        right: usize,
    },

    /// Returned when the training set is empty.
    #[error("no training samples provided")]
    EmptyTrainingSet,

    /// Returned when the label slice does not match the distance matrix width.
    #[error("{labels} labels provided for {n_train} training samples")]
    LabelCountMismatch {
        /// Number of labels.
        labels: usize,
        /// Number of training columns in the distance matrix.
        n_train: usize,
    },

    /// Returned when a test row index is outside the distance matrix.
    #[error("test index {index} out of range for {n_test} test samples")]
    TestIndexOutOfRange {
        /// The requested row.
        index: usize,
        /// Number of rows in the matrix.
        n_test: usize,
    },

    /// Returned when a computed distance is negative or NaN.
    #[error("invalid distance {value} at test {row}, train {col}")]
    InvalidDistance {
        /// Test row.
        row: usize,
        /// Training column.
        col: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when a distance matrix or scratch buffer cannot be allocated.
    #[error("failed to allocate {elements} distance entries")]
    AllocationFailed {
        /// Number of `f64` entries requested.
        elements: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_p() {
        let e = KnnError::InvalidP { p: 0.0 };
        assert_eq!(e.to_string(), "p must be finite and > 0, got 0");
    }

    #[test]
    fn error_invalid_k() {
        let e = KnnError::InvalidK { k: 7, n_train: 5 };
        assert_eq!(e.to_string(), "k must be in 1..=5, got 7");
    }

    #[test]
    fn error_dimension_mismatch() {
        let e = KnnError::DimensionMismatch { left: 3, right: 2 };
        assert_eq!(e.to_string(), "feature length 3 does not match 2");
    }

    #[test]
    fn error_label_count_mismatch() {
        let e = KnnError::LabelCountMismatch {
            labels: 2,
            n_train: 4,
        };
        assert_eq!(e.to_string(), "2 labels provided for 4 training samples");
    }

    #[test]
    fn error_test_index_out_of_range() {
        let e = KnnError::TestIndexOutOfRange { index: 9, n_test: 3 };
        assert_eq!(e.to_string(), "test index 9 out of range for 3 test samples");
    }

    #[test]
    fn error_allocation_failed() {
        let e = KnnError::AllocationFailed { elements: 12 };
        assert_eq!(e.to_string(), "failed to allocate 12 distance entries");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<KnnError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<KnnError>();
    }
}
