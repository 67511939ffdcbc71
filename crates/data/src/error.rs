//! Error types for the morpho-data crate.

/// Error type for dataset construction and validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    /// Returned when a dataset is built from zero samples.
    #[error("dataset contains no samples")]
    Empty,

    /// Returned when a sample has an empty feature vector.
    #[error("sample {sample_id} has no features")]
    EmptyFeatures {
        /// Id of the offending sample.
        sample_id: u32,
    },

    /// Returned when a sample's feature count differs from the first sample's.
    #[error("sample {sample_id} has {got} features, expected {expected}")]
    InconsistentFeatureCount {
        /// Id of the offending sample.
        sample_id: u32,
        /// Feature count of the first sample.
        expected: usize,
        /// Feature count of the offending sample.
        got: usize,
    },

    /// Returned when a class label is zero.
    #[error("sample {sample_id} has class label {class}, labels must be >= 1")]
    InvalidClass {
        /// Id of the offending sample.
        sample_id: u32,
        /// The invalid label.
        class: u32,
    },

    /// Returned when a feature value is NaN or infinite.
    #[error("sample {sample_id} has a non-finite value at feature {index}")]
    NonFiniteFeature {
        /// Id of the offending sample.
        sample_id: u32,
        /// Position of the value in the feature vector.
        index: usize,
    },
}
