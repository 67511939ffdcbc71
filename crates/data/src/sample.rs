//! A single labelled feature vector.

/// One labelled shape descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    class: u32,
    sample_id: u32,
    features: Vec<f64>,
}

impl Sample {
    /// Creates a new sample.
    ///
    /// Labels and feature counts are validated when the sample joins a
    /// [`Dataset`](crate::Dataset), not here.
    pub fn new(class: u32, sample_id: u32, features: Vec<f64>) -> Self {
        Self {
            class,
            sample_id,
            features,
        }
    }

    /// Returns the class label (>= 1 inside a dataset).
    pub fn class(&self) -> u32 {
        self.class
    }

    /// Returns the sample id.
    pub fn sample_id(&self) -> u32 {
        self.sample_id
    }

    /// Returns the feature vector.
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// Returns the feature vector for in-place preprocessing.
    pub fn features_mut(&mut self) -> &mut [f64] {
        &mut self.features
    }

    /// Returns the number of features.
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.features
    }
}

impl AsMut<[f64]> for Sample {
    fn as_mut(&mut self) -> &mut [f64] {
        &mut self.features
    }
}
