//! Configuration for k-NN classification.

use crate::error::KnnError;

/// Configuration for a k-NN classification pass.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use morpho_knn::KnnConfig;
///
/// let config = KnnConfig::new(5).with_p(1.0);
///
/// assert!(config.validate().is_ok());
/// assert!(config.validate_for(3).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KnnConfig {
    /// Number of nearest neighbours that vote.
    k: usize,
    /// Minkowski exponent.
    p: f64,
}

impl KnnConfig {
    /// Creates a new configuration with the given k.
    ///
    /// Defaults: `p = 2.0` (Euclidean).
    pub fn new(k: usize) -> Self {
        Self { k, p: 2.0 }
    }

    /// Sets the Minkowski exponent.
    pub fn with_p(mut self, p: f64) -> Self {
        self.p = p;
        self
    }

    /// Returns the number of voting neighbours.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the Minkowski exponent.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Validates this configuration independently of any dataset.
    ///
    /// Returns an error if k < 1 or p is non-finite / non-positive.
    pub fn validate(&self) -> Result<(), KnnError> {
        if self.k < 1 {
            return Err(KnnError::InvalidK {
                k: self.k,
                n_train: 0,
            });
        }
        validate_p(self.p)
    }

    /// Validates this configuration against a training set of `n_train` samples.
    ///
    /// In addition to [`validate`](Self::validate), requires `k <= n_train`.
    pub fn validate_for(&self, n_train: usize) -> Result<(), KnnError> {
        if self.k < 1 || self.k > n_train {
            return Err(KnnError::InvalidK {
                k: self.k,
                n_train,
            });
        }
        validate_p(self.p)
    }
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Checks that `p` is a usable Minkowski exponent.
pub(crate) fn validate_p(p: f64) -> Result<(), KnnError> {
    if !p.is_finite() || p <= 0.0 {
        return Err(KnnError::InvalidP { p });
    }
    Ok(())
}
