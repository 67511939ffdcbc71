//! Configuration for k-means clustering.

use crate::error::KMeansError;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Centroids moving less than this (Euclidean) count as converged.
pub const CONVERGENCE_THRESHOLD: f64 = 1e-3;

/// Configuration for a k-means run.
///
/// # Example
///
/// ```
/// use morpho_kmeans::KMeansConfig;
///
/// let config = KMeansConfig::new(3).with_p(1.0).with_max_iterations(20);
/// assert!(config.validate().is_ok());
/// assert!(config.validate_for(2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters.
    k: usize,
    /// Minkowski exponent used for assignment.
    p: f64,
    /// Iteration cap.
    max_iterations: usize,
}

impl KMeansConfig {
    /// Creates a configuration for `k` clusters.
    ///
    /// Defaults: `p = 2.0`, `max_iterations = 100`.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            p: 2.0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Sets the Minkowski exponent used to assign points to centroids.
    pub fn with_p(mut self, p: f64) -> Self {
        self.p = p;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Returns the cluster count.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the Minkowski exponent.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Returns the iteration cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Validates this configuration independently of any dataset.
    pub fn validate(&self) -> Result<(), KMeansError> {
        if self.k < 1 {
            return Err(KMeansError::InvalidK { k: self.k, n: 0 });
        }
        self.validate_rest()
    }

    /// Validates this configuration against `n` training samples (`k <= n`).
    pub fn validate_for(&self, n: usize) -> Result<(), KMeansError> {
        if n == 0 {
            return Err(KMeansError::EmptyTrainingSet);
        }
        if self.k < 1 || self.k > n {
            return Err(KMeansError::InvalidK { k: self.k, n });
        }
        self.validate_rest()
    }

    fn validate_rest(&self) -> Result<(), KMeansError> {
        if !self.p.is_finite() || self.p <= 0.0 {
            return Err(KMeansError::InvalidP { p: self.p });
        }
        if self.max_iterations == 0 {
            return Err(KMeansError::InvalidMaxIterations);
        }
        Ok(())
    }
}
