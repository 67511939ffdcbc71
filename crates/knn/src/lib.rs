//! Minkowski distances and k-nearest-neighbour classification.
//!
//! # Quick start
//!
//! ```
//! use morpho_knn::{KnnConfig, knn_classify, precompute_distances};
//!
//! let train = vec![vec![1.0], vec![2.0], vec![3.0]];
//! let labels = [1, 2, 3];
//! let test = train.clone();
//! let config = KnnConfig::new(1).with_p(2.0);
//! config.validate_for(train.len()).unwrap();
//!
//! let d = precompute_distances(&train, &test, config.p()).unwrap();
//! for i in 0..test.len() {
//!     assert_eq!(knn_classify(&d, i, &labels, config.k()).unwrap(), labels[i]);
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! precompute_distances()      (matrix.rs)
//!   └─ minkowski_unchecked()  (distance.rs)
//! knn_classify()              (knn.rs)
//!   ├─ validate inputs
//!   ├─ sort_neighbors()       (select.rs, stable)
//!   └─ majority_vote()        (select.rs, closer label wins ties)
//! ```
//!
//! For loops over many test rows, use [`knn_classify_with_scratch`] with a
//! reusable [`KnnScratch`], or [`knn_classify_all`].

pub mod config;
pub mod error;
pub mod knn;
pub mod matrix;

pub(crate) mod distance;
pub(crate) mod select;

pub use config::KnnConfig;
pub use distance::{minkowski, minkowski_unchecked, squared_euclidean};
pub use error::KnnError;
pub use knn::{KnnScratch, knn_classify, knn_classify_all, knn_classify_with_scratch};
pub use matrix::{DistanceMatrix, precompute_distances};

/// Heuristic default for k: `floor(sqrt(n_train)).max(1)`.
///
/// Used when no k is configured for a classification run.
pub fn k_heuristic(n_train: usize) -> usize {
    (n_train as f64).sqrt().floor().max(1.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_heuristic_known_values() {
        assert_eq!(k_heuristic(1), 1);
        assert_eq!(k_heuristic(4), 2);
        assert_eq!(k_heuristic(10), 3); // floor(3.16) = 3
        assert_eq!(k_heuristic(99), 9);
        assert_eq!(k_heuristic(100), 10);
    }

    #[test]
    fn test_k_heuristic_zero() {
        assert_eq!(k_heuristic(0), 1);
    }
}
