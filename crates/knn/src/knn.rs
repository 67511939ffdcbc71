//! k-NN classification entry points and scratch buffer management.

use crate::error::KnnError;
use crate::matrix::DistanceMatrix;
use crate::select::{majority_vote, sort_neighbors};

/// Pre-allocated scratch buffers for k-NN classification.
///
/// Reuse across calls to [`knn_classify_with_scratch`] to avoid a heap
/// allocation per test row.
///
/// # Example
///
/// ```
/// use morpho_knn::KnnScratch;
///
/// let mut scratch = KnnScratch::new(200);
/// // Use with knn_classify_with_scratch() in a loop...
/// ```
#[derive(Debug, Clone, Default)]
pub struct KnnScratch {
    /// (distance, label) pairs for sorting.
    pub(crate) pairs: Vec<(f64, u32)>,
    /// (label, count) tally for the vote.
    pub(crate) tally: Vec<(u32, usize)>,
}

impl KnnScratch {
    /// Creates a new scratch buffer with capacity for `n_train` training samples.
    pub fn new(n_train: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(n_train),
            tally: Vec::new(),
        }
    }
}

/// Validates all inputs against the distance matrix.
fn validate_inputs(
    distances: &DistanceMatrix,
    test_index: usize,
    train_labels: &[u32],
    k: usize,
) -> Result<(), KnnError> {
    let n_train = distances.n_train();
    if k < 1 || k > n_train {
        return Err(KnnError::InvalidK { k, n_train });
    }
    if train_labels.len() != n_train {
        return Err(KnnError::LabelCountMismatch {
            labels: train_labels.len(),
            n_train,
        });
    }
    if test_index >= distances.n_test() {
        return Err(KnnError::TestIndexOutOfRange {
            index: test_index,
            n_test: distances.n_test(),
        });
    }
    Ok(())
}

/// Internal implementation that assumes all inputs are validated.
fn classify_inner(
    row: &[f64],
    train_labels: &[u32],
    k: usize,
    scratch: &mut KnnScratch,
) -> Result<u32, KnnError> {
    let wanted = row.len();
    if scratch.pairs.capacity() < wanted {
        let additional = wanted - scratch.pairs.len();
        scratch
            .pairs
            .try_reserve_exact(additional)
            .map_err(|_| KnnError::AllocationFailed { elements: wanted })?;
    }

    sort_neighbors(row, train_labels, &mut scratch.pairs);
    // k >= 1 and k <= row.len(), so the window is never empty.
    majority_vote(&scratch.pairs[..k], &mut scratch.tally).ok_or(KnnError::InvalidK {
        k,
        n_train: row.len(),
    })
}

/// Classifies test row `test_index` of a precomputed distance matrix.
///
/// Builds `(D[i][j], label[j])` pairs, stable-sorts them by distance and
/// returns the most frequent label among the first `k`. Ties go to the
/// label whose nearest occurrence comes first in the sorted order, so the
/// closer neighbour wins and equal distances fall back to training order.
///
/// This is the simple entry point. For loops over many test rows, use
/// [`knn_classify_with_scratch`] to reuse allocations.
///
/// # Errors
///
/// - [`KnnError::InvalidK`] unless `1 <= k <= n_train`.
/// - [`KnnError::LabelCountMismatch`] if `train_labels` does not match the
///   matrix width.
/// - [`KnnError::TestIndexOutOfRange`] for a bad row.
/// - [`KnnError::AllocationFailed`] if scratch space cannot be allocated.
///
/// # Example
///
/// ```
/// use morpho_knn::{knn_classify, precompute_distances};
///
/// let train = vec![vec![0.0], vec![2.0]];
/// let labels = [1, 2];
/// let test = vec![vec![1.0]];
/// let d = precompute_distances(&train, &test, 2.0).unwrap();
///
/// // Equidistant neighbours: the earlier one wins.
/// assert_eq!(knn_classify(&d, 0, &labels, 2).unwrap(), 1);
/// ```
pub fn knn_classify(
    distances: &DistanceMatrix,
    test_index: usize,
    train_labels: &[u32],
    k: usize,
) -> Result<u32, KnnError> {
    validate_inputs(distances, test_index, train_labels, k)?;
    let mut scratch = KnnScratch::default();
    let row = distances
        .row(test_index)
        .ok_or(KnnError::TestIndexOutOfRange {
            index: test_index,
            n_test: distances.n_test(),
        })?;
    classify_inner(row, train_labels, k, &mut scratch)
}

/// Classifies a test row, reusing pre-allocated scratch buffers.
///
/// Identical to [`knn_classify`] but avoids heap allocation by reusing
/// `scratch`. Buffers grow as needed and never shrink.
///
/// # Errors
///
/// Same as [`knn_classify`].
pub fn knn_classify_with_scratch(
    distances: &DistanceMatrix,
    test_index: usize,
    train_labels: &[u32],
    k: usize,
    scratch: &mut KnnScratch,
) -> Result<u32, KnnError> {
    validate_inputs(distances, test_index, train_labels, k)?;
    let row = distances
        .row(test_index)
        .ok_or(KnnError::TestIndexOutOfRange {
            index: test_index,
            n_test: distances.n_test(),
        })?;
    classify_inner(row, train_labels, k, scratch)
}

/// Classifies every test row of `distances` in order.
///
/// # Errors
///
/// Same as [`knn_classify`]; the first failing row aborts the pass.
#[tracing::instrument(skip_all, fields(n_test = distances.n_test(), k = k))]
pub fn knn_classify_all(
    distances: &DistanceMatrix,
    train_labels: &[u32],
    k: usize,
) -> Result<Vec<u32>, KnnError> {
    let mut scratch = KnnScratch::new(distances.n_train());
    (0..distances.n_test())
        .map(|i| knn_classify_with_scratch(distances, i, train_labels, k, &mut scratch))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::precompute_distances;

    fn matrix(train: &[f64], test: &[f64]) -> DistanceMatrix {
        let train: Vec<Vec<f64>> = train.iter().map(|&v| vec![v]).collect();
        let test: Vec<Vec<f64>> = test.iter().map(|&v| vec![v]).collect();
        precompute_distances(&train, &test, 2.0).unwrap()
    }

    #[test]
    fn test_k1_nearest() {
        let d = matrix(&[10.0, 20.0, 5.0], &[6.0]);
        assert_eq!(knn_classify(&d, 0, &[1, 2, 3], 1).unwrap(), 3);
    }

    #[test]
    fn test_equidistant_tie_goes_to_training_order() {
        let d = matrix(&[0.0, 2.0], &[1.0]);
        assert_eq!(knn_classify(&d, 0, &[1, 2], 2).unwrap(), 1);
        // Swapping the training order swaps the winner.
        let d = matrix(&[2.0, 0.0], &[1.0]);
        assert_eq!(knn_classify(&d, 0, &[2, 1], 2).unwrap(), 2);
    }

    #[test]
    fn test_count_tie_goes_to_closer_label() {
        // Sorted window: 2 (d=0.5), 1 (d=1.0), 2 (d=1.0), 1 (d=3.0)
        let d = matrix(&[1.0, 2.5, 3.0, 5.0], &[2.0]);
        assert_eq!(knn_classify(&d, 0, &[1, 2, 2, 1], 4).unwrap(), 2);
    }

    #[test]
    fn test_majority_beats_nearest() {
        let d = matrix(&[0.0, 1.0, 1.1, 1.2], &[0.0]);
        assert_eq!(knn_classify(&d, 0, &[4, 2, 2, 9], 3).unwrap(), 2);
    }

    #[test]
    fn test_invalid_k() {
        let d = matrix(&[0.0, 1.0], &[0.5]);
        assert_eq!(
            knn_classify(&d, 0, &[1, 2], 0),
            Err(KnnError::InvalidK { k: 0, n_train: 2 })
        );
        assert_eq!(
            knn_classify(&d, 0, &[1, 2], 3),
            Err(KnnError::InvalidK { k: 3, n_train: 2 })
        );
    }

    #[test]
    fn test_label_mismatch_and_bad_index() {
        let d = matrix(&[0.0, 1.0], &[0.5]);
        assert_eq!(
            knn_classify(&d, 0, &[1], 1),
            Err(KnnError::LabelCountMismatch {
                labels: 1,
                n_train: 2
            })
        );
        assert_eq!(
            knn_classify(&d, 1, &[1, 2], 1),
            Err(KnnError::TestIndexOutOfRange { index: 1, n_test: 1 })
        );
    }

    #[test]
    fn test_scratch_matches_allocating() {
        let d = matrix(&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.4, 2.6, 3.9]);
        let labels = [1, 1, 2, 2, 3];
        let mut scratch = KnnScratch::new(2);
        for i in 0..3 {
            assert_eq!(
                knn_classify(&d, i, &labels, 3).unwrap(),
                knn_classify_with_scratch(&d, i, &labels, 3, &mut scratch).unwrap()
            );
        }
        assert!(scratch.pairs.capacity() >= 5);
    }

    #[test]
    fn test_classify_all() {
        let d = matrix(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert_eq!(knn_classify_all(&d, &[1, 2, 3], 1).unwrap(), vec![1, 2, 3]);
    }
}
