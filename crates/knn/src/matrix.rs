//! Owned test × train distance matrix and its batched precomputation.

use crate::config::validate_p;
use crate::distance::{check_pair, minkowski_unchecked};
use crate::error::KnnError;

/// Rectangular `n_test × n_train` matrix of pairwise distances.
///
/// Stored row-major in a single buffer; row `i` holds the distances from
/// test sample `i` to every training sample. The buffer is released when
/// the matrix goes out of scope, on every exit path.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    n_test: usize,
    n_train: usize,
}

impl DistanceMatrix {
    /// Returns the number of test rows.
    pub fn n_test(&self) -> usize {
        self.n_test
    }

    /// Returns the number of training columns.
    pub fn n_train(&self) -> usize {
        self.n_train
    }

    /// Returns `D[i][j]`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_test` or `j >= n_train`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(j < self.n_train, "column {j} out of range");
        self.data[i * self.n_train + j]
    }

    /// Returns row `i`, or `None` if out of range.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.n_test {
            return None;
        }
        Some(&self.data[i * self.n_train..(i + 1) * self.n_train])
    }

    /// Iterates over the rows in test order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on 0; an empty training set means no data either way.
        self.data
            .chunks_exact(self.n_train.max(1))
            .take(self.n_test)
    }
}

/// Precomputes the `|test| × |train|` Minkowski distance matrix.
///
/// Accepts any rows exposing `AsRef<[f64]>` (samples, sample references,
/// plain vectors). The result is deterministic and independent of the
/// order in which entries are filled.
///
/// # Errors
///
/// - [`KnnError::InvalidP`] for a bad exponent.
/// - [`KnnError::EmptyTrainingSet`] when `train` is empty.
/// - [`KnnError::EmptyFeatures`] / [`KnnError::DimensionMismatch`] when a
///   row is empty or its length differs from the first training row.
/// - [`KnnError::InvalidDistance`] if an entry is negative or NaN.
/// - [`KnnError::AllocationFailed`] if the matrix cannot be allocated.
#[tracing::instrument(skip_all, fields(n_test = test.len(), n_train = train.len(), p = p))]
pub fn precompute_distances<A, B>(train: &[A], test: &[B], p: f64) -> Result<DistanceMatrix, KnnError>
where
    A: AsRef<[f64]>,
    B: AsRef<[f64]>,
{
    validate_p(p)?;
    let first = train.first().ok_or(KnnError::EmptyTrainingSet)?.as_ref();
    for row in train.iter().map(AsRef::as_ref).chain(test.iter().map(AsRef::as_ref)) {
        check_pair(first, row)?;
    }

    let n_test = test.len();
    let n_train = train.len();
    let elements = n_test
        .checked_mul(n_train)
        .ok_or(KnnError::AllocationFailed { elements: usize::MAX })?;
    let mut data = Vec::new();
    data.try_reserve_exact(elements)
        .map_err(|_| KnnError::AllocationFailed { elements })?;

    for (i, t) in test.iter().enumerate() {
        let t = t.as_ref();
        for (j, r) in train.iter().enumerate() {
            let d = minkowski_unchecked(t, r.as_ref(), p);
            // Holds for any p > 0 on finite input; NaN fails the comparison too.
            if !(d >= 0.0) {
                return Err(KnnError::InvalidDistance {
                    row: i,
                    col: j,
                    value: d,
                });
            }
            data.push(d);
        }
    }
    tracing::debug!(elements, "distance matrix computed");

    Ok(DistanceMatrix {
        data,
        n_test,
        n_train,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::minkowski;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_shape_and_entries() {
        let train = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![3.0, 4.0]];
        let test = vec![vec![0.0, 0.0], vec![2.0, 2.0]];
        let d = precompute_distances(&train, &test, 2.0).unwrap();
        assert_eq!(d.n_test(), 2);
        assert_eq!(d.n_train(), 3);
        for (i, t) in test.iter().enumerate() {
            for (j, r) in train.iter().enumerate() {
                assert_eq!(d.get(i, j), minkowski(t, r, 2.0).unwrap());
            }
        }
        assert_abs_diff_eq!(d.get(0, 2), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rows() {
        let train = vec![vec![0.0], vec![2.0]];
        let test = vec![vec![1.0], vec![5.0]];
        let d = precompute_distances(&train, &test, 1.0).unwrap();
        let rows: Vec<&[f64]> = d.rows().collect();
        assert_eq!(rows, vec![&[1.0, 1.0][..], &[5.0, 3.0][..]]);
        assert_eq!(d.row(1), Some(&[5.0, 3.0][..]));
        assert_eq!(d.row(2), None);
    }

    #[test]
    fn test_empty_test_set() {
        let train = vec![vec![0.0]];
        let test: Vec<Vec<f64>> = vec![];
        let d = precompute_distances(&train, &test, 2.0).unwrap();
        assert_eq!(d.n_test(), 0);
        assert_eq!(d.rows().count(), 0);
    }

    #[test]
    fn test_errors() {
        let train = vec![vec![0.0, 1.0]];
        let test = vec![vec![0.0]];
        assert_eq!(
            precompute_distances(&train, &test, 2.0),
            Err(KnnError::DimensionMismatch { left: 2, right: 1 })
        );
        assert_eq!(
            precompute_distances(&train, &train, -1.0),
            Err(KnnError::InvalidP { p: -1.0 })
        );
        let empty: Vec<Vec<f64>> = vec![];
        assert_eq!(
            precompute_distances(&empty, &train, 2.0),
            Err(KnnError::EmptyTrainingSet)
        );
    }
}
