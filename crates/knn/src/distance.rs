//! Minkowski distance kernel.

use crate::config::validate_p;
use crate::error::KnnError;

/// Computes the Minkowski distance `(Σ |a_f − b_f|^p)^(1/p)`.
///
/// `p = 1` is the Manhattan distance and `p = 2` the Euclidean distance;
/// both dispatch to specialised loops.
///
/// # Errors
///
/// Returns [`KnnError::InvalidP`] if `p` is non-finite or `<= 0`,
/// [`KnnError::EmptyFeatures`] if either vector is empty, and
/// [`KnnError::DimensionMismatch`] if the lengths differ.
///
/// # Example
///
/// ```
/// use morpho_knn::minkowski;
///
/// let d = minkowski(&[0.0, 0.0], &[3.0, 4.0], 2.0).unwrap();
/// assert_eq!(d, 5.0);
/// ```
pub fn minkowski(a: &[f64], b: &[f64], p: f64) -> Result<f64, KnnError> {
    validate_p(p)?;
    check_pair(a, b)?;
    Ok(minkowski_unchecked(a, b, p))
}

/// Validates that two feature vectors can be compared.
pub(crate) fn check_pair(a: &[f64], b: &[f64]) -> Result<(), KnnError> {
    if a.is_empty() || b.is_empty() {
        return Err(KnnError::EmptyFeatures);
    }
    if a.len() != b.len() {
        return Err(KnnError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// Minkowski distance without parameter checks.
///
/// Callers validate `p` once and the vector shapes up front; this keeps
/// validation out of the `|test| × |train|` inner loop.
///
/// # Panics
///
/// Debug-asserts that `a.len() == b.len()`.
#[inline]
pub fn minkowski_unchecked(a: &[f64], b: &[f64], p: f64) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    if p == 1.0 {
        manhattan(a, b)
    } else if p == 2.0 {
        euclidean(a, b)
    } else {
        general(a, b, p)
    }
}

#[inline]
fn manhattan(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

#[inline]
fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

#[inline]
fn general(a: &[f64], b: &[f64], p: f64) -> f64 {
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y).abs().powf(p)).sum();
    sum.powf(1.0 / p)
}

/// Squared Euclidean distance `Σ (a_f − b_f)²`.
///
/// Used directly by the sum-of-squares scores, where taking a root and
/// squaring again would only add rounding error.
#[inline]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_manhattan_euclidean_and_cubic() {
        let a = [0.0, 0.0];
        let b = [3.0, 4.0];
        assert_abs_diff_eq!(minkowski(&a, &b, 1.0).unwrap(), 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(minkowski(&a, &b, 2.0).unwrap(), 5.0, epsilon = 1e-12);
        let expected = 91.0_f64.powf(1.0 / 3.0);
        assert_abs_diff_eq!(minkowski(&a, &b, 3.0).unwrap(), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(expected, 4.497_941_445, epsilon = 1e-8);
    }

    #[test]
    fn test_general_path_matches_specialisations() {
        // Force the general powf path by bypassing the dispatch.
        let a = [1.5, -2.0, 0.25, 7.0];
        let b = [-0.5, 3.0, 1.0, 6.0];
        assert_abs_diff_eq!(general(&a, &b, 1.0), manhattan(&a, &b), epsilon = 1e-12);
        assert_abs_diff_eq!(general(&a, &b, 2.0), euclidean(&a, &b), epsilon = 1e-12);
    }

    #[test]
    fn test_identity_is_zero() {
        let a = [1.0, -3.0, 2.5];
        for p in [1.0, 2.0, 3.0, 0.5] {
            assert_eq!(minkowski(&a, &a, p).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_symmetry() {
        let a = [0.3, 1.7, -4.2];
        let b = [2.0, -1.0, 0.0];
        for p in [1.0, 2.0, 2.5, 4.0] {
            assert_eq!(minkowski(&a, &b, p).unwrap(), minkowski(&b, &a, p).unwrap());
        }
    }

    #[test]
    fn test_fractional_p_allowed() {
        // p in (0, 1) is not a metric but is still defined.
        let d = minkowski(&[0.0, 0.0], &[1.0, 1.0], 0.5).unwrap();
        assert_abs_diff_eq!(d, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_p() {
        assert_eq!(
            minkowski(&[1.0], &[2.0], 0.0),
            Err(KnnError::InvalidP { p: 0.0 })
        );
        assert!(matches!(
            minkowski(&[1.0], &[2.0], -1.0),
            Err(KnnError::InvalidP { .. })
        ));
    }

    #[test]
    fn test_absent_vectors() {
        assert_eq!(minkowski(&[], &[1.0], 2.0), Err(KnnError::EmptyFeatures));
        assert_eq!(minkowski(&[1.0], &[], 2.0), Err(KnnError::EmptyFeatures));
    }

    #[test]
    fn test_dimension_mismatch() {
        assert_eq!(
            minkowski(&[1.0, 2.0], &[1.0], 2.0),
            Err(KnnError::DimensionMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn test_squared_euclidean() {
        assert_abs_diff_eq!(
            squared_euclidean(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]),
            14.0,
            epsilon = 1e-12
        );
    }
}
