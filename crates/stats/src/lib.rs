//! Statistical helper functions for the morpho toolkit.
//!
//! Row-oriented helpers take any `AsRef<[f64]>` rows so they work on
//! samples, sample references and plain vectors.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Population variance with N denominator.
/// Returns 0.0 if empty.
pub fn population_variance(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64
}

/// Population standard deviation with N denominator.
/// Returns 0.0 if empty.
pub fn population_sd(data: &[f64]) -> f64 {
    population_variance(data).sqrt()
}

/// Coordinate-wise mean of `rows`, each of length `dim`.
///
/// Returns a zero vector of length `dim` when `rows` is empty.
///
/// # Panics
///
/// Debug-asserts that every row has length `dim`.
pub fn column_means<A: AsRef<[f64]>>(rows: &[A], dim: usize) -> Vec<f64> {
    let mut out = vec![0.0; dim];
    if rows.is_empty() {
        return out;
    }
    for row in rows {
        let row = row.as_ref();
        debug_assert_eq!(row.len(), dim);
        for (acc, &v) in out.iter_mut().zip(row) {
            *acc += v;
        }
    }
    let n = rows.len() as f64;
    for acc in &mut out {
        *acc /= n;
    }
    out
}

/// Per-column minimum and maximum of `rows`, each of length `dim`.
///
/// Empty input yields `(+inf, -inf)` per column, the identity of the
/// min/max reduction, so partial results can be merged with
/// [`merge_min_max`] in any order.
pub fn column_min_max<A: AsRef<[f64]>>(rows: &[A], dim: usize) -> (Vec<f64>, Vec<f64>) {
    let mut min = vec![f64::INFINITY; dim];
    let mut max = vec![f64::NEG_INFINITY; dim];
    for row in rows {
        let row = row.as_ref();
        debug_assert_eq!(row.len(), dim);
        for j in 0..dim {
            min[j] = min[j].min(row[j]);
            max[j] = max[j].max(row[j]);
        }
    }
    (min, max)
}

/// Merges two per-column `(min, max)` pairs.
pub fn merge_min_max(
    (mut min_a, mut max_a): (Vec<f64>, Vec<f64>),
    (min_b, max_b): (Vec<f64>, Vec<f64>),
) -> (Vec<f64>, Vec<f64>) {
    for (a, b) in min_a.iter_mut().zip(min_b) {
        *a = a.min(b);
    }
    for (a, b) in max_a.iter_mut().zip(max_b) {
        *a = a.max(b);
    }
    (min_a, max_a)
}

/// Values of column `j` across `rows`.
pub fn column<A: AsRef<[f64]>>(rows: &[A], j: usize) -> Vec<f64> {
    rows.iter().map(|r| r.as_ref()[j]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_population_sd() {
        // Classic textbook set: population sd is exactly 2.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(population_variance(&data), 4.0, epsilon = 1e-12);
        assert_relative_eq!(population_sd(&data), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_population_sd_single_and_empty() {
        assert_eq!(population_sd(&[5.0]), 0.0);
        assert_eq!(population_sd(&[]), 0.0);
    }

    #[test]
    fn test_column_means() {
        let rows = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![3.0, 2.0]];
        let m = column_means(&rows, 2);
        assert_relative_eq!(m[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(m[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_column_means_empty() {
        let rows: Vec<Vec<f64>> = vec![];
        assert_eq!(column_means(&rows, 3), vec![0.0; 3]);
    }

    #[test]
    fn test_column_min_max() {
        let rows = vec![vec![1.0, -2.0], vec![4.0, 3.0], vec![-1.0, 0.5]];
        let (min, max) = column_min_max(&rows, 2);
        assert_eq!(min, vec![-1.0, -2.0]);
        assert_eq!(max, vec![4.0, 3.0]);
    }

    #[test]
    fn test_merge_min_max_is_order_independent() {
        let a = vec![vec![1.0], vec![5.0]];
        let b = vec![vec![-3.0], vec![2.0]];
        let ab = merge_min_max(column_min_max(&a, 1), column_min_max(&b, 1));
        let ba = merge_min_max(column_min_max(&b, 1), column_min_max(&a, 1));
        assert_eq!(ab, ba);
        assert_eq!(ab, (vec![-3.0], vec![5.0]));
    }

    #[test]
    fn test_merge_with_empty_identity() {
        let empty: Vec<Vec<f64>> = vec![];
        let a = vec![vec![2.0, 7.0]];
        let merged = merge_min_max(column_min_max(&empty, 2), column_min_max(&a, 2));
        assert_eq!(merged, (vec![2.0, 7.0], vec![2.0, 7.0]));
    }

    #[test]
    fn test_column() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(column(&rows, 1), vec![2.0, 4.0]);
    }
}
