//! Min-max normalization with a chunked parallel min/max pass.

use morpho_stats::{column_min_max, merge_min_max};
use rayon::prelude::*;
use tracing::debug;

use crate::error::PreprocessError;
use crate::validate_rows;

/// Per-feature minimum and maximum observed before rescaling.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRange {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl FeatureRange {
    /// Per-feature minima.
    pub fn min(&self) -> &[f64] {
        &self.min
    }

    /// Per-feature maxima.
    pub fn max(&self) -> &[f64] {
        &self.max
    }

    /// Rescales `row` in place with this range.
    ///
    /// Constant features (max == min) map to 0. Values outside the fitted
    /// range fall outside `[0, 1]`.
    pub fn apply(&self, row: &mut [f64]) {
        for ((x, &lo), &hi) in row.iter_mut().zip(&self.min).zip(&self.max) {
            let span = hi - lo;
            *x = if span == 0.0 { 0.0 } else { (*x - lo) / span };
        }
    }
}

/// Normalizes every feature column of `rows` to `[0, 1]` in place.
///
/// The min/max pass runs on the rayon pool with one chunk per thread.
/// See [`normalize_with_workers`].
///
/// # Errors
///
/// Returns [`PreprocessError`] for empty or ragged input.
pub fn normalize<T>(rows: &mut [T]) -> Result<FeatureRange, PreprocessError>
where
    T: AsRef<[f64]> + AsMut<[f64]> + Sync,
{
    normalize_with_workers(rows, rayon::current_num_threads())
}

/// Normalizes `rows` in place, splitting the min/max pass into `workers`
/// contiguous chunks.
///
/// For each feature j, `x ← (x − min_j) / (max_j − min_j)`; a feature with
/// `max_j == min_j` becomes 0. The per-chunk results are merged with
/// `f64::min`/`f64::max`, so the output does not depend on `workers`.
///
/// # Errors
///
/// Returns [`PreprocessError::InvalidWorkers`] for `workers == 0`, or the
/// shape errors of [`normalize`].
#[tracing::instrument(skip_all, fields(rows = rows.len(), workers = workers))]
pub fn normalize_with_workers<T>(
    rows: &mut [T],
    workers: usize,
) -> Result<FeatureRange, PreprocessError>
where
    T: AsRef<[f64]> + AsMut<[f64]> + Sync,
{
    if workers == 0 {
        return Err(PreprocessError::InvalidWorkers { workers });
    }
    let dim = validate_rows(rows)?;

    let chunk = rows.len().div_ceil(workers);
    let (min, max) = rows
        .par_chunks(chunk)
        .map(|c| column_min_max(c, dim))
        .reduce(
            || (vec![f64::INFINITY; dim], vec![f64::NEG_INFINITY; dim]),
            merge_min_max,
        );

    let range = FeatureRange { min, max };
    for row in rows.iter_mut() {
        range.apply(row.as_mut());
    }

    let constant = range
        .min
        .iter()
        .zip(&range.max)
        .filter(|(lo, hi)| lo == hi)
        .count();
    debug!(features = dim, constant, "normalized");
    Ok(range)
}

/// Copying variant of [`normalize`]; `rows` is left untouched.
///
/// # Errors
///
/// Same as [`normalize`].
pub fn normalized<T>(rows: &[T]) -> Result<(Vec<Vec<f64>>, FeatureRange), PreprocessError>
where
    T: AsRef<[f64]>,
{
    let mut out: Vec<Vec<f64>> = rows.iter().map(|r| r.as_ref().to_vec()).collect();
    let range = normalize(&mut out)?;
    Ok((out, range))
}
