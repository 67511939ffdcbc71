//! Z-score standardization using the population standard deviation.

use morpho_stats::{column, mean, population_sd};
use tracing::debug;

use crate::error::PreprocessError;
use crate::validate_rows;

/// Per-feature mean and population standard deviation observed before rescaling.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMoments {
    mean: Vec<f64>,
    sd: Vec<f64>,
}

impl FeatureMoments {
    /// Per-feature means.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Per-feature population standard deviations.
    pub fn sd(&self) -> &[f64] {
        &self.sd
    }

    /// Standardizes `row` in place; features with zero sd are left as is.
    pub fn apply(&self, row: &mut [f64]) {
        for ((x, &mu), &sigma) in row.iter_mut().zip(&self.mean).zip(&self.sd) {
            if sigma != 0.0 {
                *x = (*x - mu) / sigma;
            }
        }
    }
}

/// Standardizes every feature column of `rows` in place.
///
/// For each feature j with population sd `σ_j > 0`,
/// `x ← (x − μ_j) / σ_j`. Columns with `σ_j == 0` are not modified.
///
/// # Errors
///
/// Returns [`PreprocessError`] for empty or ragged input.
#[tracing::instrument(skip_all, fields(rows = rows.len()))]
pub fn standardize<T>(rows: &mut [T]) -> Result<FeatureMoments, PreprocessError>
where
    T: AsRef<[f64]> + AsMut<[f64]>,
{
    let dim = validate_rows(rows)?;

    let mut moments = FeatureMoments {
        mean: Vec::with_capacity(dim),
        sd: Vec::with_capacity(dim),
    };
    for j in 0..dim {
        let values = column(rows, j);
        moments.mean.push(mean(&values));
        moments.sd.push(population_sd(&values));
    }

    for row in rows.iter_mut() {
        moments.apply(row.as_mut());
    }

    let constant = moments.sd.iter().filter(|&&s| s == 0.0).count();
    debug!(features = dim, constant, "standardized");
    Ok(moments)
}

/// Copying variant of [`standardize`]; `rows` is left untouched.
///
/// # Errors
///
/// Same as [`standardize`].
pub fn standardized<T>(rows: &[T]) -> Result<(Vec<Vec<f64>>, FeatureMoments), PreprocessError>
where
    T: AsRef<[f64]>,
{
    let mut out: Vec<Vec<f64>> = rows.iter().map(|r| r.as_ref().to_vec()).collect();
    let moments = standardize(&mut out)?;
    Ok((out, moments))
}
