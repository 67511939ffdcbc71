//! In-place feature rescaling.
//!
//! [`normalize`] maps each feature column to `[0, 1]`; [`standardize`]
//! centres each column and scales it to unit population standard
//! deviation. Both mutate their input and return the fitted parameters;
//! [`normalized`] and [`standardized`] are copying wrappers.
//!
//! Inputs are any slice of rows implementing `AsRef<[f64]> + AsMut<[f64]>`,
//! which covers `Vec<Vec<f64>>` and `morpho_data::Sample`.

pub mod error;
pub mod method;
pub mod normalize;
pub mod standardize;

pub use error::PreprocessError;
pub use method::Preprocessing;
pub use normalize::{FeatureRange, normalize, normalize_with_workers, normalized};
pub use standardize::{FeatureMoments, standardize, standardized};

/// Checks that `rows` is non-empty and rectangular; returns the feature count.
pub(crate) fn validate_rows<T: AsRef<[f64]>>(rows: &[T]) -> Result<usize, PreprocessError> {
    let first = rows.first().ok_or(PreprocessError::Empty)?;
    let dim = first.as_ref().len();
    if dim == 0 {
        return Err(PreprocessError::EmptyFeatures);
    }
    for (row, r) in rows.iter().enumerate() {
        let got = r.as_ref().len();
        if got != dim {
            return Err(PreprocessError::DimensionMismatch {
                row,
                expected: dim,
                got,
            });
        }
    }
    Ok(dim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rows_shapes() {
        assert_eq!(validate_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]), Ok(2));
        assert_eq!(
            validate_rows::<Vec<f64>>(&[]),
            Err(PreprocessError::Empty)
        );
        assert_eq!(
            validate_rows(&[Vec::<f64>::new()]),
            Err(PreprocessError::EmptyFeatures)
        );
        assert_eq!(
            validate_rows(&[vec![1.0], vec![1.0, 2.0]]),
            Err(PreprocessError::DimensionMismatch {
                row: 1,
                expected: 1,
                got: 2
            })
        );
    }
}
