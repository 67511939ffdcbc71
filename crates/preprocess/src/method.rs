//! Selectable preprocessing step.

use std::fmt;
use std::str::FromStr;

use crate::error::PreprocessError;
use crate::normalize::normalize;
use crate::standardize::standardize;

/// Preprocessing applied to the whole dataset before splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preprocessing {
    /// Leave features as read.
    #[default]
    None,
    /// Min-max normalization to `[0, 1]`.
    Normalize,
    /// Z-score standardization.
    Standardize,
}

impl Preprocessing {
    /// Applies the step to `rows` in place.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`normalize`] or [`standardize`]. `None` never fails.
    pub fn apply<T>(self, rows: &mut [T]) -> Result<(), PreprocessError>
    where
        T: AsRef<[f64]> + AsMut<[f64]> + Sync,
    {
        match self {
            Self::None => {}
            Self::Normalize => {
                normalize(rows)?;
            }
            Self::Standardize => {
                standardize(rows)?;
            }
        }
        Ok(())
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Normalize => "normalize",
            Self::Standardize => "standardize",
        }
    }
}

impl FromStr for Preprocessing {
    type Err = PreprocessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "normalize" | "normalization" => Ok(Self::Normalize),
            "standardize" | "standardization" => Ok(Self::Standardize),
            _ => Err(PreprocessError::UnknownMethod { name: s.to_string() }),
        }
    }
}

impl fmt::Display for Preprocessing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("none".parse::<Preprocessing>().unwrap(), Preprocessing::None);
        assert_eq!(
            "Normalize".parse::<Preprocessing>().unwrap(),
            Preprocessing::Normalize
        );
        assert_eq!(
            "standardization".parse::<Preprocessing>().unwrap(),
            Preprocessing::Standardize
        );
        assert!("zscore".parse::<Preprocessing>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for p in [
            Preprocessing::None,
            Preprocessing::Normalize,
            Preprocessing::Standardize,
        ] {
            assert_eq!(p.to_string().parse::<Preprocessing>().unwrap(), p);
        }
    }

    #[test]
    fn none_is_identity() {
        let mut rows = vec![vec![3.0, -1.0], vec![5.0, 2.0]];
        Preprocessing::None.apply(&mut rows).unwrap();
        assert_eq!(rows, vec![vec![3.0, -1.0], vec![5.0, 2.0]]);
    }
}
