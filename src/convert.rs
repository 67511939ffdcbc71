//! Pure conversion functions: TOML config structs -> crate API config types.

use std::ops::RangeInclusive;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;

use morpho_evaluate::EvaluateConfig;
use morpho_io::FeatureKind;
use morpho_kmeans::KMeansConfig;
use morpho_knn::{KnnConfig, k_heuristic};
use morpho_preprocess::Preprocessing;

use crate::config::{CrossValidationToml, KMeansToml, KnnToml, RunToml};

/// Parses a feature file extension such as `.E34` or `GFD`.
pub fn parse_feature_kind(s: &str) -> Result<FeatureKind> {
    s.parse()
        .with_context(|| format!("unsupported feature extension: {s:?}"))
}

/// Parses a preprocessing name (`none`, `normalize`, `standardize`).
pub fn parse_preprocessing(s: &str) -> Result<Preprocessing> {
    s.parse()
        .with_context(|| format!("unknown preprocessing: {s:?}"))
}

/// Parses an inclusive k range written `MIN-MAX`, or a single `K`.
pub fn parse_k_range(s: &str) -> Result<RangeInclusive<usize>> {
    let parse = |v: &str| -> Result<usize> {
        v.trim()
            .parse()
            .with_context(|| format!("invalid k in range {s:?}: {v:?}"))
    };
    let (min, max) = match s.split_once('-') {
        Some((lo, hi)) => (parse(lo)?, parse(hi)?),
        None => {
            let k = parse(s)?;
            (k, k)
        }
    };
    if min == 0 || min > max {
        bail!("k range must satisfy 1 <= MIN <= MAX, got {s:?}");
    }
    Ok(min..=max)
}

/// Builds a [`KnnConfig`]; an unset `k` becomes `floor(sqrt(n_train))`.
pub fn build_knn_config(knn: &KnnToml, n_train: usize) -> Result<KnnConfig> {
    let k = knn.k.unwrap_or_else(|| k_heuristic(n_train));
    let cfg = KnnConfig::new(k).with_p(knn.p);
    cfg.validate().context("invalid [knn] settings")?;
    Ok(cfg)
}

/// Builds a [`KMeansConfig`]; an unset `k` becomes the class count.
pub fn build_kmeans_config(kmeans: &KMeansToml, class_count: usize) -> Result<KMeansConfig> {
    let cfg = KMeansConfig::new(kmeans.k.unwrap_or(class_count))
        .with_p(kmeans.p)
        .with_max_iterations(kmeans.max_iterations);
    cfg.validate().context("invalid [kmeans] settings")?;
    Ok(cfg)
}

/// Builds the [`EvaluateConfig`] of a single-pass run from `[run]`.
pub fn build_evaluate_config(run: &RunToml) -> Result<EvaluateConfig> {
    let cfg = EvaluateConfig::default()
        .with_training_fraction(run.training_fraction)
        .with_class_count(run.class_count);
    cfg.validate().context("invalid [run] settings")?;
    Ok(cfg)
}

/// Builds the [`EvaluateConfig`] of a cross-validation run from `[run]`
/// and `[cross_validation]`.
pub fn build_cross_validation_config(
    run: &RunToml,
    cv: &CrossValidationToml,
) -> Result<EvaluateConfig> {
    let cfg = EvaluateConfig::default()
        .with_training_fraction(run.training_fraction)
        .with_class_count(run.class_count)
        .with_folds(cv.folds)
        .with_shuffle_folds(cv.shuffle);
    cfg.validate_cross_validation()
        .context("invalid [run] or [cross_validation] settings")?;
    Ok(cfg)
}

/// Seeded RNG, or one seeded from the OS when no seed is configured.
pub fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_parse_feature_kind() {
        assert_eq!(parse_feature_kind(".E34").unwrap(), FeatureKind::E34);
        assert_eq!(parse_feature_kind("GFD").unwrap(), FeatureKind::Gfd);
        let err = parse_feature_kind(".png").unwrap_err();
        assert!(format!("{err:#}").contains("unsupported feature extension"));
    }

    #[test]
    fn test_parse_preprocessing() {
        assert_eq!(parse_preprocessing("none").unwrap(), Preprocessing::None);
        assert_eq!(
            parse_preprocessing("Standardize").unwrap(),
            Preprocessing::Standardize
        );
        assert!(parse_preprocessing("whiten").is_err());
    }

    #[test]
    fn test_parse_k_range() {
        assert_eq!(parse_k_range("2-10").unwrap(), 2..=10);
        assert_eq!(parse_k_range(" 3 - 3 ").unwrap(), 3..=3);
        assert_eq!(parse_k_range("4").unwrap(), 4..=4);
        assert!(parse_k_range("0-3").is_err());
        assert!(parse_k_range("5-2").is_err());
        assert!(parse_k_range("a-b").is_err());
        assert!(parse_k_range("").is_err());
    }

    #[test]
    fn test_knn_k_heuristic_when_unset() {
        let cfg = build_knn_config(&KnnToml::default(), 50).unwrap();
        assert_eq!(cfg.k(), 7);
        assert_eq!(cfg.p(), 2.0);

        let toml = KnnToml {
            k: Some(3),
            p: 1.0,
        };
        let cfg = build_knn_config(&toml, 50).unwrap();
        assert_eq!(cfg.k(), 3);
        assert_eq!(cfg.p(), 1.0);
    }

    #[test]
    fn test_knn_invalid_p() {
        let toml = KnnToml {
            k: Some(3),
            p: 0.0,
        };
        assert!(build_knn_config(&toml, 10).is_err());
    }

    #[test]
    fn test_kmeans_k_defaults_to_class_count() {
        let cfg = build_kmeans_config(&KMeansToml::default(), 4).unwrap();
        assert_eq!(cfg.k(), 4);
        assert_eq!(cfg.max_iterations(), 100);
    }

    #[test]
    fn test_evaluate_config_validation() {
        let cfg = build_evaluate_config(&RunToml::default()).unwrap();
        assert_eq!(cfg.training_fraction(), 0.8);

        let bad = RunToml {
            training_fraction: 1.5,
            ..RunToml::default()
        };
        assert!(build_evaluate_config(&bad).is_err());
        assert!(build_cross_validation_config(&bad, &CrossValidationToml::default()).is_err());
    }

    #[test]
    fn test_single_fold_only_rejected_for_cross_validation() {
        let cv = CrossValidationToml {
            folds: 1,
            shuffle: true,
        };
        let run = RunToml::default();
        assert!(build_evaluate_config(&run).is_ok());
        let err = build_cross_validation_config(&run, &cv).unwrap_err();
        assert!(format!("{err:#}").contains("folds must be >= 2"));

        let cfg = build_cross_validation_config(&run, &CrossValidationToml::default()).unwrap();
        assert_eq!(cfg.folds(), 5);
        assert!(cfg.shuffle_folds());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a: u64 = build_rng(Some(3)).random();
        let b: u64 = build_rng(Some(3)).random();
        assert_eq!(a, b);
    }
}
