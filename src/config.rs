use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::CommonArgs;

/// Classification method of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// k-nearest-neighbour vote.
    #[default]
    Knn,
    /// Majority-labelled k-means clusters.
    #[value(name = "kmeans")]
    KMeans,
}

impl Method {
    /// Lowercase name used in reports and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Knn => "knn",
            Self::KMeans => "kmeans",
        }
    }
}

/// Top-level Morpho configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MorphoConfig {
    /// Run-wide settings.
    #[serde(default)]
    pub run: RunToml,

    /// k-NN settings.
    #[serde(default)]
    pub knn: KnnToml,

    /// k-means settings.
    #[serde(default)]
    pub kmeans: KMeansToml,

    /// Cross-validation settings.
    #[serde(default)]
    pub cross_validation: CrossValidationToml,

    /// Report output settings.
    #[serde(default)]
    pub report: ReportToml,
}

impl MorphoConfig {
    /// Reads `path`, or returns the built-in defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }

    /// Overlays command-line values onto the file values.
    pub fn apply_common(&mut self, args: &CommonArgs) {
        if let Some(method) = args.method {
            self.run.method = method;
        }
        if let Some(seed) = args.seed {
            self.run.seed = Some(seed);
        }
        if let Some(classes) = args.classes {
            self.run.class_count = Some(classes);
        }
        if let Some(ref preprocessing) = args.preprocessing {
            self.run.preprocessing = preprocessing.clone();
        }
        if let Some(k) = args.k {
            self.knn.k = Some(k);
            self.kmeans.k = Some(k);
        }
        if let Some(p) = args.p {
            self.knn.p = p;
            self.kmeans.p = p;
        }
        if let Some(max_iterations) = args.max_iterations {
            self.kmeans.max_iterations = max_iterations;
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    #[serde(default)]
    pub method: Method,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub class_count: Option<usize>,
    #[serde(default = "default_preprocessing")]
    pub preprocessing: String,
    #[serde(default = "default_training_fraction")]
    pub training_fraction: f64,
}

impl Default for RunToml {
    fn default() -> Self {
        Self {
            method: Method::default(),
            seed: None,
            class_count: None,
            preprocessing: default_preprocessing(),
            training_fraction: default_training_fraction(),
        }
    }
}

fn default_preprocessing() -> String {
    "none".to_string()
}
fn default_training_fraction() -> f64 {
    0.8
}
fn default_p() -> f64 {
    2.0
}

/// k-NN settings. An unset `k` falls back to `floor(sqrt(n_train))`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnnToml {
    #[serde(default)]
    pub k: Option<usize>,
    #[serde(default = "default_p")]
    pub p: f64,
}

impl Default for KnnToml {
    fn default() -> Self {
        Self {
            k: None,
            p: default_p(),
        }
    }
}

/// k-means settings. An unset `k` falls back to the class count.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KMeansToml {
    #[serde(default)]
    pub k: Option<usize>,
    #[serde(default = "default_p")]
    pub p: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for KMeansToml {
    fn default() -> Self {
        Self {
            k: None,
            p: default_p(),
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_max_iterations() -> usize {
    morpho_kmeans::DEFAULT_MAX_ITERATIONS
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrossValidationToml {
    #[serde(default = "default_folds")]
    pub folds: usize,
    #[serde(default = "default_true")]
    pub shuffle: bool,
}

impl Default for CrossValidationToml {
    fn default() -> Self {
        Self {
            folds: default_folds(),
            shuffle: true,
        }
    }
}

fn default_folds() -> usize {
    5
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportToml {
    pub title: Option<String>,
    pub path: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: MorphoConfig = toml::from_str("").unwrap();
        assert_eq!(config.run.method, Method::Knn);
        assert_eq!(config.run.training_fraction, 0.8);
        assert_eq!(config.run.preprocessing, "none");
        assert_eq!(config.knn.k, None);
        assert_eq!(config.knn.p, 2.0);
        assert_eq!(config.kmeans.max_iterations, 100);
        assert_eq!(config.cross_validation.folds, 5);
        assert!(config.cross_validation.shuffle);
        assert!(config.report.path.is_none());
    }

    #[test]
    fn test_full_file() {
        let config: MorphoConfig = toml::from_str(
            r#"
            [run]
            method = "kmeans"
            seed = 42
            class_count = 10
            preprocessing = "standardize"
            training_fraction = 0.7

            [knn]
            k = 7
            p = 1.0

            [kmeans]
            k = 10
            max_iterations = 50

            [cross_validation]
            folds = 10
            shuffle = false

            [report]
            title = "E34 run"
            path = "out/report.txt"
            json = "out/run.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.run.method, Method::KMeans);
        assert_eq!(config.run.seed, Some(42));
        assert_eq!(config.run.class_count, Some(10));
        assert_eq!(config.knn.k, Some(7));
        assert_eq!(config.kmeans.p, 2.0);
        assert_eq!(config.kmeans.max_iterations, 50);
        assert_eq!(config.cross_validation.folds, 10);
        assert!(!config.cross_validation.shuffle);
        assert_eq!(config.report.title.as_deref(), Some("E34 run"));
        assert_eq!(config.report.json, Some(PathBuf::from("out/run.json")));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<MorphoConfig, _> = toml::from_str("[knn]\nneighbours = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config: MorphoConfig = toml::from_str("[knn]\nk = 7\np = 1.0\n").unwrap();
        let args = CommonArgs {
            dir: PathBuf::from("data"),
            extension: ".E34".to_string(),
            method: None,
            k: Some(3),
            p: None,
            preprocessing: Some("normalize".to_string()),
            seed: Some(9),
            classes: None,
            max_iterations: None,
        };
        config.apply_common(&args);
        assert_eq!(config.knn.k, Some(3));
        assert_eq!(config.kmeans.k, Some(3));
        assert_eq!(config.knn.p, 1.0);
        assert_eq!(config.run.preprocessing, "normalize");
        assert_eq!(config.run.seed, Some(9));
        assert_eq!(config.run.method, Method::Knn);
    }

    #[test]
    fn test_load_without_path() {
        let config = MorphoConfig::load(None).unwrap();
        assert_eq!(config.cross_validation.folds, 5);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("morpho.toml");
        std::fs::write(&path, "[run]\nseed = 5\n\n[cross_validation]\nfolds = 3\n").unwrap();
        let config = MorphoConfig::load(Some(&path)).unwrap();
        assert_eq!(config.run.seed, Some(5));
        assert_eq!(config.cross_validation.folds, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = MorphoConfig::load(Some(Path::new("/nonexistent/morpho.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }
}
