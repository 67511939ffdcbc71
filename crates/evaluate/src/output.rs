//! JSON output structures for run results.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::clustering::{ClusterScores, ClusterSummary};
use crate::confusion::ConfusionMatrix;
use crate::driver::{KMeansOutcome, KnnOutcome, Prediction};
use crate::error::EvaluateError;
use crate::metrics::ClassificationReport;

/// Machine-readable summary of a single-pass run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Experiment title.
    pub title: String,
    /// RFC 3339 timestamp of the run.
    pub generated: String,
    /// `"knn"` or `"kmeans"`.
    pub method: String,
    /// Confusion-matrix width.
    pub class_count: usize,
    /// Training-set size.
    pub n_train: usize,
    /// Test-set size.
    pub n_test: usize,
    /// Confusion matrix rows, actual class major.
    pub confusion: Vec<Vec<u64>>,
    /// Per-class and overall metrics.
    pub report: ClassificationReport,
    /// Clustering scores, k-means runs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clustering: Option<ClusterScores>,
    /// Label, size and per-class members of each cluster, k-means runs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clusters: Option<Vec<ClusterSummary>>,
    /// k-means iterations performed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    /// Whether k-means converged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converged: Option<bool>,
    /// Test predictions in split order.
    pub predictions: Vec<Prediction>,
}

impl RunSummary {
    fn base(
        title: &str,
        generated: DateTime<Utc>,
        method: &str,
        n_train: usize,
        confusion: &ConfusionMatrix,
        predictions: &[Prediction],
    ) -> Self {
        Self {
            title: title.to_string(),
            generated: generated.to_rfc3339_opts(SecondsFormat::Secs, true),
            method: method.to_string(),
            class_count: confusion.class_count(),
            n_train,
            n_test: predictions.len(),
            confusion: confusion.rows().map(<[u64]>::to_vec).collect(),
            report: confusion.metrics(),
            clustering: None,
            clusters: None,
            iterations: None,
            converged: None,
            predictions: predictions.to_vec(),
        }
    }

    /// Summarizes a k-NN run.
    pub fn from_knn(title: &str, generated: DateTime<Utc>, outcome: &KnnOutcome) -> Self {
        Self::base(
            title,
            generated,
            "knn",
            outcome.n_train,
            &outcome.confusion,
            &outcome.predictions,
        )
    }

    /// Summarizes a k-means run.
    pub fn from_kmeans(title: &str, generated: DateTime<Utc>, outcome: &KMeansOutcome) -> Self {
        let mut summary = Self::base(
            title,
            generated,
            "kmeans",
            outcome.clustering.n_samples(),
            &outcome.confusion,
            &outcome.predictions,
        );
        summary.clustering = Some(outcome.scores);
        summary.clusters = Some(outcome.clusters.clone());
        summary.iterations = Some(outcome.clustering.iterations());
        summary.converged = Some(outcome.clustering.converged());
        summary
    }
}

/// Serialize a value to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns [`EvaluateError::Serialization`] if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, EvaluateError> {
    serde_json::to_string_pretty(value).map_err(|e| EvaluateError::Serialization {
        reason: e.to_string(),
    })
}

/// Serialize a value as pretty JSON into `path`.
///
/// # Errors
///
/// Returns [`EvaluateError::Serialization`] or [`EvaluateError::Write`].
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), EvaluateError> {
    let json = to_json(value)?;
    std::fs::write(path, json).map_err(|source| EvaluateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
