//! k-fold cross-validation over a pluggable model.

use morpho_data::Sample;
use morpho_kmeans::KMeansConfig;
use morpho_knn::KnnConfig;
use morpho_split::{Split, k_fold};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::confusion::ConfusionMatrix;
use crate::driver::{classify_split, cluster_split};
use crate::error::EvaluateError;

/// Anything that can be trained and scored on one fold.
///
/// Closures `FnMut(&Split<'_, Sample>) -> Result<O, EvaluateError>` are models.
pub trait Model {
    /// Per-fold result.
    type Outcome;

    /// Trains on `split.train()` and evaluates on `split.test()`.
    fn apply(&mut self, split: &Split<'_, Sample>) -> Result<Self::Outcome, EvaluateError>;
}

impl<F, O> Model for F
where
    F: FnMut(&Split<'_, Sample>) -> Result<O, EvaluateError>,
{
    type Outcome = O;

    fn apply(&mut self, split: &Split<'_, Sample>) -> Result<O, EvaluateError> {
        self(split)
    }
}

/// k-NN scored by a per-fold confusion matrix.
#[derive(Debug, Clone)]
pub struct KnnModel {
    config: KnnConfig,
    class_count: usize,
}

impl KnnModel {
    /// Creates a model with a fixed `class_count × class_count` matrix per fold.
    pub fn new(config: KnnConfig, class_count: usize) -> Self {
        Self {
            config,
            class_count,
        }
    }
}

impl Model for KnnModel {
    type Outcome = ConfusionMatrix;

    fn apply(&mut self, split: &Split<'_, Sample>) -> Result<ConfusionMatrix, EvaluateError> {
        classify_split(split, &self.config, self.class_count).map(|o| o.confusion)
    }
}

/// k-means with majority-labelled clusters, scored by a per-fold confusion matrix.
#[derive(Debug, Clone)]
pub struct KMeansModel<R> {
    config: KMeansConfig,
    class_count: usize,
    rng: R,
}

impl<R: Rng> KMeansModel<R> {
    /// Creates a model; `rng` seeds centroid initialization in every fold.
    pub fn new(config: KMeansConfig, class_count: usize, rng: R) -> Self {
        Self {
            config,
            class_count,
            rng,
        }
    }
}

impl<R: Rng> Model for KMeansModel<R> {
    type Outcome = ConfusionMatrix;

    fn apply(&mut self, split: &Split<'_, Sample>) -> Result<ConfusionMatrix, EvaluateError> {
        cluster_split(split, &self.config, self.class_count, &mut self.rng).map(|o| o.confusion)
    }
}

/// Runs `model` on each of the `folds` contiguous folds of `samples`.
///
/// Samples are used in the given order; shuffle beforehand for randomized
/// folds. The trailing `N mod folds` samples are never tested.
///
/// # Errors
///
/// Returns [`EvaluateError::Split`] unless `2 <= folds <= N`, or the first
/// error returned by the model.
#[tracing::instrument(skip_all, fields(n = samples.len(), folds = folds))]
pub fn cross_validate<M: Model>(
    samples: &[Sample],
    folds: usize,
    model: &mut M,
) -> Result<Vec<M::Outcome>, EvaluateError> {
    let splits = k_fold(samples, folds)?;
    debug!(fold_size = splits.fold_size(), untested = splits.remainder(), "folds built");

    let mut outcomes = Vec::with_capacity(splits.len());
    for (fold, split) in splits.enumerate() {
        debug!(fold, n_train = split.train().len(), n_test = split.test().len(), "fold");
        outcomes.push(model.apply(&split)?);
    }
    Ok(outcomes)
}

/// Headline metrics of one fold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoldScore {
    /// 0-based fold index.
    pub fold: usize,
    /// Predictions recorded in this fold.
    pub n_test: u64,
    /// Overall accuracy.
    pub accuracy: f64,
    /// Overall precision.
    pub precision: f64,
    /// Overall recall.
    pub recall: f64,
    /// Overall F1.
    pub f1: f64,
}

/// Per-fold scores, their means, and the pooled confusion matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossValidationSummary {
    /// One entry per fold.
    pub folds: Vec<FoldScore>,
    /// Mean accuracy over folds.
    pub mean_accuracy: f64,
    /// Mean precision over folds.
    pub mean_precision: f64,
    /// Mean recall over folds.
    pub mean_recall: f64,
    /// Mean F1 over folds.
    pub mean_f1: f64,
    /// Cell-wise sum of all fold matrices.
    pub pooled: ConfusionMatrix,
}

impl CrossValidationSummary {
    /// Summarizes per-fold confusion matrices.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::InvalidConfig`] for an empty slice and
    /// [`EvaluateError::ClassCountMismatch`] for matrices of different sizes.
    pub fn from_matrices(matrices: &[ConfusionMatrix]) -> Result<Self, EvaluateError> {
        let first = matrices.first().ok_or_else(|| EvaluateError::InvalidConfig {
            reason: "no folds to summarize".to_string(),
        })?;
        let mut pooled = ConfusionMatrix::new(first.class_count())?;

        let mut folds = Vec::with_capacity(matrices.len());
        for (fold, cm) in matrices.iter().enumerate() {
            pooled.merge(cm)?;
            let overall = cm.metrics().overall;
            folds.push(FoldScore {
                fold,
                n_test: cm.total(),
                accuracy: overall.accuracy,
                precision: overall.precision,
                recall: overall.recall,
                f1: overall.f1,
            });
        }

        let n = folds.len() as f64;
        let mean = |f: fn(&FoldScore) -> f64| folds.iter().map(f).sum::<f64>() / n;
        let summary = Self {
            mean_accuracy: mean(|s| s.accuracy),
            mean_precision: mean(|s| s.precision),
            mean_recall: mean(|s| s.recall),
            mean_f1: mean(|s| s.f1),
            folds,
            pooled,
        };
        info!(
            folds = summary.folds.len(),
            mean_accuracy = summary.mean_accuracy,
            mean_f1 = summary.mean_f1,
            "cross-validation summary"
        );
        Ok(summary)
    }
}
