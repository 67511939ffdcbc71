//! Single-pass evaluation: split, fit, predict, tally.

use morpho_data::{Dataset, Sample};
use morpho_kmeans::{Clustering, KMeansConfig, kmeans};
use morpho_knn::{KnnConfig, KnnScratch, knn_classify_with_scratch, precompute_distances};
use morpho_split::{Split, shuffle_split};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::clustering::{ClusterScores, ClusterSummary, summarize_clusters};
use crate::config::EvaluateConfig;
use crate::confusion::ConfusionMatrix;
use crate::error::EvaluateError;

/// One test-sample prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prediction {
    /// Sample id from the file name.
    pub sample_id: u32,
    /// True class.
    pub actual: u32,
    /// Predicted class; `None` when the model could not decide.
    pub predicted: Option<u32>,
}

/// Records `prediction` into `confusion`, returning whether it was counted.
fn record(confusion: &mut ConfusionMatrix, prediction: &Prediction) -> bool {
    let counted = prediction
        .predicted
        .is_some_and(|p| confusion.update(prediction.actual, p));
    if !counted {
        debug!(
            sample_id = prediction.sample_id,
            actual = prediction.actual,
            predicted = ?prediction.predicted,
            "prediction outside confusion matrix, dropped"
        );
    }
    counted
}

/// Result of a k-NN pass over one split.
#[derive(Debug, Clone)]
pub struct KnnOutcome {
    /// Predictions in test order.
    pub predictions: Vec<Prediction>,
    /// Tally of the predictions.
    pub confusion: ConfusionMatrix,
    /// Training-set size.
    pub n_train: usize,
}

/// Result of a k-means pass over one split.
#[derive(Debug, Clone)]
pub struct KMeansOutcome {
    /// Clusters fitted on the training side, labelled by majority class.
    pub clustering: Clustering,
    /// Silhouette, WCSS and BCSS of the training clusters.
    pub scores: ClusterScores,
    /// Label, size and per-class members of each training cluster.
    pub clusters: Vec<ClusterSummary>,
    /// Nearest-centroid predictions in test order.
    pub predictions: Vec<Prediction>,
    /// Tally of the predictions.
    pub confusion: ConfusionMatrix,
}

/// Classifies every test sample of `split` by k-NN against its training side.
///
/// # Errors
///
/// Returns [`EvaluateError`] for an invalid k-NN config, a zero class
/// count, or a distance computation failure.
pub fn classify_split(
    split: &Split<'_, Sample>,
    knn: &KnnConfig,
    class_count: usize,
) -> Result<KnnOutcome, EvaluateError> {
    let train = split.train();
    let test = split.test();
    knn.validate_for(train.len())?;
    let mut confusion = ConfusionMatrix::new(class_count)?;

    let labels: Vec<u32> = train.iter().map(|s| s.class()).collect();
    let distances = precompute_distances(train, test, knn.p())?;
    let mut scratch = KnnScratch::new(train.len());

    let mut predictions = Vec::with_capacity(test.len());
    for (i, sample) in test.iter().enumerate() {
        let predicted = knn_classify_with_scratch(&distances, i, &labels, knn.k(), &mut scratch)?;
        let prediction = Prediction {
            sample_id: sample.sample_id(),
            actual: sample.class(),
            predicted: Some(predicted),
        };
        trace!(
            i,
            sample_id = prediction.sample_id,
            actual = prediction.actual,
            predicted,
            "classified"
        );
        record(&mut confusion, &prediction);
        predictions.push(prediction);
    }

    Ok(KnnOutcome {
        predictions,
        confusion,
        n_train: train.len(),
    })
}

/// Clusters the training side of `split`, labels clusters by majority
/// class, and predicts each test sample from its nearest centroid.
///
/// # Errors
///
/// Returns [`EvaluateError`] for an invalid k-means config or a zero class count.
pub fn cluster_split(
    split: &Split<'_, Sample>,
    config: &KMeansConfig,
    class_count: usize,
    rng: &mut impl Rng,
) -> Result<KMeansOutcome, EvaluateError> {
    let train = split.train();
    let mut confusion = ConfusionMatrix::new(class_count)?;

    let mut clustering = kmeans(train, config, rng)?;
    let labels: Vec<u32> = train.iter().map(|s| s.class()).collect();
    clustering.assign_majority_labels(&labels)?;
    let scores = ClusterScores::compute(train, clustering.clusters());
    let clusters = summarize_clusters(clustering.clusters(), &labels);

    let mut predictions = Vec::with_capacity(split.test().len());
    for sample in split.test() {
        let prediction = Prediction {
            sample_id: sample.sample_id(),
            actual: sample.class(),
            predicted: clustering.predict_class(sample.features())?,
        };
        record(&mut confusion, &prediction);
        predictions.push(prediction);
    }

    Ok(KMeansOutcome {
        clustering,
        scores,
        clusters,
        predictions,
        confusion,
    })
}

/// Shuffle-splits `dataset` and runs [`classify_split`].
///
/// The confusion matrix is `config.class_count()` wide, or as wide as the
/// largest observed label when unset.
///
/// # Errors
///
/// Returns [`EvaluateError`] for an invalid configuration or any failure
/// in splitting or classification.
#[tracing::instrument(skip_all, fields(n = dataset.len(), k = knn.k(), p = knn.p()))]
pub fn run_knn(
    dataset: &Dataset,
    config: &EvaluateConfig,
    knn: &KnnConfig,
    rng: &mut impl Rng,
) -> Result<KnnOutcome, EvaluateError> {
    config.validate()?;
    let split = shuffle_split(dataset.samples(), config.training_fraction(), rng)?;
    let class_count = config.resolve_class_count(dataset.class_count());

    let outcome = classify_split(&split, knn, class_count)?;
    info!(
        n_train = outcome.n_train,
        n_test = outcome.predictions.len(),
        correct = outcome.confusion.trace(),
        "k-NN run finished"
    );
    Ok(outcome)
}

/// Shuffle-splits `dataset` and runs [`cluster_split`].
///
/// # Errors
///
/// Returns [`EvaluateError`] for an invalid configuration or any failure
/// in splitting or clustering.
#[tracing::instrument(skip_all, fields(n = dataset.len(), k = kmeans_config.k(), p = kmeans_config.p()))]
pub fn run_kmeans(
    dataset: &Dataset,
    config: &EvaluateConfig,
    kmeans_config: &KMeansConfig,
    rng: &mut impl Rng,
) -> Result<KMeansOutcome, EvaluateError> {
    config.validate()?;
    let split = shuffle_split(dataset.samples(), config.training_fraction(), rng)?;
    let class_count = config.resolve_class_count(dataset.class_count());

    let outcome = cluster_split(&split, kmeans_config, class_count, rng)?;
    info!(
        iterations = outcome.clustering.iterations(),
        converged = outcome.clustering.converged(),
        silhouette = outcome.scores.silhouette,
        wcss = outcome.scores.wcss,
        bcss = outcome.scores.bcss,
        "k-means run finished"
    );
    Ok(outcome)
}
