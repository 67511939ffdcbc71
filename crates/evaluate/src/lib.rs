//! Evaluation layer: confusion matrices, classification and clustering
//! metrics, single-pass and cross-validated runs, and reporting.

mod clustering;
mod config;
mod confusion;
mod cross_validation;
mod driver;
mod error;
mod metrics;
mod output;
mod report;
mod sweep;

pub use clustering::{
    ClusterScores, ClusterSummary, MemberCount, bcss, global_centroid, silhouette_score,
    summarize_clusters, wcss,
};
pub use config::EvaluateConfig;
pub use confusion::ConfusionMatrix;
pub use cross_validation::{
    CrossValidationSummary, FoldScore, KMeansModel, KnnModel, Model, cross_validate,
};
pub use driver::{
    KMeansOutcome, KnnOutcome, Prediction, classify_split, cluster_split, run_kmeans, run_knn,
};
pub use error::EvaluateError;
pub use metrics::{ClassCounts, ClassMetrics, ClassificationReport, Metrics};
pub use output::{RunSummary, to_json, write_json};
pub use report::{render_clusters, render_report, write_report};
pub use sweep::{SWEEP_CSV_HEADER, SweepPoint, render_sweep_csv, sweep_k, write_sweep_csv};
