//! Human-readable run report.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::clustering::{ClusterScores, ClusterSummary};
use crate::confusion::ConfusionMatrix;
use crate::error::EvaluateError;
use crate::metrics::Metrics;

/// Renders the experiment report as plain text.
///
/// The layout is a title and timestamp header, the confusion matrix with
/// `ClassN` row and column headers, one statistics line per class, the
/// micro-averaged overall metrics and, when given, the clustering scores.
pub fn render_report(
    title: &str,
    generated: DateTime<Utc>,
    cm: &ConfusionMatrix,
    clustering: Option<&ClusterScores>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Experiment: {title}");
    let _ = writeln!(out, "Date: {}", generated.format("%Y-%m-%d %H:%M:%S UTC"));

    let _ = writeln!(out, "\nConfusion Matrix:");
    let _ = write!(out, "{:9}", "");
    for class in 1..=cm.class_count() {
        let _ = write!(out, "{:>8}", format!("Class{class}"));
    }
    out.push('\n');
    for (i, row) in cm.rows().enumerate() {
        let _ = write!(out, "{:<9}", format!("Class{}", i + 1));
        for count in row {
            let _ = write!(out, "{count:>8}");
        }
        out.push('\n');
    }

    let report = cm.metrics();
    let _ = writeln!(out, "\nStatistics by Class:");
    for class in &report.per_class {
        let c = &class.counts;
        let _ = writeln!(
            out,
            "Class {}: TP = {}, TN = {}, FP = {}, FN = {}, {}",
            class.class,
            c.true_positives,
            c.true_negatives,
            c.false_positives,
            c.false_negatives,
            metric_line(&class.metrics)
        );
    }

    let _ = writeln!(out, "\nOverall Metrics:");
    let _ = writeln!(out, "{}", metric_line(&report.overall));

    if let Some(scores) = clustering {
        let _ = writeln!(out, "\nClustering:");
        let _ = writeln!(out, "Silhouette = {:.4}", scores.silhouette);
        let _ = writeln!(out, "WCSS = {:.4}", scores.wcss);
        let _ = writeln!(out, "BCSS = {:.4}", scores.bcss);
    }
    out
}

/// Renders the cluster composition section of a k-means report.
///
/// One line per cluster: index, majority label (or `unlabelled`), size,
/// and the member count of every class present.
pub fn render_clusters(clusters: &[ClusterSummary]) -> String {
    let mut out = String::from("\nClusters:\n");
    for cluster in clusters {
        let class = cluster
            .class
            .map_or_else(|| "unlabelled".to_string(), |c| format!("Class{c}"));
        let members = if cluster.members.is_empty() {
            "none".to_string()
        } else {
            cluster
                .members
                .iter()
                .map(|m| format!("Class{} = {}", m.class, m.count))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let _ = writeln!(
            out,
            "Cluster {}: {class}, Size = {}, Members: {members}",
            cluster.index, cluster.size
        );
    }
    out
}

fn metric_line(m: &Metrics) -> String {
    format!(
        "Precision = {:.2}, Recall = {:.2}, Specificity = {:.2}, F1 Score = {:.2}, FPR = {:.2}, Accuracy = {:.2}%",
        m.precision,
        m.recall,
        m.specificity,
        m.f1,
        m.false_positive_rate,
        m.accuracy * 100.0
    )
}

/// Writes a rendered report to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`EvaluateError::Write`] if the file cannot be written.
pub fn write_report(path: &Path, text: &str) -> Result<(), EvaluateError> {
    std::fs::write(path, text).map_err(|source| EvaluateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
