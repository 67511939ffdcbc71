//! Clustering scores across a range of k.

use std::fmt::Write as _;
use std::ops::RangeInclusive;
use std::path::Path;

use morpho_kmeans::{KMeansConfig, kmeans};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::clustering::ClusterScores;
use crate::error::EvaluateError;

/// Header of the sweep table.
pub const SWEEP_CSV_HEADER: &str = "k,Silhouette Score,WCSS,BCSS";

/// Scores of one k in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Cluster count.
    pub k: usize,
    /// Mean silhouette.
    pub silhouette: f64,
    /// Within-cluster sum of squares.
    pub wcss: f64,
    /// Between-cluster sum of squares.
    pub bcss: f64,
    /// Iterations the k-means run took.
    pub iterations: usize,
}

/// Clusters `rows` once per k in `ks` and scores each clustering.
///
/// `base` supplies p and the iteration cap; its own k is ignored. The runs
/// share `rng`, so a fixed seed fixes the whole table.
///
/// # Errors
///
/// Returns [`EvaluateError::InvalidConfig`] for an empty range and
/// [`EvaluateError::KMeans`] when any k is invalid for `rows`.
#[tracing::instrument(skip_all, fields(n = rows.len(), from = ks.start(), to = ks.end()))]
pub fn sweep_k<A: AsRef<[f64]>>(
    rows: &[A],
    ks: RangeInclusive<usize>,
    base: &KMeansConfig,
    rng: &mut impl Rng,
) -> Result<Vec<SweepPoint>, EvaluateError> {
    if ks.is_empty() {
        return Err(EvaluateError::InvalidConfig {
            reason: format!("empty k range {}..={}", ks.start(), ks.end()),
        });
    }

    let mut points = Vec::with_capacity(ks.end() - ks.start() + 1);
    for k in ks {
        let config = KMeansConfig::new(k)
            .with_p(base.p())
            .with_max_iterations(base.max_iterations());
        let clustering = kmeans(rows, &config, rng)?;
        let scores = ClusterScores::compute(rows, clustering.clusters());
        debug!(k, iterations = clustering.iterations(), wcss = scores.wcss, "swept");
        points.push(SweepPoint {
            k,
            silhouette: scores.silhouette,
            wcss: scores.wcss,
            bcss: scores.bcss,
            iterations: clustering.iterations(),
        });
    }

    if let Some(best) = points.iter().max_by(|a, b| a.silhouette.total_cmp(&b.silhouette)) {
        info!(best_k = best.k, silhouette = best.silhouette, "k sweep finished");
    }
    Ok(points)
}

/// Renders the sweep as CSV under [`SWEEP_CSV_HEADER`].
pub fn render_sweep_csv(points: &[SweepPoint]) -> String {
    let mut out = String::from(SWEEP_CSV_HEADER);
    out.push('\n');
    for p in points {
        let _ = writeln!(out, "{},{:.6},{:.6},{:.6}", p.k, p.silhouette, p.wcss, p.bcss);
    }
    out
}

/// Writes the sweep CSV to `path`.
///
/// # Errors
///
/// Returns [`EvaluateError::Write`] if the file cannot be written.
pub fn write_sweep_csv(path: &Path, points: &[SweepPoint]) -> Result<(), EvaluateError> {
    std::fs::write(path, render_sweep_csv(points)).map_err(|source| EvaluateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
