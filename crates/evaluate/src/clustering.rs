//! Clustering quality scores (silhouette, WCSS, BCSS) and cluster composition.
//!
//! All scores use the Euclidean distance regardless of the exponent the
//! clustering was built with. Cluster members are indices into `rows`.

use std::collections::BTreeMap;

use morpho_kmeans::Cluster;
use morpho_knn::{minkowski_unchecked, squared_euclidean};
use morpho_stats::column_means;
use serde::Serialize;

/// Silhouette, WCSS and BCSS of one clustering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClusterScores {
    /// Mean silhouette over scored points.
    pub silhouette: f64,
    /// Within-cluster sum of squares.
    pub wcss: f64,
    /// Between-cluster sum of squares, normalized by N.
    pub bcss: f64,
}

impl ClusterScores {
    /// Computes all three scores.
    pub fn compute<A: AsRef<[f64]>>(rows: &[A], clusters: &[Cluster]) -> Self {
        Self {
            silhouette: silhouette_score(rows, clusters),
            wcss: wcss(rows, clusters),
            bcss: bcss(rows, clusters),
        }
    }
}

/// Number of members of one class inside a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemberCount {
    /// Class label.
    pub class: u32,
    /// Members carrying that label.
    pub count: usize,
}

/// Composition of one cluster: its label, size and members per class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterSummary {
    /// Cluster index, as returned by nearest-centroid prediction.
    pub index: usize,
    /// Majority label; `None` for an unlabelled cluster.
    pub class: Option<u32>,
    /// Number of members.
    pub size: usize,
    /// Members per class, in ascending class order.
    pub members: Vec<MemberCount>,
}

/// Summarizes each cluster's members by their class in `labels`.
///
/// `labels[i]` is the class of row `i`; members without a label are left
/// out of the per-class counts but still counted in `size`.
pub fn summarize_clusters(clusters: &[Cluster], labels: &[u32]) -> Vec<ClusterSummary> {
    clusters
        .iter()
        .enumerate()
        .map(|(index, cluster)| {
            let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
            for class in cluster.members().iter().filter_map(|&i| labels.get(i)) {
                *counts.entry(*class).or_default() += 1;
            }
            ClusterSummary {
                index,
                class: cluster.class(),
                size: cluster.len(),
                members: counts
                    .into_iter()
                    .map(|(class, count)| MemberCount { class, count })
                    .collect(),
            }
        })
        .collect()
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    minkowski_unchecked(a, b, 2.0)
}

/// Mean Euclidean distance from `point` to the rows in `members`, skipping `skip`.
fn mean_distance<A: AsRef<[f64]>>(
    rows: &[A],
    point: &[f64],
    members: &[usize],
    skip: Option<usize>,
) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for &j in members {
        if Some(j) == skip {
            continue;
        }
        sum += euclidean(point, rows[j].as_ref());
        n += 1;
    }
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Mean silhouette coefficient.
///
/// For a point x in cluster c with `|c| > 1`, `a` is its mean distance to
/// the other members of c and `b` the smallest mean distance to the
/// members of any other non-empty cluster; `s = (b − a) / max(a, b)`, or 0
/// when both are 0. Points in singleton clusters, and points with no other
/// non-empty cluster to compare against, are not scored. Returns 0 when no
/// point is scored.
pub fn silhouette_score<A: AsRef<[f64]>>(rows: &[A], clusters: &[Cluster]) -> f64 {
    let mut total = 0.0;
    let mut scored = 0usize;

    for (c, cluster) in clusters.iter().enumerate() {
        if cluster.len() < 2 {
            continue;
        }
        for &i in cluster.members() {
            let point = rows[i].as_ref();
            let a = mean_distance(rows, point, cluster.members(), Some(i));
            let b = clusters
                .iter()
                .enumerate()
                .filter(|(other, o)| *other != c && !o.is_empty())
                .map(|(_, o)| mean_distance(rows, point, o.members(), None))
                .min_by(f64::total_cmp);
            let Some(b) = b else {
                continue;
            };
            let denom = a.max(b);
            total += if denom == 0.0 { 0.0 } else { (b - a) / denom };
            scored += 1;
        }
    }

    if scored == 0 { 0.0 } else { total / scored as f64 }
}

/// Within-cluster sum of squares: `Σ_c Σ_{x∈c} ‖centroid_c − x‖²`.
pub fn wcss<A: AsRef<[f64]>>(rows: &[A], clusters: &[Cluster]) -> f64 {
    clusters
        .iter()
        .flat_map(|c| {
            c.members()
                .iter()
                .map(move |&i| squared_euclidean(c.centroid(), rows[i].as_ref()))
        })
        .sum()
}

/// Coordinate-wise mean of all rows. Empty input gives an empty vector.
pub fn global_centroid<A: AsRef<[f64]>>(rows: &[A]) -> Vec<f64> {
    let dim = rows.first().map_or(0, |r| r.as_ref().len());
    column_means(rows, dim)
}

/// Between-cluster sum of squares: `(1/N) Σ_c |c| · ‖g − centroid_c‖²`,
/// with g the [`global_centroid`] of `rows`.
pub fn bcss<A: AsRef<[f64]>>(rows: &[A], clusters: &[Cluster]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let g = global_centroid(rows);
    let sum: f64 = clusters
        .iter()
        .map(|c| c.len() as f64 * squared_euclidean(&g, c.centroid()))
        .sum();
    sum / rows.len() as f64
}
