//! Clusters and the result of a k-means run.

use std::collections::BTreeMap;

use morpho_knn::minkowski_unchecked;
use tracing::debug;

use crate::error::KMeansError;

/// One cluster: its centroid, the indices of its members in the training
/// sequence, and an optional class label.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub(crate) centroid: Vec<f64>,
    pub(crate) members: Vec<usize>,
    pub(crate) class: Option<u32>,
}

impl Cluster {
    pub(crate) fn new(centroid: Vec<f64>) -> Self {
        Self {
            centroid,
            members: Vec::new(),
            class: None,
        }
    }

    /// Centroid coordinates.
    pub fn centroid(&self) -> &[f64] {
        &self.centroid
    }

    /// Training indices assigned to this cluster in the final iteration.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// `true` if no training sample was assigned here.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Class label set by [`Clustering::assign_majority_labels`].
    pub fn class(&self) -> Option<u32> {
        self.class
    }
}

/// Output of [`kmeans`](crate::kmeans): exactly k clusters whose member
/// lists partition the training indices.
#[derive(Debug, Clone)]
pub struct Clustering {
    pub(crate) clusters: Vec<Cluster>,
    pub(crate) p: f64,
    pub(crate) n_samples: usize,
    pub(crate) iterations: usize,
    pub(crate) converged: bool,
    pub(crate) wcss_history: Vec<f64>,
}

impl Clustering {
    /// The clusters, in centroid-initialization order.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.clusters.len()
    }

    /// Number of training samples that were clustered.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Minkowski exponent used for assignment and [`predict`](Self::predict).
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Assign/update iterations performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// `true` if the run stopped because centroids settled rather than
    /// hitting the iteration cap.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Within-cluster sum of squares after each update step.
    pub fn wcss_history(&self) -> &[f64] {
        &self.wcss_history
    }

    /// Within-cluster sum of squares of the final clustering.
    pub fn wcss(&self) -> f64 {
        self.wcss_history.last().copied().unwrap_or(0.0)
    }

    /// Cluster index of every training sample.
    pub fn assignments(&self) -> Vec<usize> {
        let mut out = vec![0; self.n_samples];
        for (c, cluster) in self.clusters.iter().enumerate() {
            for &i in &cluster.members {
                out[i] = c;
            }
        }
        out
    }

    /// Labels each cluster with the most frequent class among its members.
    ///
    /// `labels[i]` is the class of training sample i. Equal counts go to the
    /// smaller label; empty clusters stay unlabelled.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::LabelCountMismatch`] if `labels` does not cover
    /// the training set.
    pub fn assign_majority_labels(&mut self, labels: &[u32]) -> Result<(), KMeansError> {
        if labels.len() != self.n_samples {
            return Err(KMeansError::LabelCountMismatch {
                labels: labels.len(),
                n: self.n_samples,
            });
        }
        for (c, cluster) in self.clusters.iter_mut().enumerate() {
            let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
            for &i in &cluster.members {
                *counts.entry(labels[i]).or_default() += 1;
            }
            let mut best: Option<(u32, usize)> = None;
            for (label, count) in counts {
                if best.is_none_or(|(_, n)| count > n) {
                    best = Some((label, count));
                }
            }
            cluster.class = best.map(|(label, _)| label);
            debug!(cluster = c, size = cluster.members.len(), class = ?cluster.class, "labelled");
        }
        Ok(())
    }

    /// Index of the centroid nearest to `point` (smallest index on ties).
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::DimensionMismatch`] if `point` has the wrong length.
    pub fn predict(&self, point: &[f64]) -> Result<usize, KMeansError> {
        let expected = self.clusters.first().map_or(0, |c| c.centroid.len());
        if point.len() != expected {
            return Err(KMeansError::DimensionMismatch {
                row: 0,
                expected,
                got: point.len(),
            });
        }
        Ok(nearest_centroid(&self.clusters, point, self.p))
    }

    /// Class label of the centroid nearest to `point`.
    ///
    /// `None` when that cluster has no label.
    ///
    /// # Errors
    ///
    /// Same as [`predict`](Self::predict).
    pub fn predict_class(&self, point: &[f64]) -> Result<Option<u32>, KMeansError> {
        let c = self.predict(point)?;
        Ok(self.clusters[c].class)
    }
}

/// Argmin over centroids with strict `<`, so the first minimum wins.
pub(crate) fn nearest_centroid(clusters: &[Cluster], point: &[f64], p: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, cluster) in clusters.iter().enumerate() {
        let d = minkowski_unchecked(&cluster.centroid, point, p);
        if d < best_dist {
            best_dist = d;
            best = c;
        }
    }
    best
}
