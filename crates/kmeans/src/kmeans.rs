//! Lloyd's k-means: random distinct-point init, assign, update, converge.

use std::collections::HashSet;

use morpho_knn::{minkowski_unchecked, squared_euclidean};
use morpho_stats::column_means;
use rand::Rng;
use tracing::{debug, info};

use crate::cluster::{Cluster, Clustering, nearest_centroid};
use crate::config::{CONVERGENCE_THRESHOLD, KMeansConfig};
use crate::error::KMeansError;

/// Checks that `train` is non-empty and rectangular; returns the dimension.
fn validate_rows<A: AsRef<[f64]>>(train: &[A]) -> Result<usize, KMeansError> {
    let first = train.first().ok_or(KMeansError::EmptyTrainingSet)?;
    let dim = first.as_ref().len();
    if dim == 0 {
        return Err(KMeansError::EmptyFeatures);
    }
    for (row, r) in train.iter().enumerate() {
        let got = r.as_ref().len();
        if got != dim {
            return Err(KMeansError::DimensionMismatch {
                row,
                expected: dim,
                got,
            });
        }
    }
    Ok(dim)
}

/// Picks `k` distinct indices uniformly from `0..n` by rejection sampling
/// and copies those rows as initial centroids.
pub(crate) fn init_centroids<A: AsRef<[f64]>>(
    train: &[A],
    k: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Cluster>, KMeansError> {
    let mut clusters = Vec::new();
    clusters
        .try_reserve_exact(k)
        .map_err(|_| KMeansError::AllocationFailed { elements: k })?;

    let mut seen = HashSet::with_capacity(k);
    while clusters.len() < k {
        let idx = rng.random_range(0..train.len());
        if seen.insert(idx) {
            clusters.push(Cluster::new(train[idx].as_ref().to_vec()));
        }
    }
    Ok(clusters)
}

/// Rebuilds every member list from scratch by nearest centroid.
pub(crate) fn assign_points<A: AsRef<[f64]>>(clusters: &mut [Cluster], train: &[A], p: f64) {
    for cluster in clusters.iter_mut() {
        cluster.members.clear();
    }
    for (i, row) in train.iter().enumerate() {
        let c = nearest_centroid(clusters, row.as_ref(), p);
        clusters[c].members.push(i);
    }
}

/// Moves each non-empty cluster's centroid to the mean of its members and
/// returns the largest Euclidean shift. Empty clusters keep their centroid.
pub(crate) fn update_centroids<A: AsRef<[f64]>>(
    clusters: &mut [Cluster],
    train: &[A],
    dim: usize,
) -> f64 {
    let mut max_shift: f64 = 0.0;
    for cluster in clusters.iter_mut().filter(|c| !c.members.is_empty()) {
        let rows: Vec<&[f64]> = cluster.members.iter().map(|&i| train[i].as_ref()).collect();
        let mean = column_means(&rows, dim);
        let shift = minkowski_unchecked(&mean, &cluster.centroid, 2.0);
        max_shift = max_shift.max(shift);
        cluster.centroid = mean;
    }
    max_shift
}

/// Within-cluster sum of squared Euclidean distances to the centroids.
pub(crate) fn within_sum_of_squares<A: AsRef<[f64]>>(clusters: &[Cluster], train: &[A]) -> f64 {
    clusters
        .iter()
        .flat_map(|c| {
            c.members
                .iter()
                .map(move |&i| squared_euclidean(&c.centroid, train[i].as_ref()))
        })
        .sum()
}

/// Clusters `train` into `config.k()` groups.
///
/// 1. **Init:** `k` distinct training rows, chosen with `rng`, become the
///    initial centroids.
/// 2. **Assign:** every row joins the cluster whose centroid is nearest
///    under Minkowski-`p`; ties go to the smaller cluster index.
/// 3. **Update:** non-empty clusters move to the mean of their members;
///    empty clusters keep their previous centroid.
/// 4. **Converge:** from the second iteration on, stop once no centroid
///    moved more than [`CONVERGENCE_THRESHOLD`] (Euclidean). Otherwise stop
///    after `max_iterations`.
///
/// Member lists in the result are those of the last assignment step, so
/// they always partition `0..train.len()`.
///
/// # Errors
///
/// Returns [`KMeansError`] for an invalid config, empty or ragged input,
/// or a failed allocation.
///
/// # Example
///
/// ```
/// use morpho_kmeans::{KMeansConfig, kmeans};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let train = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![10.0, 10.0], vec![10.0, 11.0]];
/// let mut rng = StdRng::seed_from_u64(0);
/// let result = kmeans(&train, &KMeansConfig::new(2), &mut rng).unwrap();
/// assert!((result.wcss() - 1.0).abs() < 1e-12);
/// ```
#[tracing::instrument(skip_all, fields(n = train.len(), k = config.k(), p = config.p()))]
pub fn kmeans<A: AsRef<[f64]>>(
    train: &[A],
    config: &KMeansConfig,
    rng: &mut impl Rng,
) -> Result<Clustering, KMeansError> {
    config.validate_for(train.len())?;
    let dim = validate_rows(train)?;
    let p = config.p();

    let mut clusters = init_centroids(train, config.k(), rng)?;
    let mut wcss_history = Vec::new();
    let mut converged = false;
    let mut iterations = 0;

    while iterations < config.max_iterations() && !converged {
        assign_points(&mut clusters, train, p);
        let shift = update_centroids(&mut clusters, train, dim);
        let wcss = within_sum_of_squares(&clusters, train);
        wcss_history.push(wcss);

        let empty = clusters.iter().filter(|c| c.members.is_empty()).count();
        debug!(iteration = iterations, shift, wcss, empty, "k-means step");

        converged = iterations > 0 && shift < CONVERGENCE_THRESHOLD;
        iterations += 1;
    }

    info!(
        iterations,
        converged,
        wcss = wcss_history.last().copied().unwrap_or(0.0),
        "k-means finished"
    );
    Ok(Clustering {
        clusters,
        p,
        n_samples: train.len(),
        iterations,
        converged,
        wcss_history,
    })
}
