//! k-means clustering over fixed-dimension feature rows.
//!
//! [`kmeans`] runs Lloyd's algorithm with Minkowski-`p` assignment and
//! returns a [`Clustering`]. The result can be turned into a classifier
//! with [`Clustering::assign_majority_labels`] and
//! [`Clustering::predict_class`].
//!
//! # Architecture
//!
//! ```text
//! kmeans()                     (kmeans.rs)
//!   ├─ init_centroids()        distinct random rows
//!   └─ loop until converged or max_iterations
//!        ├─ assign_points()    nearest centroid, smallest index on ties
//!        ├─ update_centroids() member means, empty clusters unchanged
//!        └─ within_sum_of_squares()
//! ```

pub mod cluster;
pub mod config;
pub mod error;
pub mod kmeans;

pub use cluster::{Cluster, Clustering};
pub use config::{CONVERGENCE_THRESHOLD, DEFAULT_MAX_ITERATIONS, KMeansConfig};
pub use error::KMeansError;
pub use kmeans::kmeans;
