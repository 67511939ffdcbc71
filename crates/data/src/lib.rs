//! Labelled feature-vector samples for the morpho classification toolkit.
//!
//! A [`Sample`] is one shape descriptor: a positive class label, a sample id
//! and a fixed-length feature vector. A [`Dataset`] owns a sequence of
//! samples that share the same feature count.
//!
//! Both types implement `AsRef<[f64]>` (samples) so the numeric crates can
//! operate on samples, sample references or plain `Vec<f64>` rows alike.

mod dataset;
mod error;
mod sample;

pub use dataset::Dataset;
pub use error::DataError;
pub use sample::Sample;
