//! # morpho-io
//!
//! Reads per-sample shape-descriptor feature files into a
//! [`morpho_data::Dataset`]. Each file holds one real number per line; its
//! name encodes the class and sample id (`s01n002.E34`) and its extension
//! fixes the feature count.

mod error;
mod kind;
mod reader;

pub use error::IoError;
pub use kind::FeatureKind;
pub use reader::{parse_file_name, read_dataset, read_sample};
