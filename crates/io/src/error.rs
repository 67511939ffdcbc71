//! Error types for morpho-io.

use std::path::PathBuf;

use morpho_data::DataError;

/// Error type for all fallible operations in the morpho-io crate.
///
/// Covers filesystem failures, malformed file names, unknown feature-file
/// extensions and feature values that cannot be parsed or counted.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file or directory does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a failure reading a feature file.
    #[error("failed to read {}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Wraps a failure listing the input directory.
    #[error("failed to list directory {}", path.display())]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a file name does not follow the `s<class>n<sample>` pattern.
    #[error("file name '{name}' does not match s<class>n<sample>")]
    InvalidFileName {
        /// Offending file name.
        name: String,
    },

    /// Returned when an extension is not one of the known feature kinds.
    #[error("unknown feature extension '{extension}'")]
    UnknownExtension {
        /// Extension as given.
        extension: String,
    },

    /// Returned when a line cannot be parsed as a real number.
    #[error("invalid feature value '{value}' at {}:{line}", path.display())]
    InvalidFeature {
        /// File being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Text that failed to parse.
        value: String,
    },

    /// Returned when a file holds more or fewer values than its kind requires.
    #[error("{}: expected {expected} feature values, got {got}", path.display())]
    FeatureCount {
        /// File being parsed.
        path: PathBuf,
        /// Feature count required by the extension.
        expected: usize,
        /// Values actually present.
        got: usize,
    },

    /// Returned when a directory contains no files with the requested extension.
    #[error("no '{extension}' files found in {}", dir.display())]
    NoSamples {
        /// Directory searched.
        dir: PathBuf,
        /// Extension searched for.
        extension: String,
    },

    /// Wraps a dataset validation failure.
    #[error("invalid dataset: {0}")]
    Data(#[from] DataError),
}
