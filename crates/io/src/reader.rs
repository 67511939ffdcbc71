//! Feature-file reader: file-name parsing, single samples and whole directories.

use std::fs;
use std::path::{Path, PathBuf};

use morpho_data::{Dataset, Sample};
use tracing::{debug, info};

use crate::error::IoError;
use crate::kind::FeatureKind;

/// Parses `s<class>n<sample>` from a file name.
///
/// The class takes one or two digits and the sample one to three, as in
/// `s01n002.E34`. An underscore between the two fields is tolerated
/// (`s01_n002`). Anything after the sample digits must start with `.`.
/// Leading directory components are ignored.
///
/// # Errors
///
/// Returns [`IoError::InvalidFileName`] when the pattern does not match or
/// the class is 0.
pub fn parse_file_name(name: &str) -> Result<(u32, u32), IoError> {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name);
    let invalid = || IoError::InvalidFileName {
        name: base.to_string(),
    };

    let rest = base.strip_prefix('s').ok_or_else(invalid)?;
    let (class, rest) = take_digits(rest, 2).ok_or_else(invalid)?;
    let rest = rest.strip_prefix('_').unwrap_or(rest);
    let rest = rest.strip_prefix('n').ok_or_else(invalid)?;
    let (sample, rest) = take_digits(rest, 3).ok_or_else(invalid)?;

    if !(rest.is_empty() || rest.starts_with('.')) || class == 0 {
        return Err(invalid());
    }
    Ok((class, sample))
}

/// Splits off between 1 and `max` leading ASCII digits.
fn take_digits(s: &str, max: usize) -> Option<(u32, &str)> {
    let len = s.bytes().take(max).take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let value = s[..len].parse().ok()?;
    Some((value, &s[len..]))
}

/// Parses one feature value per non-blank line.
fn parse_features(text: &str, path: &Path, expected: usize) -> Result<Vec<f64>, IoError> {
    let mut features = Vec::with_capacity(expected);
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: f64 = trimmed.parse().map_err(|_| IoError::InvalidFeature {
            path: path.to_path_buf(),
            line: idx + 1,
            value: trimmed.to_string(),
        })?;
        features.push(value);
    }
    if features.len() != expected {
        return Err(IoError::FeatureCount {
            path: path.to_path_buf(),
            expected,
            got: features.len(),
        });
    }
    Ok(features)
}

/// Reads a single feature file of the given kind.
///
/// Class and sample id come from the file name; the body must hold exactly
/// `kind.feature_count()` values.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] / [`IoError::Read`] on filesystem
/// failures, [`IoError::InvalidFileName`] for a malformed name, and
/// [`IoError::InvalidFeature`] / [`IoError::FeatureCount`] for a malformed body.
pub fn read_sample(path: &Path, kind: FeatureKind) -> Result<Sample, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| IoError::InvalidFileName {
            name: path.display().to_string(),
        })?;
    let (class, sample_id) = parse_file_name(name)?;

    let text = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let features = parse_features(&text, path, kind.feature_count())?;

    debug!(path = %path.display(), class, sample_id, "read sample");
    Ok(Sample::new(class, sample_id, features))
}

/// Reads every `kind` file in `dir` into a [`Dataset`].
///
/// Files are visited in file-name order so the resulting sample order does
/// not depend on the filesystem. Subdirectories and files with other
/// extensions are skipped.
///
/// # Errors
///
/// Returns [`IoError::NoSamples`] if nothing matches, any error from
/// [`read_sample`], or [`IoError::Data`] if the samples fail validation.
#[tracing::instrument(skip_all, fields(dir = %dir.display(), kind = %kind))]
pub fn read_dataset(dir: &Path, kind: FeatureKind) -> Result<Dataset, IoError> {
    if !dir.is_dir() {
        return Err(IoError::FileNotFound {
            path: dir.to_path_buf(),
        });
    }
    let read_dir_err = |source| IoError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        let matches = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == kind.extension());
        if matches {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(IoError::NoSamples {
            dir: dir.to_path_buf(),
            extension: kind.to_string(),
        });
    }
    paths.sort();

    let samples = paths
        .iter()
        .map(|p| read_sample(p, kind))
        .collect::<Result<Vec<_>, _>>()?;
    let dataset = Dataset::new(samples)?;

    info!(
        samples = dataset.len(),
        features = dataset.feature_count(),
        classes = dataset.classes().len(),
        "dataset loaded"
    );
    Ok(dataset)
}
