//! Integration test: reading feature files and directories from disk.

use std::fs;
use std::path::Path;

use morpho_io::{FeatureKind, IoError, read_dataset, read_sample};

fn write_sample(dir: &Path, name: &str, values: &[f64]) {
    let body: String = values.iter().map(|v| format!("{v}\n")).collect();
    fs::write(dir.join(name), body).unwrap();
}

fn e34_values(offset: f64) -> Vec<f64> {
    (0..16).map(|i| offset + i as f64 * 0.1).collect()
}

#[test]
fn read_single_sample() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "s03n012.E34", &e34_values(1.0));

    let sample = read_sample(&dir.path().join("s03n012.E34"), FeatureKind::E34).unwrap();
    assert_eq!(sample.class(), 3);
    assert_eq!(sample.sample_id(), 12);
    assert_eq!(sample.feature_count(), 16);
    approx::assert_abs_diff_eq!(sample.features()[15], 2.5, epsilon = 1e-12);
}

#[test]
fn read_sample_missing_file() {
    let err = read_sample(Path::new("/tmp/morpho_missing/s01n001.E34"), FeatureKind::E34)
        .unwrap_err();
    assert!(
        matches!(err, IoError::FileNotFound { .. }),
        "expected FileNotFound, got {err:?}"
    );
}

#[test]
fn read_sample_short_file() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "s01n001.SA", &[1.0; 89]);
    let err = read_sample(&dir.path().join("s01n001.SA"), FeatureKind::Sa).unwrap_err();
    assert!(matches!(
        err,
        IoError::FeatureCount {
            expected: 90,
            got: 89,
            ..
        }
    ));
}

#[test]
fn read_dataset_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "s02n001.E34", &e34_values(2.0));
    write_sample(dir.path(), "s01n002.E34", &e34_values(1.0));
    write_sample(dir.path(), "s01n001.E34", &e34_values(0.0));
    // Other kinds and subdirectories are ignored.
    write_sample(dir.path(), "s01n001.SA", &[0.0; 90]);
    fs::create_dir(dir.path().join("nested.E34")).unwrap();

    let ds = read_dataset(dir.path(), FeatureKind::E34).unwrap();
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.feature_count(), 16);
    let ids: Vec<(u32, u32)> = ds
        .samples()
        .iter()
        .map(|s| (s.class(), s.sample_id()))
        .collect();
    assert_eq!(ids, vec![(1, 1), (1, 2), (2, 1)]);
    assert_eq!(ds.classes().iter().copied().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn read_dataset_no_matches() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "s01n001.SA", &[0.0; 90]);
    let err = read_dataset(dir.path(), FeatureKind::Gfd).unwrap_err();
    assert!(matches!(err, IoError::NoSamples { .. }));
}

#[test]
fn read_dataset_bad_name_aborts() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "s01n001.E34", &e34_values(0.0));
    write_sample(dir.path(), "shape.E34", &e34_values(0.0));
    let err = read_dataset(dir.path(), FeatureKind::E34).unwrap_err();
    assert!(matches!(err, IoError::InvalidFileName { .. }));
}

#[test]
fn read_dataset_missing_dir() {
    let err = read_dataset(Path::new("/tmp/morpho_no_such_dir"), FeatureKind::F0).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}
