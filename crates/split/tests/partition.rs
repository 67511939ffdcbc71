//! Partition invariants over datasets of samples.

use std::collections::BTreeSet;

use morpho_data::Sample;
use morpho_split::{Split, k_fold, shuffle, shuffle_split};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn samples(n: usize) -> Vec<Sample> {
    (0..n)
        .map(|i| Sample::new(1 + (i % 4) as u32, i as u32, vec![i as f64, 0.5]))
        .collect()
}

fn ids(refs: &[&Sample]) -> Vec<u32> {
    refs.iter().map(|s| s.sample_id()).collect()
}

fn assert_partition(split: &Split<'_, Sample>, n: usize) {
    let train: BTreeSet<u32> = ids(split.train()).into_iter().collect();
    let test: BTreeSet<u32> = ids(split.test()).into_iter().collect();
    assert_eq!(train.len(), split.train().len(), "duplicate in train");
    assert_eq!(test.len(), split.test().len(), "duplicate in test");
    assert!(train.is_disjoint(&test));
    let union: BTreeSet<u32> = train.union(&test).copied().collect();
    assert_eq!(union, (0..n as u32).collect::<BTreeSet<_>>());
}

#[test]
fn shuffle_split_is_a_partition() {
    let data = samples(53);
    let mut rng = StdRng::seed_from_u64(2024);
    for fraction in [0.0, 0.1, 0.5, 0.8, 1.0] {
        let split = shuffle_split(&data, fraction, &mut rng).unwrap();
        assert_eq!(split.len(), 53);
        assert_partition(&split, 53);
    }
}

#[test]
fn k_fold_test_sets_disjoint_and_equal_size() {
    let data = samples(23);
    for k in 2..=23 {
        let folds: Vec<_> = k_fold(&data, k).unwrap().collect();
        assert_eq!(folds.len(), k);

        let mut tested = BTreeSet::new();
        for f in &folds {
            assert_eq!(f.test().len(), 23 / k);
            assert_partition(f, 23);
            for id in ids(f.test()) {
                assert!(tested.insert(id), "sample {id} tested twice (k = {k})");
            }
        }
        assert_eq!(tested.len(), k * (23 / k));
    }
}

#[test]
fn shuffled_folds_are_reproducible() {
    let run = |seed| {
        let mut data = samples(20);
        shuffle(&mut data, &mut StdRng::seed_from_u64(seed));
        k_fold(&data, 4)
            .unwrap()
            .map(|f| ids(f.test()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(9), run(9));
    assert_ne!(run(9), run(10));
}
