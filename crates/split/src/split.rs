//! Train/test partition and the shuffle-split operation.

use rand::Rng;
use tracing::debug;

use crate::error::SplitError;
use crate::shuffle::shuffle;

/// Two disjoint sets of references into one sequence.
///
/// `train().len() + test().len()` equals the length of the source and no
/// element appears in both.
#[derive(Debug, Clone)]
pub struct Split<'a, T> {
    train: Vec<&'a T>,
    test: Vec<&'a T>,
}

impl<'a, T> Split<'a, T> {
    pub(crate) fn new(train: Vec<&'a T>, test: Vec<&'a T>) -> Self {
        Self { train, test }
    }

    /// Training references.
    pub fn train(&self) -> &[&'a T] {
        &self.train
    }

    /// Test references.
    pub fn test(&self) -> &[&'a T] {
        &self.test
    }

    /// Total number of references, train plus test.
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    /// `true` when both sides are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the split, returning `(train, test)`.
    pub fn into_parts(self) -> (Vec<&'a T>, Vec<&'a T>) {
        (self.train, self.test)
    }
}

/// Randomly partitions `items` into train and test.
///
/// A working vector of references is shuffled with [`shuffle`]; the first
/// `floor(N · training_fraction)` become train and the rest test. `items`
/// itself is not reordered.
///
/// # Errors
///
/// Returns [`SplitError::Empty`] for empty input and
/// [`SplitError::InvalidFraction`] for a fraction outside `[0, 1]`.
pub fn shuffle_split<'a, T>(
    items: &'a [T],
    training_fraction: f64,
    rng: &mut impl Rng,
) -> Result<Split<'a, T>, SplitError> {
    if items.is_empty() {
        return Err(SplitError::Empty);
    }
    if !(0.0..=1.0).contains(&training_fraction) {
        return Err(SplitError::InvalidFraction {
            fraction: training_fraction,
        });
    }

    let mut working: Vec<&T> = items.iter().collect();
    shuffle(&mut working, rng);

    let n_train = ((items.len() as f64 * training_fraction).floor() as usize).min(items.len());
    let test = working.split_off(n_train);
    debug!(n_train, n_test = test.len(), "shuffle split");
    Ok(Split::new(working, test))
}
