//! Contiguous k-fold partitioning.

use crate::error::SplitError;
use crate::split::Split;

/// Iterator over the `k` folds of a sequence; see [`k_fold`].
#[derive(Debug, Clone)]
pub struct KFold<'a, T> {
    items: &'a [T],
    k: usize,
    fold_size: usize,
    next: usize,
}

impl<'a, T> KFold<'a, T> {
    /// Number of test items in every fold, `floor(N / k)`.
    pub fn fold_size(&self) -> usize {
        self.fold_size
    }

    /// Number of items that are never in a test set, `N mod k`.
    pub fn remainder(&self) -> usize {
        self.items.len() - self.k * self.fold_size
    }
}

impl<'a, T> Iterator for KFold<'a, T> {
    type Item = Split<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.k {
            return None;
        }
        let start = self.next * self.fold_size;
        let end = start + self.fold_size;
        self.next += 1;

        let test: Vec<&T> = self.items[start..end].iter().collect();
        let train: Vec<&T> = self.items[..start]
            .iter()
            .chain(&self.items[end..])
            .collect();
        Some(Split::new(train, test))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.k - self.next;
        (left, Some(left))
    }
}

impl<T> ExactSizeIterator for KFold<'_, T> {}

/// Splits `items` into `k` folds without shuffling.
///
/// Fold i tests on the contiguous slice `[i·s, (i+1)·s)` with
/// `s = floor(N / k)` and trains on everything else. The trailing `N mod k`
/// items are never tested and stay in every training set. Shuffle
/// beforehand for randomized folds.
///
/// # Errors
///
/// Returns [`SplitError::InvalidFolds`] unless `2 <= k <= N`.
pub fn k_fold<T>(items: &[T], k: usize) -> Result<KFold<'_, T>, SplitError> {
    let n = items.len();
    if k < 2 || k > n {
        return Err(SplitError::InvalidFolds { k, n });
    }
    Ok(KFold {
        items,
        k,
        fold_size: n / k,
        next: 0,
    })
}
