//! Neighbour ordering and the majority vote.

use std::cmp::Ordering;

/// Fills `pairs` with `(distance, label)` for one test row, stable-sorted
/// by ascending distance.
///
/// Equal distances keep their training order, which the vote relies on to
/// break ties deterministically.
///
/// # Panics
///
/// Debug-asserts that `row.len() == labels.len()`.
pub(crate) fn sort_neighbors(row: &[f64], labels: &[u32], pairs: &mut Vec<(f64, u32)>) {
    debug_assert_eq!(row.len(), labels.len());

    pairs.clear();
    pairs.extend(row.iter().copied().zip(labels.iter().copied()));

    // Stable sort; NaN-safe via Ordering::Equal fallback
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
}

/// Majority vote over a window of sorted neighbours.
///
/// Each label's votes are counted across the whole window. The label with
/// the highest count wins; on equal counts the label whose first
/// occurrence is earlier in the window (the closer neighbour) wins.
///
/// `tally` is scratch space holding `(label, count)` in first-occurrence
/// order. Returns `None` for an empty window.
pub(crate) fn majority_vote(window: &[(f64, u32)], tally: &mut Vec<(u32, usize)>) -> Option<u32> {
    tally.clear();
    for &(_, label) in window {
        match tally.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    let mut best: Option<(u32, usize)> = None;
    for &(label, count) in tally.iter() {
        // Strict comparison: an earlier label keeps the lead on ties.
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(row: &[f64], labels: &[u32]) -> Vec<(f64, u32)> {
        let mut pairs = Vec::new();
        sort_neighbors(row, labels, &mut pairs);
        pairs
    }

    fn vote(window: &[(f64, u32)]) -> Option<u32> {
        majority_vote(window, &mut Vec::new())
    }

    #[test]
    fn test_sort_ascending() {
        let pairs = sorted(&[3.0, 1.0, 2.0], &[1, 2, 3]);
        assert_eq!(pairs, vec![(1.0, 2), (2.0, 3), (3.0, 1)]);
    }

    #[test]
    fn test_sort_is_stable_on_equal_distances() {
        let pairs = sorted(&[1.0, 1.0, 0.5, 1.0], &[4, 2, 9, 1]);
        assert_eq!(pairs, vec![(0.5, 9), (1.0, 4), (1.0, 2), (1.0, 1)]);
    }

    #[test]
    fn test_clear_majority() {
        let window = [(0.1, 2), (0.2, 1), (0.3, 1), (0.4, 1), (0.5, 2)];
        assert_eq!(vote(&window), Some(1));
    }

    #[test]
    fn test_non_consecutive_votes_count() {
        // Label 3 never forms a run but still has the most votes.
        let window = [(0.1, 3), (0.2, 1), (0.3, 3), (0.4, 2), (0.5, 3)];
        assert_eq!(vote(&window), Some(3));
    }

    #[test]
    fn test_total_count_beats_longest_run() {
        // 1 and 3 both have two votes; 3 forms the only run of two, but 1
        // appears first, so 1 wins.
        let window = [(0.1, 1), (0.2, 2), (0.3, 1), (0.4, 3), (0.5, 3)];
        assert_eq!(vote(&window), Some(1));
    }

    #[test]
    fn test_tie_prefers_closer_label() {
        let window = [(0.1, 2), (0.2, 1), (0.3, 1), (0.4, 2)];
        assert_eq!(vote(&window), Some(2));
        let window = [(0.1, 5), (0.2, 7)];
        assert_eq!(vote(&window), Some(5));
    }

    #[test]
    fn test_empty_window() {
        assert_eq!(vote(&[]), None);
    }

    #[test]
    fn test_tally_reuse() {
        let mut tally = Vec::new();
        assert_eq!(majority_vote(&[(0.0, 1), (0.1, 1)], &mut tally), Some(1));
        assert_eq!(majority_vote(&[(0.0, 4)], &mut tally), Some(4));
        assert_eq!(tally, vec![(4, 1)]);
    }
}
