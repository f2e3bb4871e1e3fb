//! Longest common subsequence over sequences of JSON values.
//!
//! Feeds the array differ: the LCS pins down which elements survived from the
//! left array to the right array, and the leftovers are classified into
//! removals, additions, relocations, and positional re-pairs.

use json_delta_util::stable_stringify;
use serde_json::Value;

/// Classified outcome of an LCS pass over two array middles.
///
/// All indices are positions in the original (untrimmed) arrays: left-side
/// indices for `to_remove`, right-side indices for `to_add`, and
/// `(left, right)` pairs elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayDiff {
    /// Matched pairs, ascending on both axes.
    pub lcs: Vec<(usize, usize)>,
    /// Left indices with no counterpart on the right.
    pub to_remove: Vec<usize>,
    /// Right indices with no counterpart on the left.
    pub to_add: Vec<usize>,
    /// Deeply equal elements that changed position.
    pub to_move: Vec<(usize, usize)>,
    /// Non-identical leftovers re-paired by position for in-place diffing.
    pub to_diff: Vec<(usize, usize)>,
}

/// Compute the LCS classification of `left` against `right`.
///
/// `head_offset` is the number of trimmed common-head elements; every
/// returned index is rebased by it so callers can index the original arrays.
pub fn compute(left: &[Value], right: &[Value], head_offset: usize) -> ArrayDiff {
    let m = left.len();
    let n = right.len();

    if m == 0 || n == 0 {
        return ArrayDiff {
            to_remove: (0..m).map(|i| i + head_offset).collect(),
            to_add: (0..n).map(|j| j + head_offset).collect(),
            ..ArrayDiff::default()
        };
    }

    // Canonical forms turn each equality-matrix cell into a string compare;
    // two values share a canonical form exactly when they are deeply equal.
    let left_keys: Vec<String> = left.iter().map(stable_stringify).collect();
    let right_keys: Vec<String> = right.iter().map(stable_stringify).collect();

    let mut equal = vec![vec![false; n]; m];
    for (i, lk) in left_keys.iter().enumerate() {
        for (j, rk) in right_keys.iter().enumerate() {
            equal[i][j] = lk == rk;
        }
    }

    // matrix[i][j] holds the LCS length of left[..i] and right[..j].
    let mut matrix = vec![vec![0usize; n + 1]; m + 1];
    for i in 0..m {
        for j in 0..n {
            matrix[i + 1][j + 1] = if equal[i][j] {
                matrix[i][j] + 1
            } else {
                matrix[i][j + 1].max(matrix[i + 1][j])
            };
        }
    }

    // Iterative backtrack. On a mismatch, drop the left element only when it
    // is strictly worse to keep; ties fall to the right side, so the last of
    // several equal left candidates stays matched.
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if equal[i - 1][j - 1] {
            pairs.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if matrix[i - 1][j] > matrix[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    pairs.reverse();

    let mut paired_left = vec![false; m];
    let mut paired_right = vec![false; n];
    for &(li, ri) in &pairs {
        paired_left[li] = true;
        paired_right[ri] = true;
    }
    let left_over: Vec<usize> = (0..m).filter(|&li| !paired_left[li]).collect();
    let mut right_over: Vec<usize> = (0..n).filter(|&ri| !paired_right[ri]).collect();

    // Relocations: a leftover left element deeply equal to a leftover right
    // element moved rather than changed. First equal candidate wins.
    let mut to_move: Vec<(usize, usize)> = Vec::new();
    let mut remaining_left: Vec<usize> = Vec::new();
    for &li in &left_over {
        match right_over.iter().position(|&ri| equal[li][ri]) {
            Some(pos) => to_move.push((li, right_over.remove(pos))),
            None => remaining_left.push(li),
        }
    }

    // Positional re-pairing of whatever is left on both sides.
    let shared = remaining_left.len().min(right_over.len());
    let to_diff: Vec<(usize, usize)> = remaining_left[..shared]
        .iter()
        .copied()
        .zip(right_over[..shared].iter().copied())
        .collect();
    let to_remove: Vec<usize> = remaining_left[shared..].to_vec();
    let to_add: Vec<usize> = right_over[shared..].to_vec();

    let rebase_pairs = |pairs: Vec<(usize, usize)>| {
        pairs
            .into_iter()
            .map(|(li, ri)| (li + head_offset, ri + head_offset))
            .collect()
    };
    let rebase = |indices: Vec<usize>| indices.into_iter().map(|i| i + head_offset).collect();

    ArrayDiff {
        lcs: rebase_pairs(pairs),
        to_remove: rebase(to_remove),
        to_add: rebase(to_add),
        to_move: rebase_pairs(to_move),
        to_diff: rebase_pairs(to_diff),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(raw: &[i64]) -> Vec<Value> {
        raw.iter().map(|&n| json!(n)).collect()
    }

    #[test]
    fn empty_left_is_all_adds() {
        let result = compute(&[], &values(&[1, 2]), 0);
        assert_eq!(result.to_add, vec![0, 1]);
        assert!(result.to_remove.is_empty());
        assert!(result.lcs.is_empty());
    }

    #[test]
    fn empty_right_is_all_removes() {
        let result = compute(&values(&[1, 2, 3]), &[], 2);
        assert_eq!(result.to_remove, vec![2, 3, 4]);
        assert!(result.to_add.is_empty());
    }

    #[test]
    fn ties_favor_the_last_left_candidate() {
        let left = values(&[1, 1, 2, 3, 4, 1, 1]);
        let right = values(&[1, 2, 3, 1]);
        let result = compute(&left, &right, 0);
        assert_eq!(result.lcs, vec![(1, 0), (2, 1), (3, 2), (6, 3)]);
    }

    #[test]
    fn full_reversal_becomes_moves() {
        let left = values(&[1, 2, 3, 4]);
        let right = values(&[4, 3, 2, 1]);
        let result = compute(&left, &right, 0);
        assert_eq!(result.lcs, vec![(3, 0)]);
        assert_eq!(result.to_move, vec![(0, 3), (1, 2), (2, 1)]);
        assert!(result.to_remove.is_empty());
        assert!(result.to_add.is_empty());
        assert!(result.to_diff.is_empty());
    }

    #[test]
    fn leftovers_re_pair_by_position() {
        let left = vec![json!({"p": false})];
        let right = vec![json!({"p": true})];
        let result = compute(&left, &right, 2);
        assert!(result.lcs.is_empty());
        assert_eq!(result.to_diff, vec![(2, 2)]);
        assert!(result.to_remove.is_empty());
        assert!(result.to_add.is_empty());
    }

    #[test]
    fn head_offset_rebases_every_index() {
        let left = values(&[5, 6]);
        let right = values(&[6, 7, 8]);
        let result = compute(&left, &right, 10);
        // 6 survives, 5 re-pairs with 7, 8 is added.
        assert_eq!(result.lcs, vec![(11, 10)]);
        assert_eq!(result.to_diff, vec![(10, 11)]);
        assert_eq!(result.to_add, vec![12]);
    }

    #[test]
    fn equal_objects_match_regardless_of_key_order() {
        let left = vec![json!({"a": 1, "b": 2})];
        let right = vec![json!({"b": 2, "a": 1})];
        let result = compute(&left, &right, 0);
        assert_eq!(result.lcs, vec![(0, 0)]);
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let left = values(&[1, 2, 2, 3, 5, 1]);
        let right = values(&[2, 1, 4, 2, 3]);
        let first = compute(&left, &right, 0);
        for _ in 0..3 {
            assert_eq!(compute(&left, &right, 0), first);
        }
    }
}
