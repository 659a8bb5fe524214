//! Merge algorithms over postings lists.
//!
//! Every function walks its inputs with two cursors in ascending `doc_id`
//! order and returns a new list, so inputs are never mutated and the output
//! keeps the strictly-increasing `doc_id` ordering. Each runs in O(n + m).

use std::cmp::Ordering;

use crate::index::posting::Posting;

/// Postings whose document appears in both lists. The left posting is kept.
pub fn intersect(left: &[Posting], right: &[Posting]) -> Vec<Posting> {
    let mut result = Vec::with_capacity(left.len().min(right.len()));
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        match left[i].doc_id.cmp(&right[j].doc_id) {
            Ordering::Equal => {
                result.push(left[i].clone());
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }
    result
}

/// Postings whose document appears in either list. On a shared document the
/// left posting is kept; unconsumed tails are appended.
pub fn union(left: &[Posting], right: &[Posting]) -> Vec<Posting> {
    let mut result = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        match left[i].doc_id.cmp(&right[j].doc_id) {
            Ordering::Equal => {
                result.push(left[i].clone());
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                result.push(left[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                result.push(right[j].clone());
                j += 1;
            }
        }
    }
    result.extend_from_slice(&left[i..]);
    result.extend_from_slice(&right[j..]);
    result
}

/// Like [`union`], but a shared document gets the merged positions of both
/// postings. Used to OR the postings of different terms standing for one
/// query literal, where the positions of every term matter.
pub fn merge_union(left: &[Posting], right: &[Posting]) -> Vec<Posting> {
    let mut result = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        match left[i].doc_id.cmp(&right[j].doc_id) {
            Ordering::Equal => {
                result.push(combine(&left[i], &right[j]));
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                result.push(left[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                result.push(right[j].clone());
                j += 1;
            }
        }
    }
    result.extend_from_slice(&left[i..]);
    result.extend_from_slice(&right[j..]);
    result
}

fn combine(left: &Posting, right: &Posting) -> Posting {
    if left.positions.is_empty() && right.positions.is_empty() {
        return Posting::with_frequency(left.doc_id, left.frequency + right.frequency);
    }

    let (a, b) = (&left.positions, &right.positions);
    let mut positions = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Equal => {
                positions.push(a[i]);
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                positions.push(a[i]);
                i += 1;
            }
            Ordering::Greater => {
                positions.push(b[j]);
                j += 1;
            }
        }
    }
    positions.extend_from_slice(&a[i..]);
    positions.extend_from_slice(&b[j..]);
    Posting::with_positions(left.doc_id, positions)
}

/// Left postings whose document does not appear in the right list.
pub fn difference(left: &[Posting], right: &[Posting]) -> Vec<Posting> {
    let mut result = Vec::with_capacity(left.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        match left[i].doc_id.cmp(&right[j].doc_id) {
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                result.push(left[i].clone());
                i += 1;
            }
            Ordering::Greater => j += 1,
        }
    }
    result.extend_from_slice(&left[i..]);
    result
}

/// Documents where some right position is exactly `distance` after a left
/// position. The resulting postings carry those right positions, so calls can
/// be chained term by term along a phrase.
pub fn positional_intersect(left: &[Posting], right: &[Posting], distance: u32) -> Vec<Posting> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        match left[i].doc_id.cmp(&right[j].doc_id) {
            Ordering::Equal => {
                let positions =
                    adjacent_positions(&left[i].positions, &right[j].positions, distance);
                if !positions.is_empty() {
                    result.push(Posting::with_positions(left[i].doc_id, positions));
                }
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }
    result
}

/// Right positions `p` such that `p - distance` is a left position.
fn adjacent_positions(left: &[u32], right: &[u32], distance: u32) -> Vec<u32> {
    let mut matched = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        let target = left[i] + distance;
        match target.cmp(&right[j]) {
            Ordering::Equal => {
                matched.push(right[j]);
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::posting::{doc_ids, is_well_ordered};

    fn list(ids: &[u32]) -> Vec<Posting> {
        ids.iter().map(|&id| Posting::new(id)).collect()
    }

    fn positional(entries: &[(u32, &[u32])]) -> Vec<Posting> {
        entries
            .iter()
            .map(|(id, positions)| Posting::with_positions(*id, positions.to_vec()))
            .collect()
    }

    #[test]
    fn test_intersect() {
        let a = list(&[1, 3, 5, 7]);
        let b = list(&[2, 3, 4, 7, 9]);
        assert_eq!(doc_ids(&intersect(&a, &b)), vec![3, 7]);
        assert_eq!(doc_ids(&intersect(&b, &a)), vec![3, 7]);
        assert!(intersect(&a, &[]).is_empty());
        assert!(intersect(&[], &b).is_empty());
    }

    #[test]
    fn test_intersect_idempotent_and_keeps_left() {
        let a = positional(&[(1, &[2, 4]), (3, &[1])]);
        assert_eq!(intersect(&a, &a), a);

        let b = positional(&[(1, &[9])]);
        assert_eq!(intersect(&a, &b), positional(&[(1, &[2, 4])]));
    }

    #[test]
    fn test_union() {
        let a = list(&[1, 3, 5]);
        let b = list(&[2, 3, 8, 9]);
        let merged = union(&a, &b);
        assert_eq!(doc_ids(&merged), vec![1, 2, 3, 5, 8, 9]);
        assert!(merged.len() <= a.len() + b.len());
        assert_eq!(doc_ids(&union(&b, &a)), doc_ids(&merged));
        assert!(is_well_ordered(&merged));
    }

    #[test]
    fn test_union_with_empty_side() {
        let a = positional(&[(1, &[1]), (2, &[4])]);
        assert_eq!(union(&a, &[]), a);
        assert_eq!(union(&[], &a), a);
    }

    #[test]
    fn test_merge_union_combines_positions() {
        let a = positional(&[(1, &[1, 5]), (4, &[2])]);
        let b = positional(&[(1, &[3, 5]), (6, &[1])]);
        assert_eq!(
            merge_union(&a, &b),
            positional(&[(1, &[1, 3, 5]), (4, &[2]), (6, &[1])])
        );
    }

    #[test]
    fn test_merge_union_positionless_sums_frequencies() {
        let a = vec![Posting::with_frequency(2, 3)];
        let b = vec![Posting::with_frequency(2, 2)];
        assert_eq!(merge_union(&a, &b), vec![Posting::with_frequency(2, 5)]);
    }

    #[test]
    fn test_difference() {
        let a = list(&[1, 2, 3, 4, 5]);
        let b = list(&[2, 4, 6]);
        assert_eq!(doc_ids(&difference(&a, &b)), vec![1, 3, 5]);
        assert!(difference(&b, &b).is_empty());
        assert_eq!(difference(&a, &[]), a);
        assert!(difference(&[], &a).is_empty());
    }

    #[test]
    fn test_positional_intersect_adjacent_only() {
        // doc 1: "national park", doc 2: "national historic park", doc 3: "park national"
        let national = positional(&[(1, &[1]), (2, &[1]), (3, &[2])]);
        let park = positional(&[(1, &[2]), (2, &[3]), (3, &[1])]);
        assert_eq!(
            positional_intersect(&national, &park, 1),
            positional(&[(1, &[2])])
        );
        assert_eq!(
            positional_intersect(&national, &park, 2),
            positional(&[(2, &[3])])
        );
    }

    #[test]
    fn test_positional_intersect_multiple_occurrences() {
        let left = positional(&[(5, &[1, 4, 10])]);
        let right = positional(&[(5, &[2, 5, 7, 11])]);
        assert_eq!(
            positional_intersect(&left, &right, 1),
            positional(&[(5, &[2, 5, 11])])
        );
    }

    #[test]
    fn test_positional_intersect_without_positions() {
        let left = list(&[1]);
        let right = list(&[1]);
        assert!(positional_intersect(&left, &right, 1).is_empty());
    }
}
