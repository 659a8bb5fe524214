//! Algebraic properties of the postings merges over generated lists.

use pilum::index::Posting;
use pilum::index::posting::{doc_ids, is_well_ordered};
use pilum::query::merge::{difference, intersect, union};

/// Ascending ids below `limit` selected by a simple congruence.
fn postings(limit: u32, step: u32, offset: u32, keep: u32) -> Vec<Posting> {
    (0..limit)
        .filter(|id| (id * step + offset) % 7 < keep)
        .map(Posting::new)
        .collect()
}

fn samples() -> Vec<Vec<Posting>> {
    vec![
        Vec::new(),
        postings(50, 1, 0, 7),
        postings(50, 3, 1, 2),
        postings(80, 5, 4, 3),
        postings(30, 2, 6, 1),
        postings(200, 6, 2, 4),
    ]
}

#[test]
fn test_intersect_commutes_and_is_idempotent() {
    for a in samples() {
        assert_eq!(intersect(&a, &a), a);
        for b in samples() {
            let ab = intersect(&a, &b);
            assert_eq!(doc_ids(&ab), doc_ids(&intersect(&b, &a)));
            assert!(is_well_ordered(&ab));
            assert!(ab.len() <= a.len().min(b.len()));
        }
    }
}

#[test]
fn test_union_bounds() {
    for a in samples() {
        assert_eq!(union(&a, &a), a);
        for b in samples() {
            let ab = union(&a, &b);
            assert!(is_well_ordered(&ab));
            assert!(ab.len() >= a.len().max(b.len()));
            assert!(ab.len() <= a.len() + b.len());
            assert_eq!(ab.len() + intersect(&a, &b).len(), a.len() + b.len());
        }
    }
}

#[test]
fn test_difference_partitions_left() {
    for a in samples() {
        assert!(difference(&a, &a).is_empty());
        for b in samples() {
            let only_a = difference(&a, &b);
            let both = intersect(&a, &b);
            assert!(is_well_ordered(&only_a));
            assert!(intersect(&only_a, &b).is_empty());
            assert_eq!(doc_ids(&union(&only_a, &both)), doc_ids(&a));
        }
    }
}
