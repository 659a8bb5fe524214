//! Ranked retrieval: the weighting formula and result ordering.

use pilum::config::IndexConfig;
use pilum::document::InMemoryCorpus;
use pilum::error::Result;
use pilum::index::IndexBuilder;
use pilum::query::scorer::{document_length, document_term_weight, query_term_weight};
use pilum::storage::DiskIndex;
use tempfile::TempDir;

fn corpus() -> InMemoryCorpus {
    InMemoryCorpus::from_texts(&[
        ("0", "canyon canyon canyon river"),
        ("1", "river rafting on the river"),
        ("2", "canyon trail"),
        ("3", "mountain lake"),
        ("4", "canyon river canyon river"),
    ])
}

#[test]
fn test_query_weight_formula_is_ln_one_plus_ratio() {
    // ln(1 + N/df), not 1 + ln(N/df).
    let weight = query_term_weight(5, 3);
    assert!((weight - (1.0f64 + 5.0 / 3.0).ln()).abs() < 1e-12);
    assert!((weight - (1.0 + (5.0f64 / 3.0).ln())).abs() > 0.1);

    // A term in every document still carries weight.
    assert!((query_term_weight(5, 5) - 2f64.ln()).abs() < 1e-12);
}

#[test]
fn test_two_term_query_scores() -> Result<()> {
    let built = IndexBuilder::new(IndexConfig::default())?.build(&corpus())?;
    let results = built.scorer().search("canyon river", 10)?;

    let n = 5;
    let w_canyon = query_term_weight(n, 3);
    let w_river = query_term_weight(n, 3);
    let score = |tf_canyon: u32, tf_river: u32, length: f64| {
        (document_term_weight(tf_canyon) * w_canyon + document_term_weight(tf_river) * w_river)
            / length
    };

    let expected = [
        (4, score(2, 2, document_length([2, 2]))),
        (0, score(3, 1, document_length([3, 1]))),
        (2, score(1, 0, document_length([1, 1]))),
        (1, score(0, 2, document_length([2, 1, 1, 1]))),
    ];

    let mut sorted = expected.to_vec();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    assert_eq!(results.len(), 4);
    for (result, (doc_id, score)) in results.iter().zip(&sorted) {
        assert_eq!(result.doc_id, *doc_id);
        assert!((result.score - score).abs() < 1e-12, "doc {doc_id}");
    }
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    Ok(())
}

#[test]
fn test_top_k_is_bounded_and_deterministic() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let built = IndexBuilder::new(IndexConfig::default())?.build(&corpus())?;
    built.write_to(dir.path())?;
    let disk = DiskIndex::open(dir.path())?;

    let first = disk.scorer().search("canyon river", 2)?;
    assert_eq!(first.len(), 2);
    for _ in 0..10 {
        assert_eq!(disk.scorer().search("canyon river", 2)?, first);
    }
    assert_eq!(built.scorer().search("canyon river", 2)?, first);
    Ok(())
}

#[test]
fn test_documents_without_query_terms_are_excluded() -> Result<()> {
    let built = IndexBuilder::new(IndexConfig::default())?.build(&corpus())?;

    let results = built.scorer().search("lake", 10)?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].doc_id, 3);

    assert!(built.scorer().search("glacier", 10)?.is_empty());
    assert!(built.scorer().search("", 10)?.is_empty());
    Ok(())
}
