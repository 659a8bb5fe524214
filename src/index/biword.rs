//! Biword index: positionless postings for adjacent term pairs.

use crate::document::DocId;
use crate::error::Result;
use crate::index::Index;
use crate::index::positionless::PositionlessIndex;
use crate::index::posting::Posting;

/// Index keyed by `"first second"` for every pair of adjacent terms.
///
/// Lets two-term phrase queries skip positional intersection. A token with
/// several normalized terms (a hyphenated word) pairs each of them with each
/// term of the neighbouring token, matching what positional adjacency sees.
/// Only documents and frequencies are stored.
#[derive(Debug, Clone, Default)]
pub struct BiwordIndex {
    pairs: PositionlessIndex,
    previous: Option<(DocId, Vec<String>)>,
}

impl BiwordIndex {
    /// Create an empty biword index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Key under which the pair is stored.
    pub fn key(first: &str, second: &str) -> String {
        format!("{first} {second}")
    }

    /// Feed the normalized terms of the next token of `doc_id`; pairs them with
    /// the terms of the previous token of the same document. Documents must be
    /// fed in non-decreasing id order.
    pub fn add_token(&mut self, terms: &[String], doc_id: DocId, position: u32) -> Result<()> {
        if terms.is_empty() {
            return Ok(());
        }
        if let Some((previous_doc, previous)) = self.previous.take() {
            if previous_doc == doc_id {
                for first in &previous {
                    for second in terms {
                        self.pairs
                            .add_term(&Self::key(first, second), doc_id, position)?;
                    }
                }
            }
        }
        self.previous = Some((doc_id, terms.to_vec()));
        Ok(())
    }

    /// Forget the previous term, so the next term starts a new run.
    pub fn break_run(&mut self) {
        self.previous = None;
    }

    /// Postings of the pair `first second`.
    pub fn pair_postings(&self, first: &str, second: &str) -> Result<Vec<Posting>> {
        self.pairs.postings(&Self::key(first, second))
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair has been recorded.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(biwords: &mut BiwordIndex, doc_id: DocId, tokens: &[&[&str]]) {
        for (i, terms) in tokens.iter().enumerate() {
            let terms: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
            biwords.add_token(&terms, doc_id, i as u32 + 1).unwrap();
        }
    }

    #[test]
    fn test_biword_pairs() {
        let mut biwords = BiwordIndex::new();
        feed(&mut biwords, 0, &[&["nation"], &["park"], &["servic"]]);
        feed(&mut biwords, 1, &[&["nation"], &["histor"], &["park"]]);

        assert_eq!(
            biwords.pair_postings("nation", "park").unwrap(),
            vec![Posting::new(0)]
        );
        assert_eq!(
            biwords.pair_postings("histor", "park").unwrap(),
            vec![Posting::new(1)]
        );
        assert!(biwords.pair_postings("park", "nation").unwrap().is_empty());
        assert_eq!(biwords.len(), 4);
    }

    #[test]
    fn test_every_form_of_a_token_is_paired() {
        let mut biwords = BiwordIndex::new();
        feed(&mut biwords, 0, &[&["the"], &["wellknown", "well", "known"], &["trail"]]);

        for first in ["wellknown", "well", "known"] {
            assert_eq!(biwords.pair_postings("the", first).unwrap(), vec![Posting::new(0)]);
            assert_eq!(biwords.pair_postings(first, "trail").unwrap(), vec![Posting::new(0)]);
        }
        // Forms of one token share a position and are not adjacent.
        assert!(biwords.pair_postings("well", "known").unwrap().is_empty());
        assert_eq!(biwords.len(), 6);
    }

    #[test]
    fn test_pairs_do_not_span_documents() {
        let mut biwords = BiwordIndex::new();
        feed(&mut biwords, 0, &[&["end"]]);
        feed(&mut biwords, 1, &[&["start"]]);
        assert!(biwords.is_empty());
    }

    #[test]
    fn test_break_run() {
        let mut biwords = BiwordIndex::new();
        feed(&mut biwords, 0, &[&["a"]]);
        biwords.break_run();
        biwords.add_token(&["b".to_string()], 0, 2).unwrap();
        assert!(biwords.pair_postings("a", "b").unwrap().is_empty());
    }
}
