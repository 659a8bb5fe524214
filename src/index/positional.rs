//! Positional inverted index.

use ahash::AHashMap;

use crate::document::DocId;
use crate::error::{PilumError, Result};
use crate::index::Index;
use crate::index::posting::{Posting, strip_positions};

/// In-memory term → postings mapping with positions.
///
/// Built by a single sequential pass: [`add_term`](Self::add_term) must be called
/// with non-decreasing document ids. The index never sorts; it extends the last
/// posting of a term when the document id matches and appends a new one otherwise.
#[derive(Debug, Clone, Default)]
pub struct PositionalInvertedIndex {
    postings: AHashMap<String, Vec<Posting>>,
}

impl PositionalInvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `term` occurs in `doc_id` at `position`.
    pub fn add_term(&mut self, term: &str, doc_id: DocId, position: u32) -> Result<()> {
        let list = self.postings.entry(term.to_string()).or_default();

        match list.last_mut() {
            Some(last) if last.doc_id == doc_id => last.add_position(position),
            Some(last) if last.doc_id > doc_id => {
                return Err(PilumError::index(format!(
                    "document {doc_id} added after document {} for term '{term}'",
                    last.doc_id
                )));
            }
            _ => list.push(Posting::with_positions(doc_id, vec![position])),
        }
        Ok(())
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Whether no term has been added.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

impl Index for PositionalInvertedIndex {
    fn postings(&self, term: &str) -> Result<Vec<Posting>> {
        Ok(self.postings.get(term).cloned().unwrap_or_default())
    }

    fn positionless_postings(&self, term: &str) -> Result<Vec<Posting>> {
        Ok(self
            .postings
            .get(term)
            .map(|list| strip_positions(list))
            .unwrap_or_default())
    }

    fn vocabulary(&self) -> Vec<String> {
        let mut terms: Vec<String> = self.postings.keys().cloned().collect();
        terms.sort();
        terms
    }

    fn vocabulary_size(&self) -> usize {
        self.postings.len()
    }
}
