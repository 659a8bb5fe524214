//! Term-existence index without positions.

use ahash::AHashMap;

use crate::document::DocId;
use crate::error::{PilumError, Result};
use crate::index::Index;
use crate::index::posting::Posting;

/// Lighter in-memory index keeping only document ids and term frequencies.
///
/// Shares the [`Index`] interface with [`super::PositionalInvertedIndex`];
/// [`Index::postings`] returns positionless postings because nothing else is stored.
/// Phrase queries against it therefore never match.
#[derive(Debug, Clone, Default)]
pub struct PositionlessIndex {
    postings: AHashMap<String, Vec<Posting>>,
}

impl PositionlessIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occurrence of `term` in `doc_id`. The position is only used to
    /// keep the call signature of the positional index; it is not stored.
    pub fn add_term(&mut self, term: &str, doc_id: DocId, _position: u32) -> Result<()> {
        let list = self.postings.entry(term.to_string()).or_default();
        match list.last_mut() {
            Some(last) if last.doc_id == doc_id => last.frequency += 1,
            Some(last) if last.doc_id > doc_id => {
                return Err(PilumError::index(format!(
                    "document {doc_id} added after document {} for term '{term}'",
                    last.doc_id
                )));
            }
            _ => list.push(Posting::new(doc_id)),
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

impl Index for PositionlessIndex {
    fn postings(&self, term: &str) -> Result<Vec<Posting>> {
        Ok(self.postings.get(term).cloned().unwrap_or_default())
    }

    fn positionless_postings(&self, term: &str) -> Result<Vec<Posting>> {
        self.postings(term)
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
