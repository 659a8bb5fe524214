//! Postings and postings lists.
//!
//! A [`Posting`] records one document a term occurs in, with the term frequency
//! and the ordered positions of the occurrences. A postings list is a plain
//! `Vec<Posting>` ordered by strictly increasing `doc_id`; every merge
//! algorithm in [`crate::query::merge`] relies on that ordering.

use serde::{Deserialize, Serialize};

use crate::document::DocId;

/// A single posting in a postings list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Document ID.
    pub doc_id: DocId,
    /// Term frequency in the document.
    pub frequency: u32,
    /// Positions of the term in the document, strictly increasing, starting at 1.
    /// Empty for positionless postings.
    pub positions: Vec<u32>,
}

impl Posting {
    /// Create a positionless posting with a frequency of one.
    pub fn new(doc_id: DocId) -> Self {
        Posting {
            doc_id,
            frequency: 1,
            positions: Vec::new(),
        }
    }

    /// Create a positionless posting with a known frequency.
    pub fn with_frequency(doc_id: DocId, frequency: u32) -> Self {
        Posting {
            doc_id,
            frequency,
            positions: Vec::new(),
        }
    }

    /// Create a posting with positions; the frequency is the number of positions.
    pub fn with_positions(doc_id: DocId, positions: Vec<u32>) -> Self {
        let frequency = positions.len() as u32;
        Posting {
            doc_id,
            frequency,
            positions,
        }
    }

    /// Append a position. Positions that do not advance are ignored.
    pub fn add_position(&mut self, position: u32) {
        if self.positions.last().is_some_and(|&last| position <= last) {
            return;
        }
        self.positions.push(position);
        self.frequency = self.positions.len() as u32;
    }

    /// Term frequency.
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Whether this posting carries positions.
    pub fn has_positions(&self) -> bool {
        !self.positions.is_empty()
    }

    /// A copy of this posting without positions.
    pub fn without_positions(&self) -> Posting {
        Posting::with_frequency(self.doc_id, self.frequency)
    }
}

/// Strip positions from every posting of a list, keeping document ids and frequencies.
pub fn strip_positions(postings: &[Posting]) -> Vec<Posting> {
    postings.iter().map(Posting::without_positions).collect()
}

/// Document ids of a postings list, in list order.
pub fn doc_ids(postings: &[Posting]) -> Vec<DocId> {
    postings.iter().map(|p| p.doc_id).collect()
}

/// Check the ordering invariants: strictly increasing document ids and
/// strictly increasing positions within each posting.
pub fn is_well_ordered(postings: &[Posting]) -> bool {
    postings.windows(2).all(|w| w[0].doc_id < w[1].doc_id)
        && postings
            .iter()
            .all(|p| p.positions.windows(2).all(|w| w[0] < w[1]))
}
