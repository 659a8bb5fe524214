//! Top-K collection of scored documents.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::document::DocId;

/// A ranked result: a document and its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// The document ID.
    pub doc_id: DocId,
    /// The relevance score.
    pub score: f64,
}

/// A scored document for use in the heap.
#[derive(Debug, Clone, Copy)]
struct ScoredDoc {
    doc_id: DocId,
    score: f64,
}

impl PartialEq for ScoredDoc {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredDoc {}

impl PartialOrd for ScoredDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredDoc {
    /// Worse documents compare greater, so the heap top is the one to evict.
    /// Lower scores are worse; on a tie the higher doc id is worse.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

/// A collector that keeps the top N documents by score.
#[derive(Debug)]
pub struct TopDocsCollector {
    /// Maximum number of documents to collect.
    max_docs: usize,
    /// Collected hits; the heap top is the current worst.
    hits: BinaryHeap<ScoredDoc>,
    /// Total number of documents offered.
    total_hits: u64,
}

impl TopDocsCollector {
    /// Create a new top docs collector.
    pub fn new(max_docs: usize) -> Self {
        TopDocsCollector {
            max_docs,
            hits: BinaryHeap::with_capacity(max_docs.saturating_add(1).min(1024)),
            total_hits: 0,
        }
    }

    /// Get the maximum number of documents to collect.
    pub fn max_docs(&self) -> usize {
        self.max_docs
    }

    /// Get the total number of documents offered to the collector.
    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    /// Offer a document.
    pub fn collect(&mut self, doc_id: DocId, score: f64) {
        self.total_hits += 1;
        if self.max_docs == 0 {
            return;
        }

        let scored_doc = ScoredDoc { doc_id, score };

        if self.hits.len() < self.max_docs {
            self.hits.push(scored_doc);
        } else if let Some(worst) = self.hits.peek() {
            if scored_doc < *worst {
                self.hits.pop();
                self.hits.push(scored_doc);
            }
        }
    }

    /// Consume the collector, returning results by descending score.
    pub fn into_results(self) -> Vec<ScoredDocument> {
        self.hits
            .into_sorted_vec()
            .into_iter()
            .map(|doc| ScoredDocument {
                doc_id: doc.doc_id,
                score: doc.score,
            })
            .collect()
    }
}
