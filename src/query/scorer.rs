//! Ranked retrieval with tf-idf weights and cosine length normalization.
//!
//! For a bag-of-words query, every normalized query term `t` with document
//! frequency `df` contributes `w(q,t) * w(d,t)` to the accumulator of each
//! document `d` in its postings, where
//!
//! - `w(q,t) = ln(1 + N / df)` with `N` the number of documents,
//! - `w(d,t) = 1 + ln(tf)` with `tf` the term frequency in `d`.
//!
//! Accumulators are divided by the document length `L(d) = sqrt(Σ w(d,t)²)`,
//! computed at build time over every term of the document. A document whose
//! length is zero keeps its raw accumulator.

use ahash::AHashMap;
use log::debug;

use crate::analysis::normalizer::Normalizer;
use crate::document::DocId;
use crate::error::{PilumError, Result};
use crate::index::Index;
use crate::query::collector::{ScoredDocument, TopDocsCollector};

/// Per-document lengths `L(d)`, indexed by document id.
pub trait DocumentWeights {
    /// `L(d)` of a document.
    fn document_weight(&self, doc_id: DocId) -> Result<f64>;

    /// Number of documents with a stored weight; used as `N`.
    fn document_count(&self) -> usize;
}

impl DocumentWeights for [f64] {
    fn document_weight(&self, doc_id: DocId) -> Result<f64> {
        self.get(doc_id as usize)
            .copied()
            .ok_or_else(|| PilumError::index(format!("no weight stored for document {doc_id}")))
    }

    fn document_count(&self) -> usize {
        self.len()
    }
}

impl DocumentWeights for Vec<f64> {
    fn document_weight(&self, doc_id: DocId) -> Result<f64> {
        self.as_slice().document_weight(doc_id)
    }

    fn document_count(&self) -> usize {
        self.len()
    }
}

/// `w(d,t)`. Zero when the term does not occur.
pub fn document_term_weight(frequency: u32) -> f64 {
    if frequency == 0 {
        0.0
    } else {
        1.0 + f64::from(frequency).ln()
    }
}

/// `w(q,t)`. Zero for an empty corpus or an unknown term.
pub fn query_term_weight(document_count: usize, document_frequency: usize) -> f64 {
    if document_count == 0 || document_frequency == 0 {
        return 0.0;
    }
    (1.0 + document_count as f64 / document_frequency as f64).ln()
}

/// `L(d)` from the frequencies of every distinct term of a document.
pub fn document_length<I: IntoIterator<Item = u32>>(frequencies: I) -> f64 {
    frequencies
        .into_iter()
        .map(|tf| document_term_weight(tf).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Scores documents against bag-of-words queries.
pub struct RankedScorer<'a> {
    index: &'a dyn Index,
    normalizer: &'a dyn Normalizer,
    weights: &'a dyn DocumentWeights,
}

impl<'a> RankedScorer<'a> {
    pub fn new(
        index: &'a dyn Index,
        normalizer: &'a dyn Normalizer,
        weights: &'a dyn DocumentWeights,
    ) -> Self {
        RankedScorer {
            index,
            normalizer,
            weights,
        }
    }

    /// The `limit` best documents for `query`, by descending score. Ties go to
    /// the lower document id. Documents with a zero score are not returned.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<ScoredDocument>> {
        let document_count = self.weights.document_count();
        let mut accumulators: AHashMap<DocId, f64> = AHashMap::new();

        for token in query.split_whitespace() {
            for term in self.normalizer.normalize(token) {
                let postings = self.index.positionless_postings(&term)?;
                if postings.is_empty() {
                    continue;
                }
                let wqt = query_term_weight(document_count, postings.len());
                for posting in &postings {
                    *accumulators.entry(posting.doc_id).or_insert(0.0) +=
                        document_term_weight(posting.frequency) * wqt;
                }
            }
        }

        let mut collector = TopDocsCollector::new(limit);
        for (doc_id, accumulator) in accumulators {
            if accumulator <= 0.0 {
                continue;
            }
            let length = self.weights.document_weight(doc_id)?;
            let score = if length > 0.0 {
                accumulator / length
            } else {
                accumulator
            };
            collector.collect(doc_id, score);
        }

        debug!(
            "ranked query '{query}': {} candidate documents",
            collector.total_hits()
        );
        Ok(collector.into_results())
    }
}
