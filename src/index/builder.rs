//! Single-pass index construction.
//!
//! [`IndexBuilder`] walks a [`DocumentStore`] once, in id order, and fills the
//! positional index, the k-gram index, the optional biword index and the
//! per-document length table together.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use ahash::AHashMap;
use log::{debug, info};

use crate::analysis::normalizer::{Normalizer, StemmingNormalizer, WildcardNormalizer};
use crate::analysis::tokenizer::{Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer};
use crate::config::{IndexConfig, TokenizerKind};
use crate::document::{DocId, Document, DocumentStore};
use crate::error::{PilumError, Result};
use crate::index::biword::BiwordIndex;
use crate::index::kgram::{KGramIndex, WILDCARD};
use crate::index::positional::PositionalInvertedIndex;
use crate::index::positionless::PositionlessIndex;
use crate::query::context::QueryContext;
use crate::query::scorer::{RankedScorer, document_length};
use crate::storage::DiskIndexWriter;

/// Builds indexes from a document store.
pub struct IndexBuilder {
    config: IndexConfig,
    tokenizer: Arc<dyn Tokenizer>,
    normalizer: Arc<dyn Normalizer>,
    wildcard_normalizer: Arc<dyn Normalizer>,
}

impl fmt::Debug for IndexBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexBuilder")
            .field("config", &self.config)
            .field("tokenizer", &self.tokenizer.name())
            .field("normalizer", &self.normalizer.name())
            .finish()
    }
}

impl IndexBuilder {
    /// Create a builder whose tokenizer and stemming normalizer are configured
    /// from `config`.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer: Arc<dyn Tokenizer> = match config.tokenizer {
            TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer::new()),
            TokenizerKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
        };
        let normalizer = Arc::new(StemmingNormalizer::with_stemming(config.stemming));
        Ok(IndexBuilder {
            config,
            tokenizer,
            normalizer,
            wildcard_normalizer: Arc::new(WildcardNormalizer::new()),
        })
    }

    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_normalizer(mut self, normalizer: Arc<dyn Normalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Arc<dyn Normalizer> {
        &self.normalizer
    }

    /// Build the positional index and its companions in one pass.
    pub fn build(&self, store: &dyn DocumentStore) -> Result<BuiltIndex> {
        let start = Instant::now();
        let mut index = PositionalInvertedIndex::new();
        let mut kgrams = KGramIndex::new(self.config.kgram_size);
        let mut biwords = self.config.build_biwords.then(BiwordIndex::new);
        let mut weights = Vec::with_capacity(store.corpus_size());

        for (expected, document) in store.documents().enumerate() {
            let document = document?;
            check_dense(&document, expected)?;
            if let Some(biwords) = biwords.as_mut() {
                biwords.break_run();
            }

            let mut frequencies: AHashMap<String, u32> = AHashMap::new();
            let mut position = 0u32;
            for token in self.tokenizer.tokenize(&document.content) {
                for key in self.wildcard_normalizer.normalize(token) {
                    if !key.contains(WILDCARD) {
                        kgrams.add_term(&key);
                    }
                }

                let terms = self.normalizer.normalize(token);
                if terms.is_empty() {
                    continue;
                }
                position += 1;
                for term in &terms {
                    index.add_term(term, document.id, position)?;
                    *frequencies.entry(term.clone()).or_insert(0) += 1;
                }
                if let Some(biwords) = biwords.as_mut() {
                    biwords.add_token(&terms, document.id, position)?;
                }
            }

            debug!(
                "indexed document {} ('{}'): {position} positions",
                document.id, document.title
            );
            weights.push(document_length(frequencies.into_values()));
        }

        info!(
            "built index: {} documents, {} terms, {} k-gram keys in {:?}",
            weights.len(),
            index.len(),
            kgrams.len(),
            start.elapsed()
        );

        Ok(BuiltIndex {
            config: self.config.clone(),
            index,
            kgrams,
            biwords,
            weights,
            normalizer: Arc::clone(&self.normalizer),
        })
    }

    /// Build only the positionless index: term existence and frequencies.
    pub fn build_positionless(&self, store: &dyn DocumentStore) -> Result<PositionlessIndex> {
        let mut index = PositionlessIndex::new();

        for (expected, document) in store.documents().enumerate() {
            let document = document?;
            check_dense(&document, expected)?;
            let mut position = 0u32;
            for token in self.tokenizer.tokenize(&document.content) {
                let terms = self.normalizer.normalize(token);
                if terms.is_empty() {
                    continue;
                }
                position += 1;
                for term in &terms {
                    index.add_term(term, document.id, position)?;
                }
            }
        }

        info!("built positionless index: {} terms", index.len());
        Ok(index)
    }
}

fn check_dense(document: &Document, expected: usize) -> Result<()> {
    if document.id as usize != expected {
        return Err(PilumError::index(format!(
            "document ids must be dense and ordered: expected {expected}, found {}",
            document.id
        )));
    }
    Ok(())
}

/// The result of an in-memory build.
pub struct BuiltIndex {
    pub config: IndexConfig,
    pub index: PositionalInvertedIndex,
    pub kgrams: KGramIndex,
    pub biwords: Option<BiwordIndex>,
    /// `L(d)` per document id.
    pub weights: Vec<f64>,
    pub normalizer: Arc<dyn Normalizer>,
}

impl fmt::Debug for BuiltIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltIndex")
            .field("config", &self.config)
            .field("terms", &self.index.len())
            .field("kgram_keys", &self.kgrams.len())
            .field("biwords", &self.biwords.as_ref().map(BiwordIndex::len))
            .field("documents", &self.weights.len())
            .finish()
    }
}

impl BuiltIndex {
    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.weights.len()
    }

    /// `L(d)` of a document, if it was indexed.
    pub fn document_weight(&self, doc_id: DocId) -> Option<f64> {
        self.weights.get(doc_id as usize).copied()
    }

    /// Query context with the k-gram and biword indexes attached.
    pub fn context(&self) -> QueryContext<'_> {
        let ctx = QueryContext::new(&self.index, self.normalizer.as_ref()).with_kgrams(&self.kgrams);
        match &self.biwords {
            Some(biwords) => ctx.with_biwords(biwords),
            None => ctx,
        }
    }

    pub fn scorer(&self) -> RankedScorer<'_> {
        RankedScorer::new(&self.index, self.normalizer.as_ref(), &self.weights)
    }

    /// Persist the index, k-grams, weights and config into `directory`.
    pub fn write_to<P: AsRef<Path>>(&self, directory: P) -> Result<()> {
        DiskIndexWriter::new(directory.as_ref())
            .write(&self.index, &self.kgrams, &self.weights, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::InMemoryCorpus;
    use crate::index::Index;
    use crate::index::posting::Posting;

    fn corpus() -> InMemoryCorpus {
        InMemoryCorpus::from_texts(&[
            ("a", "The national park"),
            ("b", "-- parks, and more parks"),
            ("c", "well-known trail"),
        ])
    }

    #[test]
    fn test_positions_skip_empty_tokens() {
        let built = IndexBuilder::new(IndexConfig::default()).unwrap().build(&corpus()).unwrap();

        assert_eq!(
            built.index.postings("park").unwrap(),
            vec![
                Posting::with_positions(0, vec![3]),
                Posting::with_positions(1, vec![1, 4]),
            ]
        );
        assert_eq!(built.index.postings("and").unwrap(), vec![Posting::with_positions(1, vec![2])]);
    }

    #[test]
    fn test_hyphenated_terms_share_a_position() {
        let config = IndexConfig {
            stemming: false,
            ..IndexConfig::default()
        };
        let built = IndexBuilder::new(config).unwrap().build(&corpus()).unwrap();

        for term in ["wellknown", "well", "known"] {
            assert_eq!(built.index.postings(term).unwrap(), vec![Posting::with_positions(2, vec![1])]);
        }
        assert_eq!(built.index.postings("trail").unwrap(), vec![Posting::with_positions(2, vec![2])]);
    }

    #[test]
    fn test_kgrams_and_biwords() {
        let built = IndexBuilder::new(IndexConfig::default()).unwrap().build(&corpus()).unwrap();

        assert!(built.kgrams.grams("parks,").is_none());
        assert!(built.kgrams.grams("parks").is_some());
        assert!(built.kgrams.grams("well-known").is_some());

        let biwords = built.biwords.as_ref().unwrap();
        assert_eq!(biwords.pair_postings("nation", "park").unwrap(), vec![Posting::with_frequency(0, 1)]);
        // No pair spans two documents.
        assert!(biwords.pair_postings("park", "park").unwrap().is_empty());
        // Every form of "well-known" pairs with the next token.
        for first in ["wellknown", "well", "known"] {
            assert_eq!(biwords.pair_postings(first, "trail").unwrap(), vec![Posting::with_frequency(2, 1)]);
        }
    }

    #[test]
    fn test_weights() {
        let built = IndexBuilder::new(IndexConfig::default()).unwrap().build(&corpus()).unwrap();

        assert_eq!(built.document_count(), 3);
        assert!((built.document_weight(0).unwrap() - 3f64.sqrt()).abs() < 1e-12);
        let tf2 = 1.0 + 2f64.ln();
        let expected = (tf2 * tf2 + 2.0).sqrt();
        assert!((built.document_weight(1).unwrap() - expected).abs() < 1e-12);
        assert_eq!(built.document_weight(3), None);
    }

    #[test]
    fn test_unicode_word_tokenizer_splits_hyphens() {
        let config = IndexConfig {
            tokenizer: TokenizerKind::UnicodeWord,
            stemming: false,
            ..IndexConfig::default()
        };
        let builder = IndexBuilder::new(config).unwrap();
        assert_eq!(builder.tokenizer.name(), "unicode_word");
        let built = builder.build(&corpus()).unwrap();

        assert_eq!(built.index.postings("well").unwrap(), vec![Posting::with_positions(2, vec![1])]);
        assert_eq!(built.index.postings("known").unwrap(), vec![Posting::with_positions(2, vec![2])]);
        assert!(built.index.postings("wellknown").unwrap().is_empty());
        assert!(built.kgrams.grams("well-known").is_none());
        assert_eq!(built.context().search("\"well known trail\"").unwrap().len(), 1);
    }

    #[test]
    fn test_custom_tokenizer_and_normalizer() {
        let builder = IndexBuilder::new(IndexConfig::default())
            .unwrap()
            .with_tokenizer(Arc::new(UnicodeWordTokenizer::new()))
            .with_normalizer(Arc::new(StemmingNormalizer::without_stemming()));
        assert_eq!(builder.normalizer().name(), "stemming");
        let built = builder.build(&corpus()).unwrap();

        // Punctuation-only tokens never reach the index, so "parks" sits at 1 and 4.
        assert_eq!(built.index.postings("parks").unwrap(), vec![Posting::with_positions(1, vec![1, 4])]);
        assert_eq!(built.index.postings("park").unwrap(), vec![Posting::with_positions(0, vec![3])]);
    }

    #[test]
    fn test_biwords_disabled() {
        let config = IndexConfig {
            build_biwords: false,
            ..IndexConfig::default()
        };
        let built = IndexBuilder::new(config).unwrap().build(&corpus()).unwrap();
        assert!(built.biwords.is_none());
    }

    #[test]
    fn test_build_positionless() {
        let builder = IndexBuilder::new(IndexConfig::default()).unwrap();
        let index = builder.build_positionless(&corpus()).unwrap();
        assert_eq!(index.postings("park").unwrap(), vec![
            Posting::with_frequency(0, 1),
            Posting::with_frequency(1, 2),
        ]);
    }

    struct Gapped;

    impl DocumentStore for Gapped {
        fn document(&self, id: DocId) -> Result<Document> {
            Ok(Document::new(id, "", "text"))
        }

        fn documents(&self) -> Box<dyn Iterator<Item = Result<Document>> + '_> {
            Box::new([0, 2].into_iter().map(|id| Ok(Document::new(id, "", "text"))))
        }

        fn corpus_size(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_non_dense_ids_are_rejected() {
        let builder = IndexBuilder::new(IndexConfig::default()).unwrap();
        assert!(matches!(builder.build(&Gapped), Err(PilumError::Index(_))));
    }
}
