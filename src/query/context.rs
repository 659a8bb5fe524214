//! Everything a query needs at evaluation time.

use crate::analysis::normalizer::{Normalizer, WildcardNormalizer};
use crate::error::Result;
use crate::index::posting::Posting;
use crate::index::{BiwordIndex, Index, KGramIndex};
use crate::query::parser::QueryParser;

static WILDCARD_NORMALIZER: WildcardNormalizer = WildcardNormalizer;

/// Borrowed view over an index and the auxiliary structures queries consult.
///
/// The normalizer must be the one the index was built with, or query terms
/// will not line up with index terms.
#[derive(Clone, Copy)]
pub struct QueryContext<'a> {
    index: &'a dyn Index,
    normalizer: &'a dyn Normalizer,
    wildcard_normalizer: &'a dyn Normalizer,
    kgrams: Option<&'a KGramIndex>,
    biwords: Option<&'a BiwordIndex>,
}

impl<'a> QueryContext<'a> {
    /// Create a context over an index with no k-gram or biword index attached.
    pub fn new(index: &'a dyn Index, normalizer: &'a dyn Normalizer) -> Self {
        QueryContext {
            index,
            normalizer,
            wildcard_normalizer: &WILDCARD_NORMALIZER,
            kgrams: None,
            biwords: None,
        }
    }

    /// Attach the k-gram index used to resolve wildcards.
    pub fn with_kgrams(mut self, kgrams: &'a KGramIndex) -> Self {
        self.kgrams = Some(kgrams);
        self
    }

    /// Attach a biword index for two-term phrases in positionless evaluation.
    pub fn with_biwords(mut self, biwords: &'a BiwordIndex) -> Self {
        self.biwords = Some(biwords);
        self
    }

    pub fn index(&self) -> &'a dyn Index {
        self.index
    }

    pub fn normalizer(&self) -> &'a dyn Normalizer {
        self.normalizer
    }

    pub fn wildcard_normalizer(&self) -> &'a dyn Normalizer {
        self.wildcard_normalizer
    }

    pub fn kgrams(&self) -> Option<&'a KGramIndex> {
        self.kgrams
    }

    pub fn biwords(&self) -> Option<&'a BiwordIndex> {
        self.biwords
    }

    /// Parse a boolean query and return its positional postings.
    pub fn search(&self, query: &str) -> Result<Vec<Posting>> {
        QueryParser::new().parse(query)?.postings(self)
    }
}
