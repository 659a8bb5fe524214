//! Inverted indexes.
//!
//! [`Index`] is the read interface the query engine and the ranked scorer work
//! against. It is implemented by the two in-memory variants
//! ([`PositionalInvertedIndex`], [`PositionlessIndex`]) and by the on-disk
//! [`crate::storage::DiskIndex`].

pub mod biword;
pub mod builder;
pub mod kgram;
pub mod positional;
pub mod positionless;
pub mod posting;

pub use biword::BiwordIndex;
pub use builder::{BuiltIndex, IndexBuilder};
pub use kgram::KGramIndex;
pub use positional::PositionalInvertedIndex;
pub use positionless::PositionlessIndex;
pub use posting::Posting;

use crate::error::Result;

/// Read access to a term → postings mapping.
///
/// Unknown terms are not an error: they yield an empty postings list.
pub trait Index {
    /// Full postings list of a term, positions included.
    fn postings(&self, term: &str) -> Result<Vec<Posting>>;

    /// Postings list of a term with positions stripped; frequencies are kept.
    fn positionless_postings(&self, term: &str) -> Result<Vec<Posting>>;

    /// Every distinct term, sorted ascending.
    fn vocabulary(&self) -> Vec<String>;

    /// Number of distinct terms.
    fn vocabulary_size(&self) -> usize {
        self.vocabulary().len()
    }
}
