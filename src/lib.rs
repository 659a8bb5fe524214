//! # Pilum
//!
//! A single-node positional inverted index for Rust.
//!
//! ## Features
//!
//! - Positional and positionless in-memory indexes built in one pass
//! - K-gram index with two-phase wildcard resolution
//! - Boolean queries with AND, OR, phrases and wildcards
//! - Compact gap-encoded on-disk format with random-access reads
//! - tf-idf ranked retrieval with cosine length normalization
//!
//! ## Example
//!
//! ```
//! use pilum::config::IndexConfig;
//! use pilum::document::InMemoryCorpus;
//! use pilum::index::IndexBuilder;
//!
//! let corpus = InMemoryCorpus::from_texts(&[
//!     ("Yosemite", "Yosemite National Park"),
//!     ("Zion", "Zion national park in Utah"),
//! ]);
//! let built = IndexBuilder::new(IndexConfig::default())?.build(&corpus)?;
//!
//! let hits = built.context().search("\"national park\" + utah")?;
//! assert_eq!(hits.len(), 2);
//!
//! let ranked = built.scorer().search("utah", 10)?;
//! assert_eq!(ranked[0].doc_id, 1);
//! # Ok::<(), pilum::error::PilumError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod storage;

pub mod prelude {
    pub use crate::analysis::{Normalizer, StemmingNormalizer, WildcardNormalizer};
    pub use crate::config::IndexConfig;
    pub use crate::document::{DirectoryCorpus, DocId, Document, DocumentStore, InMemoryCorpus};
    pub use crate::error::{PilumError, Result};
    pub use crate::index::{BuiltIndex, Index, IndexBuilder, KGramIndex, Posting};
    pub use crate::query::{QueryComponent, QueryContext, QueryParser, RankedScorer};
    pub use crate::storage::DiskIndex;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
