//! Documents and the document store consumed by the indexer.
//!
//! The index only ever sees document ids and token streams; titles and
//! content live in a [`DocumentStore`].

pub mod corpus;
#[allow(clippy::module_inception)]
pub mod document;

pub use corpus::{DirectoryCorpus, InMemoryCorpus};
pub use document::Document;

use crate::error::Result;

/// Document identifier. Ids are dense, starting at 0, in corpus order.
pub type DocId = u32;

/// Lookup service for the documents an index was built from.
pub trait DocumentStore {
    /// Fetch one document by id.
    fn document(&self, id: DocId) -> Result<Document>;

    /// Iterate over every document in ascending id order.
    fn documents(&self) -> Box<dyn Iterator<Item = Result<Document>> + '_>;

    /// Number of documents in the corpus.
    fn corpus_size(&self) -> usize;
}
