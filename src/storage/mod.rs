//! On-disk index storage.
//!
//! An index directory holds four binary artifacts plus the build configuration:
//!
//! | file             | content                                                    |
//! |------------------|------------------------------------------------------------|
//! | `postings.bin`   | gap-encoded postings of every term, in vocabulary order    |
//! | `vocab.bin`      | sorted vocabulary with each term's offset into postings    |
//! | `kgrams.bin`     | the k-gram table and the set of all distinct grams         |
//! | `docWeights.bin` | one f64 length `L(d)` per document id                      |
//! | `config.json`    | the [`IndexConfig`](crate::config::IndexConfig) of the build |

pub mod reader;
pub mod structured;
pub mod weights;
pub mod writer;

pub use reader::DiskIndex;
pub use structured::{StructReader, StructWriter};
pub use weights::DiskDocumentWeights;
pub use writer::DiskIndexWriter;

pub const POSTINGS_FILE: &str = "postings.bin";
pub const VOCAB_FILE: &str = "vocab.bin";
pub const KGRAMS_FILE: &str = "kgrams.bin";
pub const WEIGHTS_FILE: &str = "docWeights.bin";
