//! Text analysis for Pilum.
//!
//! Raw document text is split into tokens by a [`Tokenizer`], and each token is
//! turned into zero or more index terms by a [`Normalizer`]. The same normalizer
//! must be used when indexing and when resolving query terms.

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::{Normalizer, StemmingNormalizer, WildcardNormalizer};
pub use tokenizer::{Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer};
