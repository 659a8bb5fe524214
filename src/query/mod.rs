//! Query processing: boolean queries over postings lists and ranked retrieval.
//!
//! Boolean queries are parsed by [`QueryParser`] into a [`QueryComponent`]
//! tree and evaluated against a [`QueryContext`]. Ranked queries go through
//! [`RankedScorer`].

pub mod boolean;
pub mod collector;
pub mod component;
pub mod context;
pub mod merge;
pub mod parser;
pub mod phrase;
pub mod scorer;
pub mod term;
pub mod wildcard;

pub use self::collector::{ScoredDocument, TopDocsCollector};
pub use self::component::{PostingsMode, QueryComponent};
pub use self::context::QueryContext;
pub use self::parser::QueryParser;
pub use self::phrase::PhraseLiteral;
pub use self::scorer::{DocumentWeights, RankedScorer};
pub use self::term::TermLiteral;
pub use self::wildcard::WildcardLiteral;
