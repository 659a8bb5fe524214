//! Tokenizers that split raw text into raw tokens.
//!
//! # Examples
//!
//! ```
//! use pilum::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens = tokenizer.tokenize("Hello  world");
//! assert_eq!(tokens, vec!["Hello", "world"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

/// Trait for tokenizers that convert text into raw tokens.
///
/// Token order is significant: the indexer assigns positions in the order
/// tokens are returned.
pub trait Tokenizer: Send + Sync {
    /// Split the given text into raw tokens.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Get the name of this tokenizer.
    fn name(&self) -> &'static str;
}

/// A tokenizer that splits text on whitespace.
///
/// Punctuation stays attached to the token; stripping it is the normalizer's job.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace().collect()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// A tokenizer that splits on Unicode word boundaries (UAX #29).
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new Unicode word tokenizer.
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_words().collect()
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
