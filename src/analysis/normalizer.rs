//! Term normalizers.
//!
//! A normalizer turns one raw token into zero or more normalized terms. Two
//! implementations are provided:
//!
//! - [`StemmingNormalizer`] produces index terms: edge punctuation and quotes are
//!   stripped, hyphenated tokens yield the joined form followed by each part, and
//!   every form is lowercased and stemmed.
//! - [`WildcardNormalizer`] produces the minimal form used for the k-gram index
//!   and for wildcard patterns: case-folded and quote-stripped, never stemmed,
//!   `*` preserved.
//!
//! # Examples
//!
//! ```
//! use pilum::analysis::normalizer::{Normalizer, StemmingNormalizer, WildcardNormalizer};
//!
//! let normalizer = StemmingNormalizer::new();
//! assert_eq!(normalizer.normalize("Running,"), vec!["run"]);
//!
//! let wildcard = WildcardNormalizer::new();
//! assert_eq!(wildcard.normalize("\"Wash*\""), vec!["wash*"]);
//! ```

use std::fmt;

use rust_stemmers::{Algorithm, Stemmer};

/// Trait for turning a raw token into normalized terms.
pub trait Normalizer: Send + Sync {
    /// Normalize a raw token. The result is ordered and may be empty.
    fn normalize(&self, raw: &str) -> Vec<String>;

    /// Get the name of this normalizer.
    fn name(&self) -> &'static str;
}

fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}')
}

/// Normalizer producing stemmed index terms.
pub struct StemmingNormalizer {
    stemmer: Option<Stemmer>,
}

impl fmt::Debug for StemmingNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StemmingNormalizer")
            .field("stemming", &self.stemmer.is_some())
            .finish()
    }
}

impl Default for StemmingNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl StemmingNormalizer {
    /// Create a normalizer using the English Snowball stemmer.
    pub fn new() -> Self {
        StemmingNormalizer {
            stemmer: Some(Stemmer::create(Algorithm::English)),
        }
    }

    /// Create a normalizer that case-folds and strips but does not stem.
    pub fn without_stemming() -> Self {
        StemmingNormalizer { stemmer: None }
    }

    /// Create a normalizer with stemming switched on or off.
    pub fn with_stemming(stemming: bool) -> Self {
        if stemming {
            Self::new()
        } else {
            Self::without_stemming()
        }
    }

    fn stem(&self, word: &str) -> String {
        match &self.stemmer {
            Some(stemmer) => stemmer.stem(word).into_owned(),
            None => word.to_string(),
        }
    }
}

impl Normalizer for StemmingNormalizer {
    fn normalize(&self, raw: &str) -> Vec<String> {
        let cleaned: String = raw
            .trim_matches(|c: char| !c.is_alphanumeric())
            .chars()
            .filter(|c| !is_quote(*c))
            .collect::<String>()
            .to_lowercase();

        if cleaned.is_empty() {
            return Vec::new();
        }

        let mut forms = Vec::new();
        if cleaned.contains('-') {
            let parts: Vec<&str> = cleaned.split('-').filter(|p| !p.is_empty()).collect();
            forms.push(parts.concat());
            forms.extend(parts.iter().map(|p| p.to_string()));
        } else {
            forms.push(cleaned);
        }

        let mut terms: Vec<String> = Vec::with_capacity(forms.len());
        for form in forms {
            let term = self.stem(&form);
            if !term.is_empty() && !terms.contains(&term) {
                terms.push(term);
            }
        }
        terms
    }

    fn name(&self) -> &'static str {
        "stemming"
    }
}

/// Minimal normalizer for k-gram keys and wildcard patterns.
#[derive(Clone, Debug, Default)]
pub struct WildcardNormalizer;

impl WildcardNormalizer {
    /// Create a new wildcard normalizer.
    pub fn new() -> Self {
        WildcardNormalizer
    }
}

impl Normalizer for WildcardNormalizer {
    fn normalize(&self, raw: &str) -> Vec<String> {
        let cleaned: String = raw
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '*')
            .chars()
            .filter(|c| !is_quote(*c))
            .collect::<String>()
            .to_lowercase();

        if cleaned.is_empty() {
            Vec::new()
        } else {
            vec![cleaned]
        }
    }

    fn name(&self) -> &'static str {
        "wildcard"
    }
}
