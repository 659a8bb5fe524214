//! Configuration for building and querying an index.
//!
//! # Examples
//!
//! ```
//! use pilum::config::IndexConfig;
//!
//! let config = IndexConfig::default();
//! assert_eq!(config.kgram_size, 2);
//! assert_eq!(config.top_k, 10);
//!
//! let mut trigram = IndexConfig::default();
//! trigram.kgram_size = 3;
//! assert!(trigram.validate().is_ok());
//! ```

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{PilumError, Result};

/// Name of the file the configuration is persisted to inside an index directory.
pub const CONFIG_FILE: &str = "config.json";

/// How document text is split into raw tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Split on whitespace; punctuation and hyphens stay inside tokens.
    #[default]
    Whitespace,
    /// Split on Unicode word boundaries; hyphenated words become separate tokens.
    UnicodeWord,
}

/// Configuration shared by the index builder, the disk writer and the query side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Length of the character n-grams stored in the k-gram index.
    pub kgram_size: usize,
    /// Whether to build the biword index during the indexing pass.
    pub build_biwords: bool,
    /// Number of documents returned by ranked retrieval.
    pub top_k: usize,
    /// Whether the term normalizer applies English stemming.
    pub stemming: bool,
    /// Tokenizer applied to document text.
    pub tokenizer: TokenizerKind,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            kgram_size: 2,
            build_biwords: true,
            top_k: 10,
            stemming: true,
            tokenizer: TokenizerKind::Whitespace,
        }
    }
}

impl IndexConfig {
    /// Load a configuration from a JSON file. Missing fields take their default value.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PilumError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: IndexConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write this configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Set the k-gram length.
    pub fn with_kgram_size(mut self, kgram_size: usize) -> Self {
        self.kgram_size = kgram_size;
        self
    }

    /// Set the number of ranked results.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if self.kgram_size == 0 {
            return Err(PilumError::config("kgram_size must be at least 1"));
        }
        if self.top_k == 0 {
            return Err(PilumError::config("top_k must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IndexConfig::default();
        assert_eq!(config.kgram_size, 2);
        assert!(config.build_biwords);
        assert_eq!(config.top_k, 10);
        assert!(config.stemming);
        assert_eq!(config.tokenizer, TokenizerKind::Whitespace);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let config = IndexConfig::default().with_kgram_size(0);
        assert!(matches!(config.validate(), Err(PilumError::Config(_))));

        let config = IndexConfig::default().with_top_k(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: IndexConfig = serde_json::from_str(r#"{"kgram_size": 3}"#).unwrap();
        assert_eq!(config.kgram_size, 3);
        assert_eq!(config.top_k, 10);

        let config: IndexConfig = serde_json::from_str(r#"{"tokenizer": "unicode_word"}"#).unwrap();
        assert_eq!(config.tokenizer, TokenizerKind::UnicodeWord);
        assert!(serde_json::from_str::<IndexConfig>(r#"{"tokenizer": "regex"}"#).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let config = IndexConfig::default().with_kgram_size(3).with_top_k(5);
        config.save(&path).unwrap();

        let loaded = IndexConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
