//! Command line argument parsing for the Pilum CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::TokenizerKind;

/// Pilum - a positional inverted index with boolean, wildcard and ranked queries
#[derive(Parser, Debug, Clone)]
#[command(name = "pilum")]
#[command(about = "Build and query a positional inverted index over a directory of documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PilumArgs {
    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PilumArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Index a corpus directory and write the index to disk
    Build(BuildArgs),

    /// Run a boolean query against an on-disk index
    Query(QueryArgs),

    /// Run a ranked (tf-idf) query against an on-disk index
    Rank(RankArgs),

    /// List the vocabulary of an on-disk index
    Vocab(VocabArgs),

    /// Show the normalized terms of a token
    Stem(StemArgs),
}

/// Arguments for building an index
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Directory of .txt / .json documents
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Directory to write the index to
    #[arg(value_name = "INDEX")]
    pub index: PathBuf,

    /// Configuration file (JSON); flags below override it
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// K-gram length for wildcard resolution
    #[arg(short, long)]
    pub kgram_size: Option<usize>,

    /// Do not stem terms
    #[arg(long)]
    pub no_stemming: bool,

    /// Tokenizer applied to document text
    #[arg(short, long, value_enum)]
    pub tokenizer: Option<TokenizerKind>,
}

/// Arguments for a boolean query
#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Directory of .txt / .json documents the index was built from
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Index directory
    #[arg(value_name = "INDEX")]
    pub index: PathBuf,

    /// Query string, e.g. `"national park" + wash*`
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Evaluate without positions
    #[arg(long)]
    pub positionless: bool,
}

/// Arguments for a ranked query
#[derive(Parser, Debug, Clone)]
pub struct RankArgs {
    /// Directory of .txt / .json documents the index was built from
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Index directory
    #[arg(value_name = "INDEX")]
    pub index: PathBuf,

    /// Free-text query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results (default: top_k from the index config)
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for listing the vocabulary
#[derive(Parser, Debug, Clone)]
pub struct VocabArgs {
    /// Index directory
    #[arg(value_name = "INDEX")]
    pub index: PathBuf,

    /// Maximum number of terms to print
    #[arg(short, long, default_value = "1000")]
    pub limit: usize,
}

/// Arguments for normalizing a token
#[derive(Parser, Debug, Clone)]
pub struct StemArgs {
    /// Raw token
    #[arg(value_name = "TOKEN")]
    pub token: String,

    /// Do not stem
    #[arg(long)]
    pub no_stemming: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
