//! Command implementations for the Pilum CLI.

use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::analysis::normalizer::{Normalizer, StemmingNormalizer};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::IndexConfig;
use crate::document::{DirectoryCorpus, DocumentStore};
use crate::error::{PilumError, Result};
use crate::index::{Index, IndexBuilder};
use crate::query::QueryParser;
use crate::storage::DiskIndex;

/// Execute a CLI command.
pub fn execute_command(args: PilumArgs) -> Result<()> {
    match &args.command {
        Command::Build(build_args) => build_index(build_args, &args),
        Command::Query(query_args) => run_query(query_args, &args),
        Command::Rank(rank_args) => run_ranked(rank_args, &args),
        Command::Vocab(vocab_args) => show_vocabulary(vocab_args, &args),
        Command::Stem(stem_args) => stem_token(stem_args, &args),
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Resolve the build configuration: file first, then flag overrides.
fn build_config(args: &BuildArgs) -> Result<IndexConfig> {
    let mut config = match &args.config {
        Some(path) => IndexConfig::from_file(path)?,
        None => IndexConfig::default(),
    };
    if let Some(kgram_size) = args.kgram_size {
        config.kgram_size = kgram_size;
    }
    if args.no_stemming {
        config.stemming = false;
    }
    if let Some(tokenizer) = args.tokenizer {
        config.tokenizer = tokenizer;
    }
    // Biwords live only in memory; an index written to disk never holds them.
    config.build_biwords = false;
    config.validate()?;
    Ok(config)
}

/// Index a corpus directory and write it to disk.
fn build_index(args: &BuildArgs, cli_args: &PilumArgs) -> Result<()> {
    let start = Instant::now();
    let config = build_config(args)?;
    debug!("build configuration: {config:?}");

    let corpus = DirectoryCorpus::open(&args.corpus)?;
    info!(
        "indexing {} documents from {}",
        corpus.corpus_size(),
        args.corpus.display()
    );

    let built = IndexBuilder::new(config)?.build(&corpus)?;
    built.write_to(&args.index)?;

    output_result(
        &BuildResult {
            index_path: args.index.display().to_string(),
            documents: built.document_count(),
            terms: built.index.len(),
            kgram_keys: built.kgrams.len(),
            duration_ms: elapsed_ms(start),
        },
        cli_args,
    )
}

fn open_index(path: &Path) -> Result<DiskIndex> {
    if !path.is_dir() {
        return Err(PilumError::index(format!(
            "index directory not found: {}",
            path.display()
        )));
    }
    DiskIndex::open(path)
}

/// Evaluate a boolean query.
fn run_query(args: &QueryArgs, cli_args: &PilumArgs) -> Result<()> {
    let corpus = DirectoryCorpus::open(&args.corpus)?;
    let index = open_index(&args.index)?;

    let start = Instant::now();
    let query = QueryParser::new().parse(&args.query)?;
    debug!("parsed query: {query}");

    let ctx = index.context();
    let postings = if args.positionless {
        query.positionless_postings(&ctx)?
    } else {
        query.postings(&ctx)?
    };

    let mut hits = Vec::with_capacity(postings.len());
    for posting in postings {
        let document = corpus.document(posting.doc_id)?;
        hits.push(BooleanHit {
            doc_id: posting.doc_id,
            title: document.title,
            positions: posting.positions,
        });
    }

    output_result(
        &QueryResults {
            query: args.query.clone(),
            parsed: query.to_string(),
            total_hits: hits.len(),
            duration_ms: elapsed_ms(start),
            hits,
        },
        cli_args,
    )
}

/// Evaluate a ranked query.
fn run_ranked(args: &RankArgs, cli_args: &PilumArgs) -> Result<()> {
    let corpus = DirectoryCorpus::open(&args.corpus)?;
    let index = open_index(&args.index)?;
    let limit = args.limit.unwrap_or(index.config().top_k);

    let start = Instant::now();
    let results = index.scorer().search(&args.query, limit)?;

    let mut hits = Vec::with_capacity(results.len());
    for (i, result) in results.into_iter().enumerate() {
        let document = corpus.document(result.doc_id)?;
        hits.push(RankedHit {
            rank: i + 1,
            doc_id: result.doc_id,
            title: document.title,
            score: result.score,
        });
    }

    output_result(
        &RankResults {
            query: args.query.clone(),
            duration_ms: elapsed_ms(start),
            hits,
        },
        cli_args,
    )
}

/// Print the first terms of the vocabulary.
fn show_vocabulary(args: &VocabArgs, cli_args: &PilumArgs) -> Result<()> {
    let index = open_index(&args.index)?;
    let vocabulary = index.vocabulary();

    output_result(
        &VocabResult {
            total_terms: vocabulary.len(),
            terms: vocabulary.into_iter().take(args.limit).collect(),
        },
        cli_args,
    )
}

/// Show what the index normalizer makes of a token.
fn stem_token(args: &StemArgs, cli_args: &PilumArgs) -> Result<()> {
    let normalizer = StemmingNormalizer::with_stemming(!args.no_stemming);

    output_result(
        &StemResult {
            token: args.token.clone(),
            terms: normalizer.normalize(&args.token),
        },
        cli_args,
    )
}
