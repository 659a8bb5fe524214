//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PilumArgs};
use crate::document::DocId;
use crate::error::Result;

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn print_human(&self);
}

/// Result structure for an index build.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildResult {
    pub index_path: String,
    pub documents: usize,
    pub terms: usize,
    pub kgram_keys: usize,
    pub duration_ms: u64,
}

/// One document matched by a boolean query.
#[derive(Debug, Serialize, Deserialize)]
pub struct BooleanHit {
    pub doc_id: DocId,
    pub title: String,
    pub positions: Vec<u32>,
}

/// Result structure for a boolean query.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResults {
    pub query: String,
    pub parsed: String,
    pub total_hits: usize,
    pub duration_ms: u64,
    pub hits: Vec<BooleanHit>,
}

/// One document returned by a ranked query.
#[derive(Debug, Serialize, Deserialize)]
pub struct RankedHit {
    pub rank: usize,
    pub doc_id: DocId,
    pub title: String,
    pub score: f64,
}

/// Result structure for a ranked query.
#[derive(Debug, Serialize, Deserialize)]
pub struct RankResults {
    pub query: String,
    pub duration_ms: u64,
    pub hits: Vec<RankedHit>,
}

/// Result structure for a vocabulary listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct VocabResult {
    pub total_terms: usize,
    pub terms: Vec<String>,
}

/// Result structure for token normalization.
#[derive(Debug, Serialize, Deserialize)]
pub struct StemResult {
    pub token: String,
    pub terms: Vec<String>,
}

impl HumanOutput for BuildResult {
    fn print_human(&self) {
        println!("Index written to {}", self.index_path);
        println!("  Documents:  {}", self.documents);
        println!("  Terms:      {}", self.terms);
        println!("  K-gram keys: {}", self.kgram_keys);
        println!("  Time:       {} ms", self.duration_ms);
    }
}

impl HumanOutput for QueryResults {
    fn print_human(&self) {
        println!("Query: {}", self.parsed);
        println!("═══════════════");
        for hit in &self.hits {
            if hit.positions.is_empty() {
                println!("{:>6}  {}", hit.doc_id, hit.title);
            } else {
                println!("{:>6}  {}  {:?}", hit.doc_id, hit.title, hit.positions);
            }
        }
        println!();
        println!("{} documents ({} ms)", self.total_hits, self.duration_ms);
    }
}

impl HumanOutput for RankResults {
    fn print_human(&self) {
        println!("Ranked results for: {}", self.query);
        println!("═══════════════");
        for hit in &self.hits {
            println!(
                "{:>3}. (Score: {:.6}) [{}] {}",
                hit.rank, hit.score, hit.doc_id, hit.title
            );
        }
        if self.hits.is_empty() {
            println!("No matching documents.");
        }
        println!("({} ms)", self.duration_ms);
    }
}

impl HumanOutput for VocabResult {
    fn print_human(&self) {
        for term in &self.terms {
            println!("{term}");
        }
        println!();
        println!("{} of {} terms shown", self.terms.len(), self.total_terms);
    }
}

impl HumanOutput for StemResult {
    fn print_human(&self) {
        println!("{} -> {}", self.token, self.terms.join(", "));
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &PilumArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PilumArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}
