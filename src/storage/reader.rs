//! Reads an index written by [`DiskIndexWriter`](crate::storage::DiskIndexWriter).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use log::{debug, info};
use memmap2::{Mmap, MmapOptions};

use crate::analysis::normalizer::StemmingNormalizer;
use crate::config::{CONFIG_FILE, IndexConfig};
use crate::error::{PilumError, Result};
use crate::index::posting::Posting;
use crate::index::{Index, KGramIndex};
use crate::query::context::QueryContext;
use crate::query::scorer::{DocumentWeights, RankedScorer};
use crate::storage::structured::StructReader;
use crate::storage::weights::DiskDocumentWeights;
use crate::storage::{KGRAMS_FILE, POSTINGS_FILE, VOCAB_FILE, WEIGHTS_FILE};

/// Counts read from disk are not trusted for preallocation beyond this.
const PREALLOCATE_LIMIT: usize = 1 << 16;

/// An index opened from disk.
///
/// The vocabulary and the k-gram table are loaded on open; postings are
/// decoded on demand from a memory map of `postings.bin`; document weights
/// are read on demand from `docWeights.bin`.
pub struct DiskIndex {
    directory: PathBuf,
    config: IndexConfig,
    vocabulary: Vec<String>,
    offsets: AHashMap<String, u64>,
    postings: Option<Mmap>,
    kgrams: KGramIndex,
    weights: DiskDocumentWeights,
    normalizer: StemmingNormalizer,
}

impl fmt::Debug for DiskIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiskIndex")
            .field("directory", &self.directory)
            .field("config", &self.config)
            .field("terms", &self.vocabulary.len())
            .field("documents", &self.weights.document_count())
            .finish()
    }
}

impl DiskIndex {
    /// Open the index stored in `directory`.
    ///
    /// Fails with an index error when a file is missing or cannot be decoded.
    /// `config.json` is optional; defaults apply without it.
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();

        let config_path = directory.join(CONFIG_FILE);
        let config = if config_path.exists() {
            IndexConfig::from_file(&config_path)?
        } else {
            debug!("no {CONFIG_FILE} in {}, using defaults", directory.display());
            IndexConfig::default()
        };

        let postings = map_postings(&directory.join(POSTINGS_FILE))?;
        let postings_len = postings.as_ref().map_or(0, |map| map.len() as u64);

        let (vocabulary, offsets) = load_vocabulary(&directory.join(VOCAB_FILE))?;
        if let Some((term, offset)) = offsets.iter().find(|(_, offset)| **offset >= postings_len) {
            return Err(PilumError::index(format!(
                "malformed {VOCAB_FILE}: offset {offset} of '{term}' is past the end of {POSTINGS_FILE}"
            )));
        }

        let kgrams = load_kgrams(&directory.join(KGRAMS_FILE))?;
        let weights = DiskDocumentWeights::open(directory.join(WEIGHTS_FILE))?;

        info!(
            "opened index {}: {} terms, {} documents, k = {}",
            directory.display(),
            vocabulary.len(),
            weights.document_count(),
            kgrams.k()
        );

        Ok(DiskIndex {
            normalizer: StemmingNormalizer::with_stemming(config.stemming),
            directory,
            config,
            vocabulary,
            offsets,
            postings,
            kgrams,
            weights,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn kgram_index(&self) -> &KGramIndex {
        &self.kgrams
    }

    pub fn weights(&self) -> &DiskDocumentWeights {
        &self.weights
    }

    pub fn document_count(&self) -> usize {
        self.weights.document_count()
    }

    /// The normalizer matching the one the index was built with.
    pub fn normalizer(&self) -> &StemmingNormalizer {
        &self.normalizer
    }

    /// Query context with the k-gram index attached.
    pub fn context(&self) -> QueryContext<'_> {
        QueryContext::new(self, &self.normalizer).with_kgrams(&self.kgrams)
    }

    pub fn scorer(&self) -> RankedScorer<'_> {
        RankedScorer::new(self, &self.normalizer, &self.weights)
    }

    fn decode(&self, term: &str, with_positions: bool) -> Result<Vec<Posting>> {
        let (Some(&offset), Some(map)) = (self.offsets.get(term), self.postings.as_ref()) else {
            return Ok(Vec::new());
        };

        let mut reader = StructReader::new(Cursor::new(&map[..]));
        reader.seek_to(offset)?;
        let document_frequency = reader.read_u32()? as usize;

        let mut postings = Vec::with_capacity(document_frequency.min(PREALLOCATE_LIMIT));
        let mut doc_id = 0u32;
        for _ in 0..document_frequency {
            let gap = reader.read_u32()?;
            doc_id = doc_id.checked_add(gap).ok_or_else(|| {
                PilumError::storage(format!("document id overflow in postings of '{term}'"))
            })?;
            let frequency = reader.read_u32()?;
            if with_positions {
                let positions = reader.read_gaps(frequency as usize)?;
                postings.push(Posting::with_positions(doc_id, positions));
            } else {
                reader.skip(u64::from(frequency) * 4)?;
                postings.push(Posting::with_frequency(doc_id, frequency));
            }
        }
        Ok(postings)
    }
}

impl Index for DiskIndex {
    fn postings(&self, term: &str) -> Result<Vec<Posting>> {
        self.decode(term, true)
    }

    fn positionless_postings(&self, term: &str) -> Result<Vec<Posting>> {
        self.decode(term, false)
    }

    fn vocabulary(&self) -> Vec<String> {
        self.vocabulary.clone()
    }

    fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path)
        .map_err(|e| PilumError::index(format!("missing index file {}: {e}", path.display())))
}

fn malformed(path: &Path, error: PilumError) -> PilumError {
    PilumError::index(format!("malformed index file {}: {error}", path.display()))
}

fn map_postings(path: &Path) -> Result<Option<Mmap>> {
    let file = open_file(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(None);
    }
    // The file is written once and never modified while mapped.
    let mmap = unsafe {
        MmapOptions::new()
            .map(&file)
            .map_err(|e| PilumError::storage(format!("failed to mmap {}: {e}", path.display())))?
    };
    Ok(Some(mmap))
}

fn load_vocabulary(path: &Path) -> Result<(Vec<String>, AHashMap<String, u64>)> {
    let mut reader = StructReader::new(BufReader::new(open_file(path)?));
    let parse = |reader: &mut StructReader<BufReader<File>>| -> Result<_> {
        let size = reader.read_u32()? as usize;
        let mut vocabulary = Vec::with_capacity(size.min(PREALLOCATE_LIMIT));
        let mut offsets = AHashMap::with_capacity(size.min(PREALLOCATE_LIMIT));
        for _ in 0..size {
            let term = reader.read_string()?;
            let offset = reader.read_u64()?;
            offsets.insert(term.clone(), offset);
            vocabulary.push(term);
        }
        Ok((vocabulary, offsets))
    };
    parse(&mut reader).map_err(|e| malformed(path, e))
}

fn load_kgrams(path: &Path) -> Result<KGramIndex> {
    let mut reader = StructReader::new(BufReader::new(open_file(path)?));
    let parse = |reader: &mut StructReader<BufReader<File>>| -> Result<_> {
        let k = reader.read_u32()? as usize;
        let entries = reader.read_u32()?;
        let mut term_grams = BTreeMap::new();
        for _ in 0..entries {
            let key = reader.read_string()?;
            let count = reader.read_u32()?;
            let mut grams = BTreeSet::new();
            for _ in 0..count {
                grams.insert(reader.read_string()?);
            }
            term_grams.insert(key, grams);
        }
        let count = reader.read_u32()?;
        let mut all_grams = BTreeSet::new();
        for _ in 0..count {
            all_grams.insert(reader.read_string()?);
        }
        Ok(KGramIndex::from_parts(k, term_grams, all_grams))
    };
    parse(&mut reader).map_err(|e| malformed(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::InMemoryCorpus;
    use crate::index::IndexBuilder;
    use std::fs;
    use tempfile::TempDir;

    fn write_index(dir: &Path) {
        let corpus = InMemoryCorpus::from_texts(&[
            ("a", "national park service"),
            ("b", "park park ranger"),
        ]);
        let built = IndexBuilder::new(IndexConfig::default().with_kgram_size(3))
            .unwrap()
            .build(&corpus)
            .unwrap();
        built.write_to(dir).unwrap();
    }

    #[test]
    fn test_open_and_decode() {
        let dir = TempDir::new().unwrap();
        write_index(dir.path());

        let index = DiskIndex::open(dir.path()).unwrap();
        assert_eq!(index.config().kgram_size, 3);
        assert_eq!(index.kgram_index().k(), 3);
        assert_eq!(index.document_count(), 2);
        assert_eq!(index.vocabulary(), vec!["nation", "park", "ranger", "servic"]);
        assert_eq!(
            index.postings("park").unwrap(),
            vec![Posting::with_positions(0, vec![2]), Posting::with_positions(1, vec![1, 2])]
        );
        assert_eq!(
            index.positionless_postings("park").unwrap(),
            vec![Posting::with_frequency(0, 1), Posting::with_frequency(1, 2)]
        );
        assert!(index.postings("lake").unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_fails_open() {
        let dir = TempDir::new().unwrap();
        write_index(dir.path());
        fs::remove_file(dir.path().join(KGRAMS_FILE)).unwrap();

        assert!(matches!(DiskIndex::open(dir.path()), Err(PilumError::Index(_))));
    }

    #[test]
    fn test_truncated_vocabulary_fails_open() {
        let dir = TempDir::new().unwrap();
        write_index(dir.path());
        let path = dir.path().join(VOCAB_FILE);
        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

        assert!(matches!(DiskIndex::open(dir.path()), Err(PilumError::Index(_))));
    }

    #[test]
    fn test_config_is_optional() {
        let dir = TempDir::new().unwrap();
        write_index(dir.path());
        fs::remove_file(dir.path().join(CONFIG_FILE)).unwrap();

        let index = DiskIndex::open(dir.path()).unwrap();
        assert_eq!(index.config(), &IndexConfig::default());
        // The k-gram length still comes from the k-gram file.
        assert_eq!(index.kgram_index().k(), 3);
    }
}
