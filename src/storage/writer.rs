//! Writes an index to its on-disk files.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::info;

use crate::config::{CONFIG_FILE, IndexConfig};
use crate::error::{PilumError, Result};
use crate::index::{Index, KGramIndex};
use crate::storage::structured::StructWriter;
use crate::storage::{KGRAMS_FILE, POSTINGS_FILE, VOCAB_FILE, WEIGHTS_FILE};

/// Serializes an index into a directory.
///
/// Postings are gap encoded: within a term, each document id is stored as
/// the difference from the previous one, and within a posting each position
/// as the difference from the previous position. The first of each run is
/// absolute.
#[derive(Debug, Clone)]
pub struct DiskIndexWriter {
    directory: PathBuf,
}

impl DiskIndexWriter {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        DiskIndexWriter {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write every artifact, creating the directory if needed.
    pub fn write(
        &self,
        index: &dyn Index,
        kgrams: &KGramIndex,
        weights: &[f64],
        config: &IndexConfig,
    ) -> Result<()> {
        let start = Instant::now();
        let vocabulary = index.vocabulary();
        check_positional(index, &vocabulary)?;

        fs::create_dir_all(&self.directory).map_err(|e| {
            PilumError::storage(format!(
                "failed to create index directory {}: {e}",
                self.directory.display()
            ))
        })?;

        let offsets = self.write_postings(index, &vocabulary)?;
        self.write_vocabulary(&vocabulary, &offsets)?;
        self.write_kgrams(kgrams)?;
        self.write_weights(weights)?;
        config.save(self.directory.join(CONFIG_FILE))?;

        info!(
            "wrote index to {}: {} terms, {} documents in {:?}",
            self.directory.display(),
            vocabulary.len(),
            weights.len(),
            start.elapsed()
        );
        Ok(())
    }

    fn create(&self, name: &str) -> Result<StructWriter<BufWriter<File>>> {
        let path = self.directory.join(name);
        let file = File::create(&path).map_err(|e| {
            PilumError::storage(format!("failed to create {}: {e}", path.display()))
        })?;
        Ok(StructWriter::new(BufWriter::new(file)))
    }

    /// Returns the starting offset of every term, in vocabulary order.
    fn write_postings(&self, index: &dyn Index, vocabulary: &[String]) -> Result<Vec<u64>> {
        let mut writer = self.create(POSTINGS_FILE)?;
        let mut offsets = Vec::with_capacity(vocabulary.len());

        for term in vocabulary {
            offsets.push(writer.position());
            let postings = index.postings(term)?;
            writer.write_len(postings.len())?;

            let mut previous_doc = 0;
            for posting in &postings {
                let gap = posting.doc_id.checked_sub(previous_doc).ok_or_else(|| {
                    PilumError::index(format!("postings of '{term}' are not ordered by document"))
                })?;
                writer.write_u32(gap)?;
                writer.write_len(posting.positions.len())?;
                writer.write_gaps(&posting.positions)?;
                previous_doc = posting.doc_id;
            }
        }

        writer.finish()?;
        Ok(offsets)
    }

    fn write_vocabulary(&self, vocabulary: &[String], offsets: &[u64]) -> Result<()> {
        let mut writer = self.create(VOCAB_FILE)?;
        writer.write_len(vocabulary.len())?;
        for (term, offset) in vocabulary.iter().zip(offsets) {
            writer.write_string(term)?;
            writer.write_u64(*offset)?;
        }
        writer.finish()?;
        Ok(())
    }

    fn write_kgrams(&self, kgrams: &KGramIndex) -> Result<()> {
        let mut writer = self.create(KGRAMS_FILE)?;
        writer.write_len(kgrams.k())?;
        writer.write_len(kgrams.len())?;
        for (key, grams) in kgrams.entries() {
            writer.write_string(key)?;
            writer.write_len(grams.len())?;
            for gram in grams {
                writer.write_string(gram)?;
            }
        }

        let all = kgrams.distinct_grams();
        writer.write_len(all.len())?;
        for gram in all {
            writer.write_string(gram)?;
        }
        writer.finish()?;
        Ok(())
    }

    fn write_weights(&self, weights: &[f64]) -> Result<()> {
        let mut writer = self.create(WEIGHTS_FILE)?;
        for &weight in weights {
            writer.write_f64(weight)?;
        }
        writer.finish()?;
        Ok(())
    }
}

/// Fail before anything is written when a posting lacks its positions.
fn check_positional(index: &dyn Index, vocabulary: &[String]) -> Result<()> {
    for term in vocabulary {
        for posting in index.postings(term)? {
            if posting.positions.len() != posting.frequency as usize {
                return Err(PilumError::index(format!(
                    "posting of '{term}' in document {} has no positions; only positional indexes can be written",
                    posting.doc_id
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::PositionlessIndex;
    use tempfile::TempDir;

    #[test]
    fn test_positionless_index_is_rejected_before_writing() {
        let dir = TempDir::new().unwrap();
        let mut index = PositionlessIndex::new();
        index.add_term("lake", 0, 1).unwrap();
        index.add_term("park", 0, 2).unwrap();

        let target = dir.path().join("index");
        let writer = DiskIndexWriter::new(&target);
        let result = writer.write(&index, &KGramIndex::new(2), &[1.0], &IndexConfig::default());
        assert!(matches!(result, Err(PilumError::Index(_))));
        assert!(!target.exists());
    }

    #[test]
    fn test_rejection_leaves_existing_files_untouched() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(POSTINGS_FILE), b"previous").unwrap();
        let mut index = PositionlessIndex::new();
        index.add_term("park", 0, 1).unwrap();

        let writer = DiskIndexWriter::new(dir.path());
        assert!(writer.write(&index, &KGramIndex::new(2), &[1.0], &IndexConfig::default()).is_err());
        assert_eq!(fs::read(dir.path().join(POSTINGS_FILE)).unwrap(), b"previous");
        assert!(!dir.path().join(VOCAB_FILE).exists());
    }

    #[test]
    fn test_creates_every_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("index");
        let writer = DiskIndexWriter::new(&target);
        writer
            .write(
                &crate::index::PositionalInvertedIndex::new(),
                &KGramIndex::new(2),
                &[],
                &IndexConfig::default(),
            )
            .unwrap();

        assert_eq!(writer.directory(), target.as_path());
        for name in [POSTINGS_FILE, VOCAB_FILE, KGRAMS_FILE, WEIGHTS_FILE, CONFIG_FILE] {
            assert!(target.join(name).is_file(), "{name}");
        }
    }
}
