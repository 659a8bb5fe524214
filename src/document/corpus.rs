//! Document store implementations.
//!
//! - [`InMemoryCorpus`] keeps every document in a vector; handy for tests.
//! - [`DirectoryCorpus`] reads `.txt` and `.json` files from a directory. Files
//!   are ordered by name and numbered from 0, so the same directory always
//!   yields the same ids.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;

use crate::document::{DocId, Document, DocumentStore};
use crate::error::{PilumError, Result};

/// A corpus held entirely in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCorpus {
    documents: Vec<Document>,
}

impl InMemoryCorpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from `(title, content)` pairs; ids follow slice order.
    pub fn from_texts<T: AsRef<str>, C: AsRef<str>>(texts: &[(T, C)]) -> Self {
        let documents = texts
            .iter()
            .enumerate()
            .map(|(id, (title, content))| {
                Document::new(id as DocId, title.as_ref(), content.as_ref())
            })
            .collect();
        InMemoryCorpus { documents }
    }

    /// Append a document and return its id.
    pub fn add<T: Into<String>, C: Into<String>>(&mut self, title: T, content: C) -> DocId {
        let id = self.documents.len() as DocId;
        self.documents.push(Document::new(id, title, content));
        id
    }
}

impl DocumentStore for InMemoryCorpus {
    fn document(&self, id: DocId) -> Result<Document> {
        self.documents
            .get(id as usize)
            .cloned()
            .ok_or_else(|| PilumError::not_found(format!("document {id}")))
    }

    fn documents(&self) -> Box<dyn Iterator<Item = Result<Document>> + '_> {
        Box::new(self.documents.iter().cloned().map(Ok))
    }

    fn corpus_size(&self) -> usize {
        self.documents.len()
    }
}

#[derive(Deserialize)]
struct JsonDocument {
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
}

/// A corpus backed by a directory of `.txt` and `.json` files.
#[derive(Clone, Debug)]
pub struct DirectoryCorpus {
    directory: PathBuf,
    files: Vec<PathBuf>,
}

impl DirectoryCorpus {
    /// Scan a directory for documents. Subdirectories and other extensions are ignored.
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        if !directory.is_dir() {
            return Err(PilumError::analysis(format!(
                "corpus path is not a directory: {}",
                directory.display()
            )));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&directory)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            match path.extension().and_then(|e| e.to_str()) {
                Some("txt") | Some("json") => files.push(path),
                _ => debug!("skipping non-document file {}", path.display()),
            }
        }
        files.sort();

        if files.is_empty() {
            warn!("no documents found in {}", directory.display());
        }

        Ok(DirectoryCorpus { directory, files })
    }

    /// Directory this corpus was loaded from.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn load(&self, id: DocId, path: &Path) -> Result<Document> {
        let raw = fs::read_to_string(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            let parsed: JsonDocument = serde_json::from_str(&raw).map_err(|e| {
                PilumError::analysis(format!("invalid JSON document {}: {e}", path.display()))
            })?;
            let title = if parsed.title.is_empty() {
                stem
            } else {
                parsed.title
            };
            Ok(Document::new(id, title, parsed.body))
        } else {
            Ok(Document::new(id, stem, raw))
        }
    }
}

impl DocumentStore for DirectoryCorpus {
    fn document(&self, id: DocId) -> Result<Document> {
        let path = self
            .files
            .get(id as usize)
            .ok_or_else(|| PilumError::not_found(format!("document {id}")))?;
        self.load(id, path)
    }

    fn documents(&self) -> Box<dyn Iterator<Item = Result<Document>> + '_> {
        Box::new(
            self.files
                .iter()
                .enumerate()
                .map(|(id, path)| self.load(id as DocId, path)),
        )
    }

    fn corpus_size(&self) -> usize {
        self.files.len()
    }
}
