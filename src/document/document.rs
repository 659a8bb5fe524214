//! Document structure.

use serde::{Deserialize, Serialize};

use crate::document::DocId;

/// A single document of the corpus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Dense document id.
    pub id: DocId,
    /// Display title.
    pub title: String,
    /// Text that gets indexed.
    pub content: String,
}

impl Document {
    /// Create a new document.
    pub fn new<T: Into<String>, C: Into<String>>(id: DocId, title: T, content: C) -> Self {
        Document {
            id,
            title: title.into(),
            content: content.into(),
        }
    }
}
