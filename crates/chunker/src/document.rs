//! In-memory document model that chunking operates on.

use serde::{Deserialize, Serialize};

/// Scalar metadata attached to documents and inherited by chunks.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A loaded document: identifier, full text, and source metadata.
///
/// Owned by the caller that loaded it; chunking only reads it and never
/// mutates text or metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier (UUID v4 unless supplied by the loader)
    pub id: String,

    /// Full text content, immutable once loaded
    pub text: String,

    /// Source metadata: filename, extension, content type, size, etc.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    /// Create a document with a generated identifier and empty metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    /// Create a document with an explicit identifier.
    pub fn with_id(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    /// Attach metadata, replacing any existing map.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Insert a single metadata entry.
    pub fn insert_meta(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.metadata.insert(key.into(), value);
    }
}
