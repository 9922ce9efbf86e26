//! Chunk model and chunking machinery.
//!
//! A chunk is a derived, read-only view into a document: a text span with
//! byte offsets and metadata inherited from the source document plus
//! chunk-specific additions (index, total count, overlap and oversize
//! flags).

pub(crate) mod boundary;
mod pipeline;
pub(crate) mod strategies;
pub(crate) mod units;

pub use pipeline::Chunker;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::document::{Document, Metadata};

/// A bounded text span extracted from a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// Identifier of the source document
    pub document_id: String,

    /// Position within the document (0-based, contiguous)
    pub index: u32,

    /// Chunk text content
    pub text: String,

    /// Byte offset of the span start in the document text
    pub start: usize,

    /// Byte offset one past the span end; `start < end <= text.len()`
    pub end: usize,

    /// Inherited and chunk-specific metadata
    pub metadata: ChunkMetadata,
}

/// Metadata stamped onto each chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Total number of chunks produced from the document
    pub total: u32,

    /// Span exceeds the configured chunk size (atomic unit or semantic run)
    pub oversized: bool,

    /// Span shares a prefix with the previous chunk's suffix
    pub overlaps_previous: bool,

    /// Character count of the chunk text
    pub char_count: usize,

    /// SHA-256 hash of the chunk text
    pub hash: String,

    /// Timestamp when the chunk was created
    pub created_at: DateTime<Utc>,

    /// Copy of the source document's metadata
    #[serde(default)]
    pub source: Metadata,
}

impl Chunk {
    /// Create a chunk for a span of `document`, inheriting its metadata.
    pub(crate) fn new(
        document: &Document,
        index: u32,
        total: u32,
        start: usize,
        end: usize,
        oversized: bool,
        overlaps_previous: bool,
    ) -> Self {
        let text = document.text[start..end].to_string();
        let char_count = text.chars().count();
        let hash = calculate_hash(&text);

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            document_id: document.id.clone(),
            index,
            text,
            start,
            end,
            metadata: ChunkMetadata {
                total,
                oversized,
                overlaps_previous,
                char_count,
                hash,
                created_at: Utc::now(),
                source: document.metadata.clone(),
            },
        }
    }
}

/// SHA-256 hash of chunk text, hex-encoded.
fn calculate_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_inherits_document_metadata() {
        let mut doc = Document::with_id("doc-1", "hello world");
        doc.insert_meta("source", serde_json::json!("a.txt"));

        let chunk = Chunk::new(&doc, 0, 1, 0, 5, false, false);
        assert_eq!(chunk.text, "hello");
        assert_eq!(chunk.document_id, "doc-1");
        assert_eq!(chunk.metadata.source["source"], "a.txt");
        assert_eq!(chunk.metadata.char_count, 5);
    }

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(calculate_hash("abc"), calculate_hash("abc"));
        assert_ne!(calculate_hash("abc"), calculate_hash("abd"));
        assert_eq!(calculate_hash("abc").len(), 64);
    }
}
