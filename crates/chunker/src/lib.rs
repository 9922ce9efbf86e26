//! Document chunking library.
//!
//! Splits loaded documents into bounded, overlapping, metadata-preserving
//! segments suitable for downstream embedding and retrieval. Three
//! strategies are supported (fixed, recursive, semantic), all sharing one
//! overlap and boundary engine.

pub mod batch;
pub mod chunk;
pub mod config;
pub mod document;
pub mod loader;
pub mod similarity;

// Re-export commonly used types
pub use batch::{process_directory, BatchReport};
pub use chunk::{Chunk, ChunkMetadata, Chunker};
pub use config::{ChunkConfig, SemanticParams, Separators, SizeUnit, Strategy};
pub use document::{Document, Metadata};
pub use loader::{DocumentLoader, TextLoader};
pub use similarity::SimilarityProvider;
