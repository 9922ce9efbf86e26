//! Document loading from the filesystem.
//!
//! Loading is a thin adapter in front of chunking: a `DocumentLoader`
//! returns text content plus best-effort metadata, and failures always
//! surface as `Loader` errors, never as silently empty documents.

use std::fs;
use std::path::Path;

use textchunk_core::{AppError, AppResult};

use crate::document::{Document, Metadata};

/// Loader collaborator contract.
pub trait DocumentLoader: Send + Sync {
    fn load(&self, path: &Path) -> AppResult<Document>;
}

/// Content kind classification by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Markdown,
    Code,
    PlainText,
    Unknown,
}

impl ContentKind {
    /// Detect content kind from file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("md") | Some("markdown") => Self::Markdown,
            Some("rs") | Some("py") | Some("js") | Some("ts") | Some("go") | Some("c")
            | Some("cpp") | Some("java") | Some("sh") | Some("yaml") | Some("yml")
            | Some("json") | Some("toml") => Self::Code,
            Some("txt") => Self::PlainText,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Code => "code",
            Self::PlainText => "text",
            Self::Unknown => "unknown",
        }
    }
}

/// Filesystem loader for UTF-8 text files.
#[derive(Debug, Clone, Default)]
pub struct TextLoader;

impl DocumentLoader for TextLoader {
    fn load(&self, path: &Path) -> AppResult<Document> {
        let bytes = fs::read(path)
            .map_err(|e| AppError::Loader(format!("failed to read {:?}: {}", path, e)))?;

        let text = String::from_utf8(bytes)
            .map_err(|_| AppError::Loader(format!("{:?} is not valid UTF-8", path)))?;

        if text.contains('\0') {
            tracing::warn!("Skipping likely binary file: {:?}", path);
            return Err(AppError::Loader(format!(
                "{:?} looks like a binary file",
                path
            )));
        }

        let mut metadata = Metadata::new();
        metadata.insert(
            "source".to_string(),
            serde_json::json!(path.to_string_lossy()),
        );
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            metadata.insert("filename".to_string(), serde_json::json!(name));
        }
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            metadata.insert("extension".to_string(), serde_json::json!(ext));
        }
        metadata.insert(
            "content_type".to_string(),
            serde_json::json!(ContentKind::from_path(path).as_str()),
        );
        metadata.insert("size_bytes".to_string(), serde_json::json!(text.len()));

        tracing::debug!("Loaded {:?} ({} bytes)", path, text.len());

        Ok(Document::new(text).with_metadata(metadata))
    }
}
