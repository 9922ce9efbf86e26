//! Batch orchestration across a directory of documents.
//!
//! Applies the chunker facade to every matching file, isolating per-file
//! failures: one bad file never aborts the batch. Files are processed
//! concurrently with a bounded worker pool and results are collected as
//! they complete.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use walkdir::WalkDir;

use textchunk_core::{AppError, AppResult};

use crate::chunk::{Chunk, Chunker};
use crate::loader::DocumentLoader;

/// Default bound on concurrent file tasks.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Per-file outcomes of a batch run, keyed by file path.
///
/// The aggregate counts are derived from the mapping, not stored.
#[derive(Debug)]
pub struct BatchReport {
    pub results: BTreeMap<PathBuf, AppResult<Vec<Chunk>>>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.results.values().filter(|r| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.values().filter(|r| r.is_err()).count()
    }
}

/// Chunk every matching file under `dir`.
///
/// `file_types` filters by extension (leading dots and case are ignored).
/// Load or chunk errors for one file are captured in its report entry;
/// sibling files proceed regardless.
pub async fn process_directory(
    dir: &Path,
    file_types: &[String],
    chunker: &Chunker,
    loader: &dyn DocumentLoader,
    concurrency: usize,
) -> AppResult<BatchReport> {
    if !dir.is_dir() {
        return Err(AppError::Loader(format!(
            "directory not found: {:?}",
            dir
        )));
    }

    let files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && matches_type(e.path(), file_types))
        .map(|e| e.into_path())
        .collect();

    tracing::info!(
        "Batch chunking {} files under {:?} (types: {:?})",
        files.len(),
        dir,
        file_types
    );

    let results: BTreeMap<PathBuf, AppResult<Vec<Chunk>>> = stream::iter(files)
        .map(|path| async move {
            let outcome = chunk_file(&path, chunker, loader).await;
            if let Err(ref err) = outcome {
                tracing::warn!("Batch entry {:?} failed: {}", path, err);
            }
            (path, outcome)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let report = BatchReport { results };
    tracing::info!(
        "Batch complete: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );

    Ok(report)
}

async fn chunk_file(
    path: &Path,
    chunker: &Chunker,
    loader: &dyn DocumentLoader,
) -> AppResult<Vec<Chunk>> {
    let document = loader.load(path)?;
    chunker.chunk(&document).await
}

fn matches_type(path: &Path, file_types: &[String]) -> bool {
    if file_types.is_empty() {
        return true;
    }
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    file_types
        .iter()
        .any(|t| t.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChunkConfig;
    use crate::loader::TextLoader;
    use std::fs;
    use std::io::Write;

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_partial_failure_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            fs::write(
                dir.path().join(name),
                "Readable report text. ".repeat(20),
            )
            .unwrap();
        }
        // A corrupted file that the loader rejects
        let mut corrupt = fs::File::create(dir.path().join("d.docx")).unwrap();
        corrupt.write_all(&[0xff, 0xfe, 0x00, 0x42]).unwrap();
        // A file outside the requested types
        fs::write(dir.path().join("notes.log"), "ignored").unwrap();

        let chunker = Chunker::new(ChunkConfig {
            chunk_size: 100,
            overlap: 0,
            ..Default::default()
        })
        .unwrap();

        let report = process_directory(
            dir.path(),
            &types(&["pdf", "docx"]),
            &chunker,
            &TextLoader,
            DEFAULT_CONCURRENCY,
        )
        .await
        .unwrap();

        assert_eq!(report.len(), 4);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed(), 1);

        let failure = report
            .results
            .get(&dir.path().join("d.docx"))
            .unwrap()
            .as_ref()
            .unwrap_err();
        assert!(matches!(failure, AppError::Loader(_)));
    }

    #[tokio::test]
    async fn test_empty_directory_yields_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let chunker = Chunker::new(ChunkConfig::default()).unwrap();

        let report = process_directory(dir.path(), &types(&["txt"]), &chunker, &TextLoader, 4)
            .await
            .unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let chunker = Chunker::new(ChunkConfig::default()).unwrap();
        let result = process_directory(
            Path::new("no/such/dir"),
            &types(&["txt"]),
            &chunker,
            &TextLoader,
            4,
        )
        .await;
        assert!(matches!(result, Err(AppError::Loader(_))));
    }

    #[tokio::test]
    async fn test_no_type_filter_takes_everything() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "some text here").unwrap();
        fs::write(dir.path().join("b.md"), "# heading\n\nbody").unwrap();

        let chunker = Chunker::new(ChunkConfig::default()).unwrap();
        let report = process_directory(dir.path(), &[], &chunker, &TextLoader, 4)
            .await
            .unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report.succeeded(), 2);
    }

    #[test]
    fn test_matches_type_normalizes() {
        assert!(matches_type(Path::new("a.PDF"), &types(&["pdf"])));
        assert!(matches_type(Path::new("a.pdf"), &types(&[".pdf"])));
        assert!(!matches_type(Path::new("a.txt"), &types(&["pdf"])));
        assert!(!matches_type(Path::new("README"), &types(&["pdf"])));
    }
}
