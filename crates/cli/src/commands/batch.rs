//! Batch command handler.

use clap::Args;
use std::path::PathBuf;
use textchunk::{batch, Chunker, TextLoader};
use textchunk_core::{config::AppConfig, AppResult};

use super::{write_json, ChunkOptions};

/// Chunk every matching file in a directory
#[derive(Args, Debug)]
pub struct BatchCommand {
    /// Directory to process
    pub dir: PathBuf,

    /// File extensions to include (repeatable); all files when omitted
    #[arg(long = "file-type")]
    pub file_types: Vec<String>,

    /// Maximum concurrent file tasks
    #[arg(long, default_value_t = batch::DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    #[command(flatten)]
    pub options: ChunkOptions,

    /// Write JSON output to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl BatchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Batch chunking {:?}", self.dir);

        let chunk_config = self.options.to_config(&config.chunking)?;
        let chunker = Chunker::new(chunk_config)?;

        let report = batch::process_directory(
            &self.dir,
            &self.file_types,
            &chunker,
            &TextLoader,
            self.concurrency,
        )
        .await?;

        if self.output.is_some() || self.json {
            let mut files = serde_json::Map::new();
            for (path, outcome) in &report.results {
                let entry = match outcome {
                    Ok(chunks) => serde_json::json!({
                        "status": "ok",
                        "chunks": chunks,
                    }),
                    Err(err) => serde_json::json!({
                        "status": "error",
                        "error": err.to_string(),
                    }),
                };
                files.insert(path.to_string_lossy().into_owned(), entry);
            }
            let value = serde_json::json!({
                "files": files,
                "succeeded": report.succeeded(),
                "failed": report.failed(),
            });

            if let Some(ref output) = self.output {
                write_json(output, &value)?;
            } else {
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
        } else {
            for (path, outcome) in &report.results {
                match outcome {
                    Ok(chunks) => println!("{:?}: {} chunks", path, chunks.len()),
                    Err(err) => println!("{:?}: FAILED ({})", path, err),
                }
            }
            println!(
                "{} files: {} ok, {} failed",
                report.len(),
                report.succeeded(),
                report.failed()
            );
        }

        Ok(())
    }
}
