//! Chunk command handler.

use clap::Args;
use std::path::PathBuf;
use textchunk::{Chunker, DocumentLoader, TextLoader};
use textchunk_core::{config::AppConfig, AppResult};

use super::{write_json, ChunkOptions};

/// Chunk a single file
#[derive(Args, Debug)]
pub struct ChunkCommand {
    /// File to chunk
    pub path: PathBuf,

    #[command(flatten)]
    pub options: ChunkOptions,

    /// Write JSON output to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ChunkCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Chunking file {:?}", self.path);

        let chunk_config = self.options.to_config(&config.chunking)?;
        let chunker = Chunker::new(chunk_config)?;

        let document = TextLoader.load(&self.path)?;
        let chunks = chunker.chunk(&document).await?;

        if let Some(ref output) = self.output {
            let value = serde_json::to_value(&chunks)?;
            write_json(output, &value)?;
        } else if self.json {
            println!("{}", serde_json::to_string_pretty(&chunks)?);
        } else {
            for chunk in &chunks {
                let mut flags = String::new();
                if chunk.metadata.oversized {
                    flags.push_str(" oversized");
                }
                if chunk.metadata.overlaps_previous {
                    flags.push_str(" overlap");
                }
                println!(
                    "[{}/{}] {}..{} ({} chars{})",
                    chunk.index + 1,
                    chunk.metadata.total,
                    chunk.start,
                    chunk.end,
                    chunk.metadata.char_count,
                    flags
                );
            }
            println!("{} chunks from {:?}", chunks.len(), self.path);
        }

        Ok(())
    }
}
