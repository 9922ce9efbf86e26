//! Command handlers and shared chunking options.

mod batch;
mod chunk;

pub use batch::BatchCommand;
pub use chunk::ChunkCommand;

use clap::Args;
use std::path::Path;
use textchunk::{ChunkConfig, SemanticParams, Separators, SizeUnit, Strategy};
use textchunk_core::{config::ChunkDefaults, AppError, AppResult};

/// Chunking parameters shared by the chunk and batch commands.
///
/// Unset flags fall back to the defaults from the workspace config file.
#[derive(Args, Debug)]
pub struct ChunkOptions {
    /// Chunking strategy (fixed, recursive, semantic)
    #[arg(long)]
    pub strategy: Option<String>,

    /// Target chunk size in the configured unit
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Overlap between consecutive chunks
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Size unit (characters, tokens)
    #[arg(long)]
    pub unit: Option<String>,

    /// Separator preset for the recursive strategy
    /// (plain, markdown, python, javascript)
    #[arg(long)]
    pub separators: Option<String>,

    /// Similarity provider for the semantic strategy
    #[arg(long)]
    pub provider: Option<String>,

    /// Similarity threshold in [0,1] for the semantic strategy
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Merge semantic segments shorter than this many units forward
    #[arg(long)]
    pub min_chunk: Option<usize>,
}

impl ChunkOptions {
    /// Build a validated `ChunkConfig` from these flags and the workspace
    /// defaults.
    pub fn to_config(&self, defaults: &ChunkDefaults) -> AppResult<ChunkConfig> {
        let strategy_name = self.strategy.as_deref().unwrap_or(&defaults.strategy);
        let unit = SizeUnit::parse(self.unit.as_deref().unwrap_or(&defaults.unit))?;

        let strategy = match strategy_name {
            "fixed" => Strategy::Fixed,
            "recursive" => Strategy::Recursive {
                separators: match &self.separators {
                    Some(name) => Separators::preset(name)?,
                    None => Separators::default(),
                },
            },
            "semantic" => {
                let provider = self
                    .provider
                    .as_deref()
                    .unwrap_or(&defaults.similarity_provider);
                let threshold = self.threshold.unwrap_or(defaults.similarity_threshold);
                Strategy::Semantic(
                    SemanticParams::new(provider, threshold)
                        .with_min_chunk_units(self.min_chunk.unwrap_or(0)),
                )
            }
            other => {
                return Err(AppError::InvalidConfig(format!(
                    "Unknown strategy: '{}'. Supported strategies: fixed, recursive, semantic",
                    other
                )))
            }
        };

        let config = ChunkConfig {
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
            overlap: self.overlap.unwrap_or(defaults.overlap),
            unit,
            strategy,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }
}

/// Write pretty-printed JSON to a file.
pub(crate) fn write_json(path: &Path, value: &serde_json::Value) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)
        .map_err(|e| AppError::Config(format!("Failed to write output to {:?}: {}", path, e)))?;
    tracing::info!("Wrote output to {:?}", path);
    Ok(())
}
