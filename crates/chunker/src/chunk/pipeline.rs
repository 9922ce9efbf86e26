//! Chunker facade: strategy dispatch, overlap application, metadata stamping.

use std::sync::Arc;

use textchunk_core::{AppError, AppResult};

use super::strategies;
use super::units::UnitMap;
use super::{boundary, Chunk};
use crate::config::{ChunkConfig, SizeUnit, Strategy};
use crate::document::Document;
use crate::similarity::{self, SimilarityProvider};

/// Chunker facade.
///
/// Validates the configuration once at construction, dispatches to the
/// selected strategy per call, pipes the result through the overlap and
/// boundary engine, and stamps each chunk with its index, the total count,
/// and metadata inherited from the document.
///
/// Chunking is side-effect free and performs no I/O; cloning is cheap, so
/// one `Chunker` can be shared across concurrent documents.
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkConfig,
    similarity: Option<Arc<dyn SimilarityProvider>>,
}

impl Chunker {
    /// Create a chunker, failing fast on invalid configuration.
    ///
    /// For the semantic strategy the similarity provider is resolved here,
    /// so an unknown provider identifier is rejected at configuration time,
    /// not at chunk time.
    pub fn new(config: ChunkConfig) -> AppResult<Self> {
        config.validate()?;

        let similarity = match &config.strategy {
            Strategy::Semantic(params) => Some(similarity::create_provider(&params.provider)?),
            _ => None,
        };

        Ok(Self { config, similarity })
    }

    /// Create a chunker with an explicitly injected similarity provider,
    /// bypassing the provider factory. Intended for tests and embedders
    /// that bring their own similarity capability.
    pub fn with_provider(
        config: ChunkConfig,
        provider: Arc<dyn SimilarityProvider>,
    ) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            similarity: Some(provider),
        })
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Chunk a document into an ordered sequence of chunks.
    ///
    /// Identical inputs yield identical spans; the only await point is the
    /// external similarity call of the semantic strategy.
    pub async fn chunk(&self, document: &Document) -> AppResult<Vec<Chunk>> {
        if document.text.is_empty() {
            tracing::debug!("Document '{}' is empty, producing no chunks", document.id);
            return Ok(Vec::new());
        }

        let units = UnitMap::new(&document.text, self.config.unit);

        let raw = match &self.config.strategy {
            Strategy::Fixed => strategies::fixed::split(&units, &self.config)?,
            Strategy::Recursive { separators } => {
                strategies::recursive::split(&document.text, &units, &self.config, separators)?
            }
            Strategy::Semantic(params) => {
                let provider = self.similarity.as_deref().ok_or_else(|| {
                    AppError::InvalidConfig(
                        "semantic strategy requires a similarity provider".to_string(),
                    )
                })?;
                strategies::semantic::split(&document.text, &units, &self.config, params, provider)
                    .await?
            }
        };

        // Fixed windows over characters are the one place intra-word cuts
        // are allowed
        let word_atomic = !(matches!(self.config.strategy, Strategy::Fixed)
            && self.config.unit == SizeUnit::Characters);

        let spans = boundary::finalize(raw, &units, &self.config, word_atomic)?;

        let total = spans.len() as u32;
        let chunks: Vec<Chunk> = spans
            .iter()
            .enumerate()
            .map(|(i, span)| {
                let oversized = span.oversized
                    || units.span_units(span.start, span.end) > self.config.chunk_size;
                Chunk::new(
                    document,
                    i as u32,
                    total,
                    span.start,
                    span.end,
                    oversized,
                    span.overlaps_previous,
                )
            })
            .collect();

        tracing::info!(
            "Chunked document '{}' into {} chunks (strategy: {}, size: {}, overlap: {})",
            document.id,
            chunks.len(),
            self.config.strategy.name(),
            self.config.chunk_size,
            self.config.overlap
        );

        Ok(chunks)
    }
}
