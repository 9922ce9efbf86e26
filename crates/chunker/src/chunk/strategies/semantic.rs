//! Semantic similarity strategy.
//!
//! Scores each pair of adjacent sentences with the injected similarity
//! provider and inserts a boundary wherever the score drops below the
//! configured threshold. Runs shorter than the minimum size are merged
//! forward. The provider call is the only suspension point of a chunking
//! call and is guarded by the configured timeout.

use std::time::Duration;

use textchunk_core::{AppError, AppResult};

use super::RawSpan;
use crate::chunk::units::UnitMap;
use crate::config::{ChunkConfig, SemanticParams};
use crate::similarity::SimilarityProvider;

pub(crate) async fn split(
    text: &str,
    units: &UnitMap,
    config: &ChunkConfig,
    params: &SemanticParams,
    provider: &dyn SimilarityProvider,
) -> AppResult<Vec<RawSpan>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let sentences = units.sentence_spans();
    if sentences.len() <= 1 {
        return Ok(vec![RawSpan::new(0, text.len())]);
    }

    let mut segments: Vec<(usize, usize)> = Vec::new();
    let mut segment_start = 0usize;

    for pair in sentences.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let score = score_pair(
            provider,
            &text[a.0..a.1],
            &text[b.0..b.1],
            config.similarity_timeout,
        )
        .await?;

        if score < params.threshold {
            segments.push((segment_start, b.0));
            segment_start = b.0;
        }
    }
    segments.push((segment_start, text.len()));

    let before_merge = segments.len();
    let segments = merge_small_forward(segments, units, params.min_chunk_units);

    tracing::debug!(
        "Semantic strategy produced {} segments from {} sentences ({} merged away)",
        segments.len(),
        sentences.len(),
        before_merge - segments.len()
    );

    Ok(segments
        .into_iter()
        .map(|(start, end)| RawSpan::new(start, end))
        .collect())
}

/// Score one adjacent pair, degrading timeouts, provider errors, and
/// out-of-range values to `SimilarityUnavailable`.
async fn score_pair(
    provider: &dyn SimilarityProvider,
    a: &str,
    b: &str,
    timeout: Duration,
) -> AppResult<f64> {
    let score = match tokio::time::timeout(timeout, provider.similarity(a, b)).await {
        Ok(Ok(score)) => score,
        Ok(Err(err)) => {
            return Err(match err {
                AppError::SimilarityUnavailable(_) => err,
                other => AppError::SimilarityUnavailable(format!(
                    "provider '{}' failed: {}",
                    provider.name(),
                    other
                )),
            })
        }
        Err(_) => {
            return Err(AppError::SimilarityUnavailable(format!(
                "provider '{}' timed out after {:?}",
                provider.name(),
                timeout
            )))
        }
    };

    if !score.is_finite() || !(0.0..=1.0).contains(&score) {
        return Err(AppError::SimilarityUnavailable(format!(
            "provider '{}' returned out-of-range score {}",
            provider.name(),
            score
        )));
    }

    Ok(score)
}

/// Merge segments shorter than `min` units forward into the following
/// segment; a trailing short segment folds backward instead.
fn merge_small_forward(
    segments: Vec<(usize, usize)>,
    units: &UnitMap,
    min: usize,
) -> Vec<(usize, usize)> {
    if min == 0 || segments.len() <= 1 {
        return segments;
    }

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(segments.len());
    let mut carry: Option<usize> = None;

    let last_index = segments.len() - 1;
    for (i, &(start, end)) in segments.iter().enumerate() {
        let start = carry.take().unwrap_or(start);
        if units.span_units(start, end) < min && i < last_index {
            carry = Some(start);
        } else {
            merged.push((start, end));
        }
    }

    if merged.len() > 1 {
        let (last_start, last_end) = *merged.last().expect("non-empty");
        if units.span_units(last_start, last_end) < min {
            merged.pop();
            let (prev_start, _) = merged.pop().expect("len > 1");
            merged.push((prev_start, last_end));
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::strategies::assert_tiling;
    use crate::config::{SizeUnit, Strategy};
    use crate::similarity::providers::ConstantProvider;

    fn config(threshold: f64) -> ChunkConfig {
        ChunkConfig {
            chunk_size: 1000,
            overlap: 0,
            unit: SizeUnit::Characters,
            strategy: Strategy::Semantic(SemanticParams::new("constant", threshold)),
            ..Default::default()
        }
    }

    fn params(threshold: f64) -> SemanticParams {
        SemanticParams::new("constant", threshold)
    }

    #[tokio::test]
    async fn test_high_similarity_yields_single_span() {
        let text = "First sentence. Second sentence. Third sentence.";
        let units = UnitMap::new(text, SizeUnit::Characters);
        let provider = ConstantProvider::new(0.9);

        let spans = split(text, &units, &config(0.5), &params(0.5), &provider)
            .await
            .unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0], RawSpan::new(0, text.len()));
    }

    #[tokio::test]
    async fn test_low_similarity_splits_every_sentence() {
        let text = "First sentence. Second sentence. Third sentence.";
        let units = UnitMap::new(text, SizeUnit::Characters);
        let provider = ConstantProvider::new(0.1);

        let spans = split(text, &units, &config(0.5), &params(0.5), &provider)
            .await
            .unwrap();

        assert_eq!(spans.len(), 3);
        assert_tiling(&spans, text.len());
    }

    #[tokio::test]
    async fn test_out_of_range_score_degrades() {
        let text = "One. Two.";
        let units = UnitMap::new(text, SizeUnit::Characters);
        let provider = ConstantProvider::new(1.5);

        let err = split(text, &units, &config(0.5), &params(0.5), &provider)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SimilarityUnavailable(_)));
    }

    #[tokio::test]
    async fn test_micro_segments_merge_forward() {
        let text = "A. B. C. This is a much longer closing sentence with many words.";
        let units = UnitMap::new(text, SizeUnit::Characters);
        // Everything splits, then short segments fold into the next one
        let provider = ConstantProvider::new(0.0);

        let spans = split(
            text,
            &units,
            &config(0.5),
            &params(0.5).with_min_chunk_units(10),
            &provider,
        )
        .await
        .unwrap();

        assert_tiling(&spans, text.len());
        for span in &spans {
            assert!(text[span.start..span.end].chars().count() >= 10);
        }
    }

    #[test]
    fn test_merge_small_forward_trailing_segment() {
        let text = "0123456789AB";
        let units = UnitMap::new(text, SizeUnit::Characters);
        let merged = merge_small_forward(vec![(0, 10), (10, 12)], &units, 4);
        assert_eq!(merged, vec![(0, 12)]);
    }
}
