//! Overlap and boundary engine shared by all strategies.
//!
//! Takes the raw tiling a strategy produced and expands each span's start
//! backward by the configured overlap, clamped at the previous raw span's
//! start and at the document start. For strategies that treat words as
//! atomic, an expanded start falling inside a word is moved to the next
//! word boundary so no chunk begins mid-word.

use textchunk_core::{AppError, AppResult};

use super::strategies::RawSpan;
use super::units::UnitMap;
use crate::config::ChunkConfig;

/// A final span with its overlap bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FinalSpan {
    pub start: usize,
    pub end: usize,
    pub oversized: bool,
    pub overlaps_previous: bool,
}

/// Apply overlap expansion and boundary refinement to raw strategy output.
///
/// Invariants on the result: spans are sorted by start;
/// `spans[i+1].start <= spans[i].end` when overlap > 0 and
/// `spans[i+1].start == spans[i].end` when overlap == 0; no span is empty.
pub(crate) fn finalize(
    raw: Vec<RawSpan>,
    units: &UnitMap,
    config: &ChunkConfig,
    word_atomic: bool,
) -> AppResult<Vec<FinalSpan>> {
    let mut out = Vec::with_capacity(raw.len());

    for (i, span) in raw.iter().enumerate() {
        if span.start >= span.end {
            return Err(AppError::DegenerateChunk(format!(
                "strategy produced an empty span at index {} ({}..{})",
                i, span.start, span.end
            )));
        }
        debug_assert!(
            i == 0 || raw[i - 1].end == span.start,
            "raw spans must tile without gaps"
        );

        let mut start = span.start;
        let mut overlaps_previous = false;

        if i > 0 && config.overlap > 0 {
            let mut expanded = units.back_by(span.start, config.overlap);
            if word_atomic {
                expanded = units.ceil_word_boundary(expanded);
            }
            // Never re-overlap past the previous segment's start
            start = expanded.max(raw[i - 1].start).min(span.start);
            overlaps_previous = start < span.start;
        }

        out.push(FinalSpan {
            start,
            end: span.end,
            oversized: span.oversized,
            overlaps_previous,
        });
    }

    for w in out.windows(2) {
        debug_assert!(w[1].start <= w[0].end);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SizeUnit, Strategy};

    fn config(chunk_size: usize, overlap: usize) -> ChunkConfig {
        ChunkConfig {
            chunk_size,
            overlap,
            unit: SizeUnit::Characters,
            strategy: Strategy::Fixed,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_overlap_keeps_tiling() {
        let text = "a".repeat(30);
        let units = UnitMap::new(&text, SizeUnit::Characters);
        let raw = vec![RawSpan::new(0, 10), RawSpan::new(10, 20), RawSpan::new(20, 30)];

        let spans = finalize(raw, &units, &config(10, 0), false).unwrap();
        assert_eq!(spans[1].start, spans[0].end);
        assert_eq!(spans[2].start, spans[1].end);
        assert!(spans.iter().all(|s| !s.overlaps_previous));
    }

    #[test]
    fn test_overlap_expands_backward() {
        let text = "a".repeat(26);
        let units = UnitMap::new(&text, SizeUnit::Characters);
        let raw = vec![RawSpan::new(0, 10), RawSpan::new(10, 18), RawSpan::new(18, 26)];

        let spans = finalize(raw, &units, &config(10, 2), false).unwrap();
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[1].start, 8);
        assert_eq!(spans[2].start, 16);
        assert!(spans[1].overlaps_previous);
        assert_eq!(spans[1].start, spans[0].end - 2);
    }

    #[test]
    fn test_expansion_clamped_at_previous_start() {
        let text = "a".repeat(12);
        let units = UnitMap::new(&text, SizeUnit::Characters);
        // Second raw span is much shorter than the overlap
        let raw = vec![RawSpan::new(0, 2), RawSpan::new(2, 12)];

        let spans = finalize(raw, &units, &config(10, 8), false).unwrap();
        // Would expand to offset -6; clamped at the previous span's start
        assert_eq!(spans[1].start, 0);
    }

    #[test]
    fn test_word_atomic_start_not_mid_word() {
        let text = "alpha beta gamma delta epsilon";
        let units = UnitMap::new(text, SizeUnit::Characters);
        let raw = vec![RawSpan::new(0, 16), RawSpan::new(16, 30)];

        let spans = finalize(raw, &units, &config(20, 3), true).unwrap();
        // Expanding 3 chars back from 16 lands inside "gamma"; the start
        // moves forward to the next boundary instead
        assert_eq!(spans[1].start, 16);
    }

    #[test]
    fn test_empty_raw_span_is_degenerate() {
        let text = "abc";
        let units = UnitMap::new(text, SizeUnit::Characters);
        let raw = vec![RawSpan::new(0, 0)];

        let err = finalize(raw, &units, &config(10, 0), false).unwrap_err();
        assert!(matches!(err, AppError::DegenerateChunk(_)));
    }
}
