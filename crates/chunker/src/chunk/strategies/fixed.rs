//! Fixed-size windowing strategy.

use textchunk_core::AppResult;

use super::RawSpan;
use crate::chunk::units::UnitMap;
use crate::config::ChunkConfig;

/// Split into fixed windows of `chunk_size` units stepping by
/// `chunk_size - overlap`.
///
/// The raw tiling emits the first window at full size and every following
/// segment at step size; backward expansion by the boundary engine then
/// restores each later window to `chunk_size`. The last window is truncated
/// to the document end, never padded.
pub(crate) fn split(units: &UnitMap, config: &ChunkConfig) -> AppResult<Vec<RawSpan>> {
    let n = units.count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let size = config.chunk_size;
    let step = size - config.overlap;

    let mut spans = Vec::new();
    let mut idx = 0usize;
    let mut window = size;

    while idx < n {
        let next = (idx + window).min(n);
        spans.push(RawSpan::new(units.start_of(idx), units.start_of(next)));
        idx = next;
        window = step;
    }

    tracing::debug!(
        "Fixed strategy produced {} raw spans over {} units (size: {}, step: {})",
        spans.len(),
        n,
        size,
        step
    );

    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::strategies::assert_tiling;
    use crate::config::{SizeUnit, Strategy};

    fn config(chunk_size: usize, overlap: usize, unit: SizeUnit) -> ChunkConfig {
        ChunkConfig {
            chunk_size,
            overlap,
            unit,
            strategy: Strategy::Fixed,
            ..Default::default()
        }
    }

    #[test]
    fn test_tiles_without_overlap() {
        let text = "a".repeat(300);
        let units = UnitMap::new(&text, SizeUnit::Characters);
        let spans = split(&units, &config(100, 0, SizeUnit::Characters)).unwrap();

        assert_eq!(spans.len(), 3);
        assert_tiling(&spans, text.len());
        assert_eq!(spans[0], RawSpan::new(0, 100));
        assert_eq!(spans[2], RawSpan::new(200, 300));
    }

    #[test]
    fn test_first_window_full_then_steps() {
        let text = "a".repeat(2600);
        let units = UnitMap::new(&text, SizeUnit::Characters);
        let spans = split(&units, &config(1000, 200, SizeUnit::Characters)).unwrap();

        assert_tiling(&spans, text.len());
        assert_eq!(spans[0], RawSpan::new(0, 1000));
        assert_eq!(spans[1], RawSpan::new(1000, 1800));
        assert_eq!(spans[2], RawSpan::new(1800, 2600));
    }

    #[test]
    fn test_last_window_truncated() {
        let text = "a".repeat(150);
        let units = UnitMap::new(&text, SizeUnit::Characters);
        let spans = split(&units, &config(100, 0, SizeUnit::Characters)).unwrap();

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1], RawSpan::new(100, 150));
    }

    #[test]
    fn test_token_windows() {
        let text = "one two three four five six";
        let units = UnitMap::new(text, SizeUnit::Tokens);
        let spans = split(&units, &config(2, 0, SizeUnit::Tokens)).unwrap();

        assert_eq!(spans.len(), 3);
        assert_tiling(&spans, text.len());
        // Each window covers two words plus the trailing gap
        assert_eq!(&text[spans[0].start..spans[0].end], "one two ");
    }

    #[test]
    fn test_empty_text() {
        let units = UnitMap::new("", SizeUnit::Characters);
        let spans = split(&units, &config(100, 0, SizeUnit::Characters)).unwrap();
        assert!(spans.is_empty());
    }
}
