//! Strategy implementations.
//!
//! Each strategy produces an ordered, gapless tiling of the document text
//! as `RawSpan`s; the boundary engine applies overlap afterwards. The
//! strategy set is closed: dispatch happens over the `Strategy` enum in the
//! pipeline, not through open-ended trait objects.

pub(crate) mod fixed;
pub(crate) mod recursive;
pub(crate) mod semantic;

/// A raw split produced by a strategy, before overlap expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawSpan {
    pub start: usize,
    pub end: usize,

    /// The span is a single atomic unit longer than the configured size
    /// and was emitted as-is
    pub oversized: bool,
}

impl RawSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            oversized: false,
        }
    }

    pub fn oversized(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            oversized: true,
        }
    }
}

#[cfg(test)]
pub(crate) fn assert_tiling(spans: &[RawSpan], text_len: usize) {
    assert_eq!(spans.first().map(|s| s.start), Some(0));
    assert_eq!(spans.last().map(|s| s.end), Some(text_len));
    for w in spans.windows(2) {
        assert_eq!(w[0].end, w[1].start, "spans must tile without gaps");
    }
    for s in spans {
        assert!(s.start < s.end, "spans must be non-empty");
    }
}
