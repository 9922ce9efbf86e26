//! Unit segmentation over document text.
//!
//! Strategies and the boundary engine share one table of unit start
//! offsets, built once per chunking call. All offsets are byte offsets at
//! `char` boundaries, so slicing the document text is always valid.

use unicode_segmentation::UnicodeSegmentation;

use crate::config::SizeUnit;

/// Precomputed segmentation of a document's text.
pub(crate) struct UnitMap {
    /// Start offset of each size unit (chars or tokens); unit i spans
    /// `[unit_starts[i], unit_starts[i+1])`, the last unit ends at text_len
    unit_starts: Vec<usize>,

    /// Start offset of every word-bound segment (words and gaps)
    seg_starts: Vec<usize>,

    /// Start offset of each non-whitespace word segment
    token_starts: Vec<usize>,

    /// Start offset of each sentence
    sentence_starts: Vec<usize>,

    text_len: usize,
}

impl UnitMap {
    pub fn new(text: &str, unit: SizeUnit) -> Self {
        let token_starts: Vec<usize> = text
            .split_word_bound_indices()
            .filter(|(_, seg)| seg.chars().any(|c| !c.is_whitespace()))
            .map(|(i, _)| i)
            .collect();

        let unit_starts = match unit {
            SizeUnit::Characters => text.char_indices().map(|(i, _)| i).collect(),
            SizeUnit::Tokens => {
                // Leading whitespace belongs to the first token unit
                let mut starts = token_starts.clone();
                match starts.first_mut() {
                    Some(first) => *first = 0,
                    None if !text.is_empty() => starts.push(0),
                    None => {}
                }
                starts
            }
        };

        Self {
            unit_starts,
            seg_starts: text.split_word_bound_indices().map(|(i, _)| i).collect(),
            token_starts,
            sentence_starts: text.split_sentence_bound_indices().map(|(i, _)| i).collect(),
            text_len: text.len(),
        }
    }

    /// Number of units in the text.
    pub fn count(&self) -> usize {
        self.unit_starts.len()
    }

    /// Byte offset where unit `idx` starts; `idx == count()` maps to the
    /// end of the text.
    pub fn start_of(&self, idx: usize) -> usize {
        if idx >= self.unit_starts.len() {
            self.text_len
        } else {
            self.unit_starts[idx]
        }
    }

    /// Number of units starting before `offset`.
    fn rank(&self, offset: usize) -> usize {
        self.unit_starts.partition_point(|&s| s < offset)
    }

    /// Measure a byte span in units: the number of units starting within
    /// `[start, end)`.
    pub fn span_units(&self, start: usize, end: usize) -> usize {
        self.rank(end).saturating_sub(self.rank(start))
    }

    /// Step backward by `n` units from a unit-start offset, clamped at the
    /// start of the text.
    pub fn back_by(&self, offset: usize, n: usize) -> usize {
        let idx = self.rank(offset + 1).saturating_sub(1);
        self.start_of(idx.saturating_sub(n))
    }

    /// Move an offset forward to the next word-bound segment start when it
    /// falls inside a word; offsets inside whitespace runs and offsets
    /// already on a boundary are returned unchanged.
    pub fn ceil_word_boundary(&self, offset: usize) -> usize {
        if offset == 0 || offset >= self.text_len {
            return offset;
        }
        match self.seg_starts.binary_search(&offset) {
            Ok(_) => offset,
            Err(pos) => {
                let seg_start = self.seg_starts[pos - 1];
                if self.token_starts.binary_search(&seg_start).is_ok() {
                    // Inside a word: cut at the next segment boundary
                    self.seg_starts.get(pos).copied().unwrap_or(self.text_len)
                } else {
                    offset
                }
            }
        }
    }

    /// Word (token) start offsets strictly inside `(start, end)`.
    pub fn token_starts_in(&self, start: usize, end: usize) -> &[usize] {
        let lo = self.token_starts.partition_point(|&s| s <= start);
        let hi = self.token_starts.partition_point(|&s| s < end);
        &self.token_starts[lo..hi]
    }

    /// Sentence start offsets strictly inside `(start, end)`.
    pub fn sentence_starts_in(&self, start: usize, end: usize) -> &[usize] {
        let lo = self.sentence_starts.partition_point(|&s| s <= start);
        let hi = self.sentence_starts.partition_point(|&s| s < end);
        &self.sentence_starts[lo..hi]
    }

    /// Sentence spans tiling the whole text.
    pub fn sentence_spans(&self) -> Vec<(usize, usize)> {
        let mut spans = Vec::with_capacity(self.sentence_starts.len());
        for (i, &start) in self.sentence_starts.iter().enumerate() {
            let end = self
                .sentence_starts
                .get(i + 1)
                .copied()
                .unwrap_or(self.text_len);
            if end > start {
                spans.push((start, end));
            }
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_units_count() {
        let map = UnitMap::new("héllo", SizeUnit::Characters);
        assert_eq!(map.count(), 5);
        assert_eq!(map.start_of(0), 0);
        // 'é' is two bytes
        assert_eq!(map.start_of(2), 3);
        assert_eq!(map.start_of(5), "héllo".len());
    }

    #[test]
    fn test_token_units_absorb_whitespace() {
        let map = UnitMap::new("  one two  three", SizeUnit::Tokens);
        // Leading whitespace folds into the first unit
        assert_eq!(map.count(), 3);
        assert_eq!(map.start_of(0), 0);
        assert_eq!(map.start_of(3), 16);
    }

    #[test]
    fn test_span_units_measures_chars() {
        let map = UnitMap::new("abcdef", SizeUnit::Characters);
        assert_eq!(map.span_units(0, 3), 3);
        assert_eq!(map.span_units(2, 6), 4);
        assert_eq!(map.span_units(0, 0), 0);
    }

    #[test]
    fn test_back_by() {
        let map = UnitMap::new("abcdef", SizeUnit::Characters);
        assert_eq!(map.back_by(4, 2), 2);
        assert_eq!(map.back_by(1, 5), 0);
    }

    #[test]
    fn test_ceil_word_boundary() {
        let text = "hello world";
        let map = UnitMap::new(text, SizeUnit::Characters);
        // Mid-word offset moves forward to the next boundary
        assert_eq!(map.ceil_word_boundary(2), 5);
        // Word starts and the space gap are left untouched
        assert_eq!(map.ceil_word_boundary(6), 6);
        assert_eq!(map.ceil_word_boundary(5), 5);
        assert_eq!(map.ceil_word_boundary(0), 0);
    }

    #[test]
    fn test_sentence_spans_tile_text() {
        let text = "First sentence. Second one! Third?";
        let map = UnitMap::new(text, SizeUnit::Characters);
        let spans = map.sentence_spans();
        assert!(spans.len() >= 3);
        assert_eq!(spans[0].0, 0);
        assert_eq!(spans.last().unwrap().1, text.len());
        for w in spans.windows(2) {
            assert_eq!(w[0].1, w[1].0);
        }
    }
}
