//! Recursive separator-descent strategy.
//!
//! Splits on a prioritized ladder of separators (the configured paragraph
//! separators, then sentence boundaries, then word boundaries), recursing
//! into oversized segments with the next level. Sibling pieces are packed
//! greedily up to the size budget, preferring the boundary that maximizes
//! fill without exceeding the bound.

use textchunk_core::AppResult;

use super::RawSpan;
use crate::chunk::units::UnitMap;
use crate::config::{ChunkConfig, Separators};

enum Level<'a> {
    Literal(&'a str),
    Sentence,
    Word,
}

pub(crate) fn split(
    text: &str,
    units: &UnitMap,
    config: &ChunkConfig,
    separators: &Separators,
) -> AppResult<Vec<RawSpan>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    // Raw segments leave room for the overlap prefix the boundary engine
    // prepends, keeping final chunks within chunk_size.
    let budget = config.chunk_size - config.overlap;

    let ladder: Vec<Level> = separators
        .0
        .iter()
        .map(|s| Level::Literal(s.as_str()))
        .chain([Level::Sentence, Level::Word])
        .collect();

    let mut out = Vec::new();
    descend(text, units, 0, text.len(), 0, &ladder, budget, &mut out);

    tracing::debug!(
        "Recursive strategy produced {} raw spans ({} oversized)",
        out.len(),
        out.iter().filter(|s| s.oversized).count()
    );

    Ok(out)
}

#[allow(clippy::too_many_arguments)]
fn descend(
    text: &str,
    units: &UnitMap,
    start: usize,
    end: usize,
    level: usize,
    ladder: &[Level],
    budget: usize,
    out: &mut Vec<RawSpan>,
) {
    if units.span_units(start, end) <= budget {
        out.push(RawSpan::new(start, end));
        return;
    }

    if level >= ladder.len() {
        // Atomic unit longer than the limit: emit as-is
        out.push(RawSpan::oversized(start, end));
        return;
    }

    let cuts: Vec<usize> = match &ladder[level] {
        Level::Literal(sep) => text[start..end]
            .match_indices(sep)
            .map(|(i, _)| start + i)
            .filter(|&c| c > start)
            .collect(),
        Level::Sentence => units.sentence_starts_in(start, end).to_vec(),
        Level::Word => units.token_starts_in(start, end).to_vec(),
    };

    if cuts.is_empty() {
        descend(text, units, start, end, level + 1, ladder, budget, out);
        return;
    }

    let mut bounds = Vec::with_capacity(cuts.len() + 2);
    bounds.push(start);
    bounds.extend(cuts);
    bounds.push(end);

    let mut group_start = start;
    let mut i = 1;
    while i < bounds.len() {
        let mut group_end = bounds[i];
        // Extend the group while the next piece still fits
        while i + 1 < bounds.len() && units.span_units(group_start, bounds[i + 1]) <= budget {
            i += 1;
            group_end = bounds[i];
        }

        if units.span_units(group_start, group_end) <= budget {
            out.push(RawSpan::new(group_start, group_end));
        } else {
            // A single piece over budget descends to the next level
            descend(text, units, group_start, group_end, level + 1, ladder, budget, out);
        }

        group_start = group_end;
        i += 1;
    }
}
