// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::ops::Range;

use crate::{StyleProperty, TextAttributes};

/// A maximal range of text sharing identical resolved attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeRun {
    /// Byte range of the run.
    pub range: Range<usize>,
    /// Attributes in effect over the whole run.
    pub attributes: TextAttributes,
}

/// Resolves overlapping spans into coalesced runs covering `0..len`.
///
/// Spans are applied in order, so a later span overrides an earlier one where
/// they overlap. Each window between boundaries only visits the spans that
/// cover it.
pub(crate) fn resolve_runs(
    len: usize,
    defaults: &TextAttributes,
    spans: &[(Range<usize>, StyleProperty)],
) -> Vec<AttributeRun> {
    if len == 0 {
        return Vec::new();
    }
    let mut boundaries: Vec<usize> = Vec::with_capacity(spans.len() * 2 + 2);
    boundaries.push(0);
    boundaries.push(len);
    for (range, _) in spans {
        boundaries.push(range.start);
        boundaries.push(range.end);
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut by_start: Vec<usize> = (0..spans.len())
        .filter(|&i| !spans[i].0.is_empty())
        .collect();
    by_start.sort_by_key(|&i| spans[i].0.start);
    let mut pending = by_start.into_iter().peekable();
    // Indices of the spans covering the current window, in application order.
    let mut active: BTreeSet<usize> = BTreeSet::new();

    let mut runs: Vec<AttributeRun> = Vec::new();
    for window in boundaries.windows(2) {
        let (start, end) = (window[0], window[1]);
        active.retain(|&i| spans[i].0.end > start);
        while let Some(i) = pending.next_if(|&i| spans[i].0.start <= start) {
            active.insert(i);
        }
        let mut attributes = defaults.clone();
        for &i in &active {
            attributes.apply(&spans[i].1);
        }
        match runs.last_mut() {
            Some(last) if last.attributes == attributes => last.range.end = end,
            _ => runs.push(AttributeRun {
                range: start..end,
                attributes,
            }),
        }
    }
    runs
}

/// Index of the run containing byte `index`.
pub(crate) fn run_index(runs: &[AttributeRun], index: usize) -> Option<usize> {
    let i = runs.partition_point(|run| run.range.end <= index);
    (i < runs.len() && runs[i].range.start <= index).then_some(i)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{resolve_runs, run_index};
    use crate::{StyleProperty, TextAttributes};

    #[test]
    fn last_writer_wins_and_runs_coalesce() {
        let spans = vec![
            (0..6, StyleProperty::FontSize(12.0)),
            (2..4, StyleProperty::FontSize(20.0)),
            (4..6, StyleProperty::FontSize(12.0)),
        ];
        let runs = resolve_runs(8, &TextAttributes::default(), &spans);
        let ranges: alloc::vec::Vec<_> = runs.iter().map(|run| run.range.clone()).collect();
        assert_eq!(ranges, vec![0..2, 2..4, 4..6, 6..8], "runs split at span edges");
        assert_eq!(runs[1].attributes.font_size, Some(20.0), "later span wins");
    }

    #[test]
    fn application_order_beats_position() {
        let spans = vec![
            (2..6, StyleProperty::FontSize(20.0)),
            (0..8, StyleProperty::FontSize(12.0)),
            (3..3, StyleProperty::Underline(true)),
        ];
        let runs = resolve_runs(8, &TextAttributes::default(), &spans);
        assert_eq!(runs.len(), 1, "the wider later span covers the earlier one");
        assert_eq!(runs[0].range, 0..8, "whole text");
        assert_eq!(runs[0].attributes.font_size, Some(12.0), "later span wins");
        assert!(!runs[0].attributes.underline, "empty spans style nothing");
    }

    #[test]
    fn equal_neighbors_merge() {
        let spans = vec![
            (0..2, StyleProperty::Underline(true)),
            (2..4, StyleProperty::Underline(true)),
        ];
        let runs = resolve_runs(4, &TextAttributes::default(), &spans);
        assert_eq!(runs.len(), 1, "identical attributes coalesce");
        assert_eq!(run_index(&runs, 3), Some(0), "lookup inside the merged run");
        assert_eq!(run_index(&runs, 4), None, "end is outside every run");
    }
}
