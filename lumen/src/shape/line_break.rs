// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking.

use core::ops::Range;

use icu_segmenter::options::LineBreakOptions;
use icu_segmenter::LineSegmenter;
use lumen_text::is_hard_line_break;

use super::BreakReason;

/// Break opportunity before a cluster.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub(crate) enum Boundary {
    #[default]
    None,
    Line,
    Mandatory,
}

/// A cluster as seen by the line breaker and the line builder.
#[derive(Clone, Debug)]
pub(crate) struct ClusterInfo {
    pub(crate) text_range: Range<usize>,
    pub(crate) advance: f32,
    pub(crate) ascent: f32,
    pub(crate) descent: f32,
    /// Index of the attribute run the cluster belongs to.
    pub(crate) run: usize,
    pub(crate) whitespace: bool,
    pub(crate) hard_break: bool,
    pub(crate) boundary: Boundary,
}

/// A committed line as a range of cluster indices.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LineBreak {
    pub(crate) clusters: Range<usize>,
    pub(crate) reason: BreakReason,
}

/// Marks UAX #14 break opportunities on `clusters`, which must cover `text`
/// in order.
pub(crate) fn mark_boundaries(text: &str, clusters: &mut [ClusterInfo]) {
    let segmenter = LineSegmenter::new_auto(LineBreakOptions::default());
    let mut boundaries = segmenter.segment_str(text).peekable();
    let mut prev_hard_break = false;
    for cluster in clusters.iter_mut() {
        let start = cluster.text_range.start;
        while boundaries.next_if(|&b| b < start).is_some() {}
        let at_boundary = boundaries.next_if_eq(&start).is_some();
        cluster.boundary = match (at_boundary, prev_hard_break) {
            _ if start == 0 => Boundary::None,
            (true, true) => Boundary::Mandatory,
            (true, false) => Boundary::Line,
            (false, _) => Boundary::None,
        };
        prev_hard_break = cluster.hard_break;
    }
}

#[derive(Clone, Default)]
struct LineState {
    start: usize,
    x: f32,
    prev_boundary: Option<usize>,
}

impl LineState {
    fn new(start: usize) -> Self {
        Self {
            start,
            ..Self::default()
        }
    }
}

/// Breaks `clusters` into lines no wider than `max_advance`.
///
/// Trailing whitespace hangs past the edge. A line holds at least one cluster,
/// so an unbreakable cluster wider than `max_advance` gets a line of its own.
pub(crate) fn break_lines(clusters: &[ClusterInfo], max_advance: f32) -> Vec<LineBreak> {
    const EPSILON: f32 = 1e-3;

    let mut lines = Vec::new();
    let mut state = LineState::new(0);
    let mut commit = |range: Range<usize>, reason: BreakReason| {
        lines.push(LineBreak {
            clusters: range,
            reason,
        });
    };

    let mut i = 0;
    while i < clusters.len() {
        let cluster = &clusters[i];
        if i > state.start {
            match cluster.boundary {
                Boundary::Mandatory => {
                    commit(state.start..i, BreakReason::Explicit);
                    state = LineState::new(i);
                }
                Boundary::Line => state.prev_boundary = Some(i),
                Boundary::None => {}
            }
        }
        let next_x = state.x + cluster.advance;
        if !cluster.whitespace && next_x > max_advance + EPSILON && i > state.start {
            if let Some(boundary) = state.prev_boundary {
                commit(state.start..boundary, BreakReason::Regular);
                state = LineState::new(boundary);
                i = boundary;
            } else {
                commit(state.start..i, BreakReason::Emergency);
                state = LineState::new(i);
            }
            continue;
        }
        state.x = next_x;
        i += 1;
    }
    if state.start < clusters.len() {
        let ends_with_break = clusters.last().is_some_and(|c| c.hard_break);
        let reason = if ends_with_break {
            BreakReason::Explicit
        } else {
            BreakReason::None
        };
        commit(state.start..clusters.len(), reason);
    }
    lines
}
