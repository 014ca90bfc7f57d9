// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection ranges and the geometry covering them.

use core::ops::Range;

use icu_segmenter::options::WordBreakInvariantOptions;
use icu_segmenter::WordSegmenter;
use lumen_text::{is_hard_line_break, StyledText};
use peniko::kurbo::{Point, Rect};

use crate::hit_test::HitTester;
use crate::shape::ShapedLine;

/// A non-empty selected range of text.
///
/// A zero-length selection is no selection, so constructors return `None`
/// for it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    start: usize,
    len: usize,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "A `SelectionRange` is never empty."
)]
impl SelectionRange {
    /// A selection of `len` bytes starting at `start`.
    ///
    /// Returns `None` if `len` is zero or the end would overflow `usize`.
    pub fn new(start: usize, len: usize) -> Option<Self> {
        (len > 0 && start.checked_add(len).is_some()).then_some(Self { start, len })
    }

    /// A selection covering `range`.
    pub fn from_range(range: Range<usize>) -> Option<Self> {
        Self::new(range.start, range.end.checked_sub(range.start)?)
    }

    /// A selection spanning two offsets in either order.
    pub fn between(a: usize, b: usize) -> Option<Self> {
        Self::new(a.min(b), a.abs_diff(b))
    }

    /// First selected offset.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of selected bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// One past the last selected offset.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    /// The selected range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Returns `self` if it lies within text of `text_len` bytes.
    ///
    /// A selection made against longer text is stale and gives `None`. It is
    /// never clamped.
    pub fn validated(self, text_len: usize) -> Option<Self> {
        self.start
            .checked_add(self.len)
            .is_some_and(|end| end <= text_len)
            .then_some(self)
    }
}

/// Unit that a click selects.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Granularity {
    /// A single click places a caret and selects nothing.
    #[default]
    Character,
    /// A double click selects a word.
    Word,
    /// A triple click selects a line.
    Line,
}

impl Granularity {
    /// The granularity for a resolved click count.
    pub fn from_click_count(count: u32) -> Self {
        match count {
            0 | 1 => Self::Character,
            2 => Self::Word,
            _ => Self::Line,
        }
    }
}

/// Where a selection gesture stands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The pointer is dragging out a range.
    Dragging,
    /// A word was selected by a double click.
    WordSelected,
    /// A line was selected by a triple click.
    LineSelected,
}

impl From<Granularity> for SelectionState {
    fn from(granularity: Granularity) -> Self {
        match granularity {
            Granularity::Character => Self::Idle,
            Granularity::Word => Self::WordSelected,
            Granularity::Line => Self::LineSelected,
        }
    }
}

/// The word containing byte `index`.
///
/// Whitespace and punctuation are not words, so `None` is returned for them
/// as well as for an out of bounds `index`.
pub fn word_range(text: &str, index: usize) -> Option<Range<usize>> {
    if index >= text.len() || !text.is_char_boundary(index) {
        return None;
    }
    let segmenter = WordSegmenter::new_auto(WordBreakInvariantOptions::default());
    let mut segments = segmenter.segment_str(text);
    let mut start = 0;
    while let Some(end) = segments.next() {
        if end > index {
            return segments.is_word_like().then_some(start..end);
        }
        start = end;
    }
    None
}

/// The line containing byte `index`, without its line break.
///
/// Lines are delimited by hard line breaks, not by layout. Returns `None` if
/// `index` is out of bounds or the line is empty.
pub fn line_range(text: &str, index: usize) -> Option<Range<usize>> {
    if index > text.len() || !text.is_char_boundary(index) {
        return None;
    }
    let start = text[..index]
        .rfind(is_hard_line_break)
        .map_or(0, |i| i + text[i..].chars().next().map_or(1, char::len_utf8));
    let end = text[index..]
        .find(is_hard_line_break)
        .map_or(text.len(), |i| index + i);
    (start < end).then_some(start..end)
}

/// Selection queries over one layout pass.
#[derive(Copy, Clone, Debug)]
pub struct SelectionEngine<'a> {
    text: &'a StyledText,
    lines: &'a [ShapedLine],
}

impl<'a> SelectionEngine<'a> {
    /// Creates an engine for `lines` laid out from `text`.
    pub fn new(text: &'a StyledText, lines: &'a [ShapedLine]) -> Self {
        Self { text, lines }
    }

    /// A hit tester over the same lines.
    pub fn hit_tester(&self) -> HitTester<'a> {
        HitTester::new(self.lines, self.text.len())
    }

    /// Selects the word at `index`.
    pub fn select_word(&self, index: usize) -> Option<SelectionRange> {
        word_range(self.text.as_str(), index).and_then(SelectionRange::from_range)
    }

    /// Selects the line at `index`.
    pub fn select_line(&self, index: usize) -> Option<SelectionRange> {
        line_range(self.text.as_str(), index).and_then(SelectionRange::from_range)
    }

    /// Selects the text between the offsets nearest to two points.
    pub fn select_range(&self, anchor: Point, current: Point) -> Option<SelectionRange> {
        let hit = self.hit_tester();
        SelectionRange::between(hit.nearest_index(anchor), hit.nearest_index(current))
    }

    /// Selects all of the text.
    pub fn select_all(&self) -> Option<SelectionRange> {
        SelectionRange::new(0, self.text.len())
    }

    /// Selects around `index` with `granularity`.
    ///
    /// [`Granularity::Character`] selects nothing.
    pub fn select_at(&self, index: usize, granularity: Granularity) -> Option<SelectionRange> {
        match granularity {
            Granularity::Character => None,
            Granularity::Word => self.select_word(index),
            Granularity::Line => self.select_line(index),
        }
    }

    /// One rectangle per line overlapping `range`, in reading order.
    ///
    /// Empty and out of bounds ranges give no rectangles.
    pub fn rects_for(&self, range: Range<usize>) -> Vec<Rect> {
        let mut rects = Vec::new();
        self.rects_with(range, |rect| rects.push(rect));
        rects
    }

    /// Calls `f` with each rectangle that [`Self::rects_for`] would return.
    pub fn rects_with(&self, range: Range<usize>, mut f: impl FnMut(Rect)) {
        if range.is_empty() || range.end > self.text.len() {
            return;
        }
        for line in self.lines {
            let line_range = line.text_range();
            if line_range.end <= range.start || range.end <= line_range.start {
                continue;
            }
            let x0 = line.offset_for_index(range.start);
            let x1 = line.offset_for_index(range.end);
            if x1 <= x0 {
                continue;
            }
            let origin = line.origin();
            f(Rect::new(
                origin.x + f64::from(x0),
                line.top(),
                origin.x + f64::from(x1),
                line.bottom(),
            ));
        }
    }

    /// Returns `true` if `point` lies on the rectangles covering `selection`.
    pub fn contains_point(&self, selection: SelectionRange, point: Point) -> bool {
        let mut found = false;
        self.rects_with(selection.range(), |rect| {
            found |= rect.contains(point);
        });
        found
    }
}
