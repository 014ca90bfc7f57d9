// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shaped output and the interface to the text shaping engine.

mod line_break;
mod metrics;

use core::ops::Range;

use lumen_text::{StyledText, TextAttributes};
use peniko::kurbo::{Point, Size};

pub use metrics::{MetricsShaper, MetricsShaperOptions};

/// A text shaping engine.
///
/// Implementations turn styled text into positioned lines. Line origins are
/// container-local with y growing downward, the first line's top at `y = 0`.
pub trait Shaper {
    /// Breaks `text` into lines no wider than `max_width` and positions them.
    ///
    /// `max_width` may be infinite, in which case lines only break at hard
    /// line breaks.
    fn shape(&self, text: &StyledText, max_width: f32) -> Vec<ShapedLine>;

    /// Shapes the text in `range` on a single line followed by `token`,
    /// dropping trailing clusters of `range` until the line fits `max_width`.
    ///
    /// The returned line's text range starts at `range.start` and ends at or
    /// before `range.end`. Its last run is the token, which covers no text.
    fn shape_truncated(
        &self,
        text: &StyledText,
        range: Range<usize>,
        token: &str,
        token_attributes: &TextAttributes,
        max_width: f32,
    ) -> ShapedLine;

    /// The smallest size that fits the lines of `text` shaped inside `constraint`.
    ///
    /// Lines that would overflow the constraint's height are not counted.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Layout widths are well within f32 precision."
    )]
    fn suggest_size(&self, text: &StyledText, constraint: Size) -> Size {
        let lines = self.shape(text, constraint.width as f32);
        let mut width = 0_f32;
        let mut height = 0_f32;
        for line in &lines {
            if f64::from(line.metrics.max_coord) > constraint.height + HEIGHT_EPSILON {
                break;
            }
            width = width.max(line.metrics.advance - line.metrics.trailing_whitespace);
            height = line.metrics.max_coord;
        }
        Size::new(
            f64::from(width).min(constraint.width),
            f64::from(height).min(constraint.height),
        )
    }
}

/// Slack allowed when checking whether a line fits a height.
pub(crate) const HEIGHT_EPSILON: f64 = 1e-3;

/// Reason that a line was broken.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum BreakReason {
    /// The line ends the text.
    #[default]
    None,
    /// The line ended at a soft break opportunity.
    Regular,
    /// The line ended with a hard line break.
    Explicit,
    /// No break opportunity fit, so the line was broken between clusters.
    Emergency,
    /// The line was cut short and ends with a truncation token.
    Truncated,
}

/// Metrics information for a line.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct LineMetrics {
    /// Typographic ascent.
    pub ascent: f32,
    /// Typographic descent.
    pub descent: f32,
    /// Extra space above the ascent.
    pub leading: f32,
    /// Offset to the baseline from the top of the container.
    pub baseline: f32,
    /// Offset for alignment.
    pub offset: f32,
    /// Full advance of the line.
    pub advance: f32,
    /// Advance of trailing whitespace.
    pub trailing_whitespace: f32,
    /// Top of the line box: `baseline - ascent - leading`.
    pub min_coord: f32,
    /// Bottom of the line box: `baseline + descent`.
    pub max_coord: f32,
}

/// A single cluster within a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    /// Byte range of the cluster.
    pub text_range: Range<usize>,
    /// Horizontal advance.
    pub advance: f32,
}

/// A run of glyphs on a line sharing the same attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRun {
    pub(crate) text_range: Range<usize>,
    pub(crate) attributes: TextAttributes,
    pub(crate) offset: f32,
    pub(crate) advance: f32,
    pub(crate) ascent: f32,
    pub(crate) descent: f32,
    pub(crate) clusters: Vec<Cluster>,
    pub(crate) is_truncation_token: bool,
}

impl GlyphRun {
    /// Creates a run from clusters laid out left to right starting at `offset`.
    pub fn new(
        attributes: TextAttributes,
        offset: f32,
        ascent: f32,
        descent: f32,
        clusters: Vec<Cluster>,
    ) -> Self {
        let start = clusters.first().map_or(0, |c| c.text_range.start);
        let end = clusters.last().map_or(start, |c| c.text_range.end);
        let advance = clusters.iter().map(|c| c.advance).sum();
        Self {
            text_range: start..end,
            attributes,
            offset,
            advance,
            ascent,
            descent,
            clusters,
            is_truncation_token: false,
        }
    }

    /// Creates a truncation token run placed at text offset `at`.
    ///
    /// The token has width but covers no text.
    pub fn truncation_token(
        attributes: TextAttributes,
        at: usize,
        offset: f32,
        advance: f32,
        ascent: f32,
        descent: f32,
    ) -> Self {
        Self {
            text_range: at..at,
            attributes,
            offset,
            advance,
            ascent,
            descent,
            clusters: Vec::new(),
            is_truncation_token: true,
        }
    }

    /// Byte range of the run.
    pub fn text_range(&self) -> Range<usize> {
        self.text_range.clone()
    }

    /// Resolved attributes of the run.
    pub fn attributes(&self) -> &TextAttributes {
        &self.attributes
    }

    /// Horizontal position of the run relative to the line origin.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Total advance of the run.
    pub fn advance(&self) -> f32 {
        self.advance
    }

    /// Ascent of the run's glyphs.
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Descent of the run's glyphs.
    pub fn descent(&self) -> f32 {
        self.descent
    }

    /// Clusters in visual order.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Returns `true` if this run is a synthesized truncation token.
    pub fn is_truncation_token(&self) -> bool {
        self.is_truncation_token
    }

    /// The x position of text offset `index` relative to the line origin.
    ///
    /// Returns `None` if `index` lies outside the run. The run's end offset
    /// maps to the run's trailing edge.
    pub fn advance_at(&self, index: usize) -> Option<f32> {
        if index < self.text_range.start || index > self.text_range.end {
            return None;
        }
        let mut x = self.offset;
        for cluster in &self.clusters {
            if cluster.text_range.end > index {
                return Some(x);
            }
            x += cluster.advance;
        }
        Some(x)
    }

    /// The text offset whose caret position is nearest to `x`, relative to the
    /// line origin.
    ///
    /// Equidistant positions resolve to the lower offset.
    pub fn offset_at(&self, x: f32) -> usize {
        let mut best = self.text_range.start;
        let mut best_distance = (x - self.offset).abs();
        let mut edge = self.offset;
        for cluster in &self.clusters {
            edge += cluster.advance;
            let distance = (x - edge).abs();
            if distance < best_distance {
                best = cluster.text_range.end;
                best_distance = distance;
            }
        }
        best
    }
}

/// A line of positioned glyph runs.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedLine {
    pub(crate) text_range: Range<usize>,
    pub(crate) runs: Vec<GlyphRun>,
    pub(crate) metrics: LineMetrics,
    pub(crate) break_reason: BreakReason,
}

impl ShapedLine {
    /// Creates a line from runs and metrics.
    pub fn new(
        text_range: Range<usize>,
        runs: Vec<GlyphRun>,
        metrics: LineMetrics,
        break_reason: BreakReason,
    ) -> Self {
        Self {
            text_range,
            runs,
            metrics,
            break_reason,
        }
    }

    /// Byte range of the text shown on this line.
    pub fn text_range(&self) -> Range<usize> {
        self.text_range.clone()
    }

    /// Runs in visual order.
    pub fn runs(&self) -> &[GlyphRun] {
        &self.runs
    }

    /// Metrics of the line.
    pub fn metrics(&self) -> &LineMetrics {
        &self.metrics
    }

    /// Why the line ended.
    pub fn break_reason(&self) -> BreakReason {
        self.break_reason
    }

    /// Baseline origin of the line in container coordinates.
    pub fn origin(&self) -> Point {
        Point::new(
            f64::from(self.metrics.offset),
            f64::from(self.metrics.baseline),
        )
    }

    /// Top of the line box.
    pub fn top(&self) -> f64 {
        f64::from(self.metrics.min_coord)
    }

    /// Bottom of the line box.
    pub fn bottom(&self) -> f64 {
        f64::from(self.metrics.max_coord)
    }

    /// Returns `true` if the line ends with a truncation token.
    pub fn is_truncated(&self) -> bool {
        self.runs.iter().any(GlyphRun::is_truncation_token)
    }

    fn text_runs(&self) -> impl Iterator<Item = &GlyphRun> + '_ {
        self.runs.iter().filter(|run| !run.is_truncation_token)
    }

    /// Every caret position on the line as `(offset, x)` pairs in text order,
    /// ending with the line's end offset. Positions are relative to the origin.
    pub fn caret_stops(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        let end = (self.text_range.end, self.content_end());
        self.text_runs()
            .flat_map(|run| {
                run.clusters.iter().scan(run.offset, |x, cluster| {
                    let stop = (cluster.text_range.start, *x);
                    *x += cluster.advance;
                    Some(stop)
                })
            })
            .chain(core::iter::once(end))
    }

    /// Trailing edge of the line's text, relative to the origin.
    pub fn content_end(&self) -> f32 {
        self.text_runs()
            .last()
            .map_or(0.0, |run| run.offset + run.advance)
    }

    /// The x position of text offset `index` relative to the line origin.
    ///
    /// Offsets before the line map to its leading edge and offsets after it to
    /// the trailing edge of its text.
    pub fn offset_for_index(&self, index: usize) -> f32 {
        if index <= self.text_range.start {
            return 0.0;
        }
        if index >= self.text_range.end {
            return self.content_end();
        }
        self.text_runs()
            .find_map(|run| {
                (index < run.text_range.end)
                    .then(|| run.advance_at(index))
                    .flatten()
            })
            .unwrap_or_else(|| self.content_end())
    }

    /// Moves the line so its baseline sits at `baseline`.
    pub(crate) fn set_baseline(&mut self, baseline: f32) {
        let delta = baseline - self.metrics.baseline;
        self.metrics.baseline = baseline;
        self.metrics.min_coord += delta;
        self.metrics.max_coord += delta;
    }
}
