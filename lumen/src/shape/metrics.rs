// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic shaper driven by font metrics ratios.

use core::ops::Range;

use lumen_text::{is_hard_line_break, Alignment, StyledText, TextAttributes};

use super::line_break::{break_lines, mark_boundaries, Boundary, ClusterInfo};
use super::{BreakReason, Cluster, GlyphRun, LineMetrics, ShapedLine, Shaper};

/// Share of an attachment's height placed above the baseline.
const ATTACHMENT_ASCENT: f32 = 0.85;
/// Share of an attachment's height placed below the baseline.
const ATTACHMENT_DESCENT: f32 = 0.15;

/// Parameters of a [`MetricsShaper`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MetricsShaperOptions {
    /// Font size used when a run does not specify one.
    pub font_size: f32,
    /// Advance of every character as a multiple of the font size.
    pub advance_ratio: f32,
    /// Ascent as a multiple of the font size.
    pub ascent_ratio: f32,
    /// Descent as a multiple of the font size.
    pub descent_ratio: f32,
    /// Width of a tab in characters.
    pub tab_width: f32,
}

impl Default for MetricsShaperOptions {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            advance_ratio: 0.5,
            ascent_ratio: 0.75,
            descent_ratio: 0.25,
            tab_width: 4.0,
        }
    }
}

/// A shaper where every character has the same advance for a given font size.
///
/// It needs no font data, which makes it suitable for measuring monospaced
/// text and for tests. Attachments occupy their declared width, clamped to the
/// line width.
#[derive(Clone, Debug, Default)]
pub struct MetricsShaper {
    options: MetricsShaperOptions,
}

impl MetricsShaper {
    /// Creates a shaper with the given options.
    pub fn new(options: MetricsShaperOptions) -> Self {
        Self { options }
    }

    /// The shaper's options.
    pub fn options(&self) -> &MetricsShaperOptions {
        &self.options
    }

    fn font_size(&self, attributes: &TextAttributes) -> f32 {
        attributes.font_size.unwrap_or(self.options.font_size)
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "Attachment sizes are well within f32 precision."
    )]
    fn clusters(&self, text: &StyledText, range: Range<usize>, max_width: f32) -> Vec<ClusterInfo> {
        let mut clusters = Vec::with_capacity(range.len());
        for (run_index, run) in text.runs().iter().enumerate() {
            let start = run.range.start.max(range.start);
            let end = run.range.end.min(range.end);
            if start >= end {
                continue;
            }
            let attributes = &run.attributes;
            let size = self.font_size(attributes);
            let char_advance = size * self.options.advance_ratio;
            for (i, ch) in text.as_str()[start..end].char_indices() {
                let index = start + i;
                let hard_break = is_hard_line_break(ch);
                let (advance, ascent, descent) = match &attributes.attachment {
                    Some(attachment) if ch == lumen_text::OBJECT_REPLACEMENT_CHARACTER => {
                        let size = attachment.size();
                        let height = size.height as f32;
                        (
                            (size.width as f32).min(max_width),
                            height * ATTACHMENT_ASCENT,
                            height * ATTACHMENT_DESCENT,
                        )
                    }
                    _ => {
                        let advance = match ch {
                            _ if hard_break => 0.0,
                            '\t' => char_advance * self.options.tab_width,
                            _ => char_advance,
                        };
                        (
                            advance,
                            size * self.options.ascent_ratio,
                            size * self.options.descent_ratio,
                        )
                    }
                };
                clusters.push(ClusterInfo {
                    text_range: index..index + ch.len_utf8(),
                    advance,
                    ascent,
                    descent,
                    run: run_index,
                    whitespace: ch.is_whitespace(),
                    hard_break,
                    boundary: Boundary::None,
                });
            }
        }
        clusters
    }

    /// Groups clusters into runs and computes line metrics, with the top of the
    /// line at `top`. `tokens` are appended after the text.
    fn build_line(
        &self,
        text: &StyledText,
        start: usize,
        clusters: &[ClusterInfo],
        tokens: Vec<GlyphRun>,
        reason: BreakReason,
        top: f32,
        max_width: f32,
    ) -> ShapedLine {
        let runs_attributes = text.runs();
        let mut x = 0.0;
        let mut runs = Vec::new();
        for group in clusters.chunk_by(|a, b| a.run == b.run) {
            let ascent = group.iter().map(|c| c.ascent).fold(0.0, f32::max);
            let descent = group.iter().map(|c| c.descent).fold(0.0, f32::max);
            let glyphs = group
                .iter()
                .map(|c| Cluster {
                    text_range: c.text_range.clone(),
                    advance: c.advance,
                })
                .collect();
            let run = GlyphRun::new(
                runs_attributes[group[0].run].attributes.clone(),
                x,
                ascent,
                descent,
                glyphs,
            );
            x += run.advance();
            runs.push(run);
        }
        for mut token in tokens {
            token.offset = x;
            x += token.advance;
            runs.push(token);
        }

        let start = clusters.first().map_or(start, |c| c.text_range.start);
        let end = clusters.last().map_or(start, |c| c.text_range.end);
        let paragraph = text
            .attributes_at(start)
            .and_then(|attributes| attributes.paragraph)
            .unwrap_or_default();

        let ascent = runs.iter().map(|r| r.ascent).fold(0.0, f32::max);
        let descent = runs.iter().map(|r| r.descent).fold(0.0, f32::max);
        let leading = paragraph.line_spacing.max(0.0);
        let advance = x;
        let trailing_whitespace = if runs.iter().any(GlyphRun::is_truncation_token) {
            0.0
        } else {
            clusters
                .iter()
                .rev()
                .take_while(|c| c.whitespace)
                .map(|c| c.advance)
                .sum()
        };
        let offset = if max_width.is_finite() {
            let free = (max_width - (advance - trailing_whitespace)).max(0.0);
            match paragraph.alignment {
                Alignment::Start => 0.0,
                Alignment::Center => free * 0.5,
                Alignment::End => free,
            }
        } else {
            0.0
        };
        let baseline = top + leading + ascent;
        ShapedLine::new(
            start..end,
            runs,
            LineMetrics {
                ascent,
                descent,
                leading,
                baseline,
                offset,
                advance,
                trailing_whitespace,
                min_coord: top,
                max_coord: baseline + descent,
            },
            reason,
        )
    }
}

impl Shaper for MetricsShaper {
    fn shape(&self, text: &StyledText, max_width: f32) -> Vec<ShapedLine> {
        if text.is_empty() {
            return Vec::new();
        }
        let max_width = max_width.max(0.0);
        let mut clusters = self.clusters(text, 0..text.len(), max_width);
        mark_boundaries(text.as_str(), &mut clusters);

        let mut top = 0.0;
        break_lines(&clusters, max_width)
            .into_iter()
            .map(|line| {
                let line = self.build_line(
                    text,
                    0,
                    &clusters[line.clusters],
                    Vec::new(),
                    line.reason,
                    top,
                    max_width,
                );
                top = line.metrics.max_coord;
                line
            })
            .collect()
    }

    fn shape_truncated(
        &self,
        text: &StyledText,
        range: Range<usize>,
        token: &str,
        token_attributes: &TextAttributes,
        max_width: f32,
    ) -> ShapedLine {
        let max_width = max_width.max(0.0);
        let size = self.font_size(token_attributes);
        let token_advance = token.chars().count() as f32 * size * self.options.advance_ratio;

        let mut clusters = self.clusters(text, range.clone(), max_width);
        let mut total: f32 = clusters.iter().map(|c| c.advance).sum();
        while total + token_advance > max_width {
            match clusters.pop() {
                Some(cluster) => total -= cluster.advance,
                None => break,
            }
        }
        let cut = clusters.last().map_or(range.start, |c| c.text_range.end);
        let token_run = GlyphRun::truncation_token(
            token_attributes.clone(),
            cut,
            0.0,
            token_advance,
            size * self.options.ascent_ratio,
            size * self.options.descent_ratio,
        );
        let mut line = self.build_line(
            text,
            range.start,
            &clusters,
            vec![token_run],
            BreakReason::Truncated,
            0.0,
            max_width,
        );
        line.text_range = range.start..cut;
        line
    }
}
