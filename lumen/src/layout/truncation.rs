// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lumen_text::{is_hard_line_break, StyledText};

use super::ContainerSize;
use crate::shape::{GlyphRun, ShapedLine, Shaper};

/// Token appended to a line that was cut short.
pub const TRUNCATION_TOKEN: &str = "\u{2026}";

/// Ends the last line with [`TRUNCATION_TOKEN`] if `lines` does not show all of
/// `text`.
///
/// The last line is reshaped to fit `container.width` with the token appended.
/// The token takes the font, color and paragraph style of the line's last run.
/// The new line keeps the old baseline and vertical metrics, and its text
/// range ends at or before the old one.
///
/// Returns `true` if the lines were changed. Running it again on its own
/// output changes nothing.
pub fn truncate<S: Shaper + ?Sized>(
    shaper: &S,
    lines: &mut [ShapedLine],
    text: &StyledText,
    container: ContainerSize,
) -> bool {
    let Some(last) = lines.last_mut() else {
        return false;
    };
    if last.is_truncated() || last.text_range().end >= text.len() {
        return false;
    }

    let token_attributes = last
        .runs()
        .iter()
        .rev()
        .find(|run| !run.is_truncation_token())
        .map(|run| run.attributes().appearance())
        .unwrap_or_default();

    let range = last.text_range();
    let trimmed = text.as_str()[range.clone()].trim_end_matches(is_hard_line_break);
    let range = range.start..range.start + trimmed.len();

    let mut line =
        shaper.shape_truncated(text, range, TRUNCATION_TOKEN, &token_attributes, container.width);
    line.set_baseline(last.metrics.baseline);
    line.metrics.ascent = last.metrics.ascent;
    line.metrics.descent = last.metrics.descent;
    line.metrics.leading = last.metrics.leading;
    line.metrics.min_coord = last.metrics.min_coord;
    line.metrics.max_coord = last.metrics.max_coord;
    debug_assert!(
        line.runs().last().is_some_and(GlyphRun::is_truncation_token),
        "shaper must end a truncated line with the token"
    );
    tracing::debug!(
        cut = line.text_range().end,
        text_len = text.len(),
        "truncated last line"
    );
    *last = line;
    true
}
