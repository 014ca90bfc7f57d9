// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The line list produced by a layout pass.

mod truncation;

use lumen_text::StyledText;
use peniko::kurbo::Size;

use crate::shape::{ShapedLine, Shaper, HEIGHT_EPSILON};

pub use truncation::{truncate, TRUNCATION_TOKEN};

/// The box text is laid out in.
///
/// The width drives line breaking and the height limits how many lines are
/// kept. Either may be infinite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContainerSize {
    /// Maximum line width.
    pub width: f32,
    /// Maximum total height of the kept lines.
    pub height: f32,
}

impl ContainerSize {
    /// A container of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A container without a height limit.
    pub fn unbounded_height(width: f32) -> Self {
        Self::new(width, f32::INFINITY)
    }

    /// A container without any limit.
    pub fn unbounded() -> Self {
        Self::new(f32::INFINITY, f32::INFINITY)
    }
}

impl Default for ContainerSize {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl From<Size> for ContainerSize {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Container sizes are well within f32 precision."
    )]
    fn from(size: Size) -> Self {
        Self::new(size.width as f32, size.height as f32)
    }
}

/// The lines of one layout pass, in reading order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineCache {
    lines: Vec<ShapedLine>,
}

impl LineCache {
    /// Shapes `text` for `container`, keeping the lines that fit its height.
    ///
    /// The result depends only on the inputs. Empty text, or a container too
    /// short for the first line, produces no lines.
    pub fn layout<S: Shaper + ?Sized>(
        shaper: &S,
        text: &StyledText,
        container: ContainerSize,
    ) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let mut lines = shaper.shape(text, container.width);
        let limit = f64::from(container.height) + HEIGHT_EPSILON;
        let visible = lines
            .iter()
            .position(|line| line.bottom() > limit)
            .unwrap_or(lines.len());
        lines.truncate(visible);
        Self { lines }
    }

    /// The smallest size needed to lay out `text` inside `constraint`.
    ///
    /// Empty text measures as [`Size::ZERO`].
    pub fn measure<S: Shaper + ?Sized>(shaper: &S, text: &StyledText, constraint: Size) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        shaper.suggest_size(text, constraint)
    }

    /// Replaces the last line with a truncated one if text was cut off.
    ///
    /// See [`truncate`].
    pub fn truncate<S: Shaper + ?Sized>(
        &mut self,
        shaper: &S,
        text: &StyledText,
        container: ContainerSize,
    ) -> bool {
        truncate(shaper, &mut self.lines, text, container)
    }

    /// The lines in reading order.
    pub fn lines(&self) -> &[ShapedLine] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of bytes of text shown by the lines.
    pub fn visible_len(&self) -> usize {
        self.lines.last().map_or(0, |line| line.text_range().end)
    }

    /// Returns `true` if the last line ends with a truncation token.
    pub fn is_truncated(&self) -> bool {
        self.lines.last().is_some_and(ShapedLine::is_truncated)
    }

    /// Height of the kept lines.
    pub fn height(&self) -> f64 {
        self.lines.last().map_or(0.0, ShapedLine::bottom)
    }
}
