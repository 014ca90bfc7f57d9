// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A selectable block of styled text.

use lumen_text::StyledText;
use peniko::kurbo::{Point, Rect, Size};

use crate::attachment::{reconcile, AttachmentSlot, Reconciliation, SlotRequest};
use crate::highlight::{HighlightRegion, HighlightRegions};
use crate::hit_test::HitTester;
use crate::layout::{ContainerSize, LineCache};
use crate::selection::{SelectionEngine, SelectionRange};
use crate::shape::{MetricsShaper, ShapedLine, Shaper};

/// Options of a [`TextLabel`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LabelOptions {
    /// Whether the text can be selected.
    pub selectable: bool,
    /// Width used to measure the intrinsic size, if positive.
    pub preferred_max_width: f32,
    /// Distance by which region rectangles grow for pointer hit-testing.
    pub interaction_inset: f64,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            selectable: true,
            preferred_max_width: 0.0,
            interaction_inset: 4.0,
        }
    }
}

/// Styled text laid out in a container, with its regions and selection.
///
/// Every change to the text or the container runs a full layout pass before
/// returning, so queries always see the current lines. A layout pass clears
/// the selection.
#[derive(Clone, Debug)]
pub struct TextLabel<S = MetricsShaper> {
    shaper: S,
    options: LabelOptions,
    text: StyledText,
    container: ContainerSize,
    lines: LineCache,
    regions: HighlightRegions,
    selection: Option<SelectionRange>,
    generation: u64,
}

impl Default for TextLabel {
    fn default() -> Self {
        Self::new(MetricsShaper::default(), LabelOptions::default())
    }
}

impl<S: Shaper> TextLabel<S> {
    /// Creates an empty label in an unbounded container.
    pub fn new(shaper: S, options: LabelOptions) -> Self {
        Self {
            shaper,
            options,
            text: StyledText::default(),
            container: ContainerSize::default(),
            lines: LineCache::default(),
            regions: HighlightRegions::default(),
            selection: None,
            generation: 0,
        }
    }

    /// Counts layout passes.
    ///
    /// Region starts and selection offsets are only meaningful within one
    /// generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The shaper.
    pub fn shaper(&self) -> &S {
        &self.shaper
    }

    /// The options.
    pub fn options(&self) -> &LabelOptions {
        &self.options
    }

    /// The text.
    pub fn text(&self) -> &StyledText {
        &self.text
    }

    /// The container.
    pub fn container(&self) -> ContainerSize {
        self.container
    }

    /// Replaces the text.
    pub fn set_text(&mut self, text: StyledText) {
        self.text = text;
        self.invalidate();
    }

    /// Resizes the container. Setting the current size does nothing.
    pub fn set_container_size(&mut self, container: impl Into<ContainerSize>) {
        let container = container.into();
        if container != self.container {
            self.container = container;
            self.invalidate();
        }
    }

    /// Sets the width used by [`Self::intrinsic_size`].
    pub fn set_preferred_max_width(&mut self, width: f32) {
        if width != self.options.preferred_max_width {
            self.options.preferred_max_width = width;
            self.invalidate();
        }
    }

    /// Turns selection on or off. Turning it off clears the selection.
    pub fn set_selectable(&mut self, selectable: bool) {
        self.options.selectable = selectable;
        if !selectable {
            self.clear_selection();
        }
    }

    /// Runs a layout pass and clears the selection.
    pub fn invalidate(&mut self) {
        let mut lines = LineCache::layout(&self.shaper, &self.text, self.container);
        let truncated = lines.truncate(&self.shaper, &self.text, self.container);
        self.regions = HighlightRegions::extract(lines.lines(), &self.text);
        self.lines = lines;
        self.selection = None;
        self.generation = self.generation.wrapping_add(1);
        tracing::debug!(
            generation = self.generation,
            lines = self.lines.len(),
            visible_len = self.lines.visible_len(),
            text_len = self.text.len(),
            truncated,
            regions = self.regions.len(),
            "layout pass"
        );
    }

    /// Size needed to show the whole text.
    ///
    /// The width is limited by the preferred max width if set, else by the
    /// container width if set.
    pub fn intrinsic_size(&self) -> Size {
        let width = [self.options.preferred_max_width, self.container.width]
            .into_iter()
            .find(|w| *w > 0.0 && w.is_finite())
            .map_or(f64::INFINITY, f64::from);
        LineCache::measure(&self.shaper, &self.text, Size::new(width, f64::INFINITY))
    }

    /// The lines of the current layout pass.
    pub fn lines(&self) -> &[ShapedLine] {
        self.lines.lines()
    }

    /// The line cache of the current layout pass.
    pub fn line_cache(&self) -> &LineCache {
        &self.lines
    }

    /// The link and attachment regions of the current layout pass.
    pub fn regions(&self) -> &HighlightRegions {
        &self.regions
    }

    /// The regions, for storing rendering tokens.
    pub fn regions_mut(&mut self) -> &mut HighlightRegions {
        &mut self.regions
    }

    /// Hit tester over the current lines.
    pub fn hit_tester(&self) -> HitTester<'_> {
        HitTester::new(self.lines.lines(), self.text.len())
    }

    /// Selection queries over the current lines.
    pub fn selection_engine(&self) -> SelectionEngine<'_> {
        SelectionEngine::new(&self.text, self.lines.lines())
    }

    /// The offset nearest to `point`.
    pub fn nearest_index(&self, point: Point) -> usize {
        self.hit_tester().nearest_index(point)
    }

    /// The offset under `point` for taps.
    pub fn text_index(&self, point: Point) -> Option<usize> {
        self.hit_tester().text_index(point)
    }

    /// The region under `point`, using the interaction inset.
    pub fn region_at(&self, point: Point) -> Option<&HighlightRegion> {
        self.regions.region_at(point, self.options.interaction_inset)
    }

    /// The link region under `point`.
    pub fn link_region_at(&self, point: Point) -> Option<&HighlightRegion> {
        let inset = self.options.interaction_inset;
        self.regions
            .iter()
            .find(|r| r.link().is_some() && r.contains(point, inset))
    }

    /// The attachment region under `point`.
    ///
    /// Attachments are hit exactly, without the interaction inset.
    pub fn attachment_at(&self, point: Point) -> Option<&HighlightRegion> {
        self.regions.attachments().find(|r| r.contains(point, 0.0))
    }

    /// The current selection.
    pub fn selection(&self) -> Option<SelectionRange> {
        self.selection
    }

    /// Replaces the selection.
    ///
    /// A selection that does not fit the current text is stale and clears the
    /// selection instead. Returns the selection now in effect.
    pub fn set_selection(&mut self, selection: Option<SelectionRange>) -> Option<SelectionRange> {
        if !self.options.selectable {
            return None;
        }
        let validated = selection.and_then(|s| s.validated(self.text.len()));
        if selection.is_some() && validated.is_none() {
            tracing::debug!(?selection, text_len = self.text.len(), "dropped stale selection");
        }
        self.selection = validated;
        self.selection
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Selects the word at `index`.
    pub fn select_word(&mut self, index: usize) -> Option<SelectionRange> {
        let selection = self.selection_engine().select_word(index);
        self.set_selection(selection)
    }

    /// Selects the line at `index`.
    pub fn select_line(&mut self, index: usize) -> Option<SelectionRange> {
        let selection = self.selection_engine().select_line(index);
        self.set_selection(selection)
    }

    /// Selects between the offsets nearest to two points.
    pub fn select_range(&mut self, anchor: Point, current: Point) -> Option<SelectionRange> {
        let selection = self.selection_engine().select_range(anchor, current);
        self.set_selection(selection)
    }

    /// Selects all of the text.
    pub fn select_all(&mut self) -> Option<SelectionRange> {
        let selection = self.selection_engine().select_all();
        self.set_selection(selection)
    }

    /// Rectangles covering the selection, one per line.
    pub fn selection_rects(&self) -> Vec<Rect> {
        self.selection
            .map(|s| self.selection_engine().rects_for(s.range()))
            .unwrap_or_default()
    }

    /// Returns `true` if `point` lies on the selection.
    pub fn is_point_in_selection(&self, point: Point) -> bool {
        self.selection
            .is_some_and(|s| self.selection_engine().contains_point(s, point))
    }

    /// The selected text with attachments replaced by their text.
    pub fn selected_plain_text(&self) -> Option<String> {
        let selection = self.selection?.validated(self.text.len())?;
        self.text.plain_text(selection.range())
    }

    /// The selected part of the styled text.
    pub fn selected_styled_text(&self) -> Option<StyledText> {
        let selection = self.selection?.validated(self.text.len())?;
        self.text.slice(selection.range())
    }

    /// Matches the current attachments with the widgets placed last time.
    pub fn reconcile_attachments<H>(
        &self,
        previous: Vec<AttachmentSlot<H>>,
    ) -> Reconciliation<H> {
        reconcile(SlotRequest::from_regions(&self.regions), previous)
    }
}
