// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lumen_text::StyledText;
use peniko::kurbo::Point;

use crate::{ContainerSize, Interaction, InteractionResponse, PointerEvent, TextLabel};

/// Helper struct for laying out a label and pointing at its characters.
///
/// All layouts use the default [`MetricsShaper`](crate::MetricsShaper), so
/// every character of unstyled text is 8 pixels wide and every line is 16
/// pixels tall with its baseline 12 pixels below its top. Tests can locate
/// characters by the substring they belong to instead of by coordinates.
pub(crate) struct LabelTest {
    pub(crate) label: TextLabel,
    pub(crate) interaction: Interaction,
}

impl LabelTest {
    pub(crate) fn new(text: StyledText, container: ContainerSize) -> Self {
        let mut label = TextLabel::default();
        label.set_container_size(container);
        label.set_text(text);
        Self {
            label,
            interaction: Interaction::default(),
        }
    }

    /// Unstyled text in a container of unlimited height.
    pub(crate) fn plain(text: &str, width: f32) -> Self {
        Self::new(StyledText::new(text), ContainerSize::unbounded_height(width))
    }

    #[track_caller]
    pub(crate) fn index_of(&self, needle: &str) -> usize {
        let text = self.label.text().as_str();
        let Some(index) = text.find(needle) else {
            panic!("needle '{needle}' not found in text '{text}'");
        };
        assert_eq!(
            text.matches(needle).count(),
            1,
            "needle '{needle}' is not unique in text '{text}'"
        );
        index
    }

    /// The center of the character at byte `index`.
    #[track_caller]
    pub(crate) fn point_at(&self, index: usize) -> Point {
        let end = index
            + self.label.text().as_str()[index..]
                .chars()
                .next()
                .map_or(0, char::len_utf8);
        let rects = self.label.selection_engine().rects_for(index..end);
        let [rect] = rects.as_slice() else {
            panic!("character at {index} has {} rects", rects.len());
        };
        rect.center()
    }

    /// The center of the first character of `needle`.
    #[track_caller]
    pub(crate) fn point_on(&self, needle: &str) -> Point {
        self.point_at(self.index_of(needle))
    }

    /// The texts of the lines.
    pub(crate) fn line_texts(&self) -> Vec<&str> {
        let text = self.label.text().as_str();
        self.label
            .lines()
            .iter()
            .map(|line| &text[line.text_range()])
            .collect()
    }

    pub(crate) fn pointer(&mut self, event: PointerEvent) -> InteractionResponse {
        self.interaction.handle_pointer(&mut self.label, &event)
    }

    /// A press and release at `point` with `click_count`.
    pub(crate) fn click(&mut self, point: Point, click_count: u32) -> InteractionResponse {
        self.pointer(PointerEvent::down(point, click_count));
        self.pointer(PointerEvent::up(point))
    }

    pub(crate) fn selected_text(&self) -> Option<&str> {
        let selection = self.label.selection()?;
        Some(&self.label.text().as_str()[selection.range()])
    }
}
