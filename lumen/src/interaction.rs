// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform independent pointer and command handling.
//!
//! Host bindings translate their native events into [`PointerEvent`]s and
//! [`Command`]s and act on the returned [`InteractionResponse`].

use core::ops::Range;
use std::time::{Duration, Instant};

use lumen_text::{AttributeKey, Link};
use peniko::kurbo::Point;

use crate::label::TextLabel;
use crate::selection::{Granularity, SelectionState};
use crate::shape::Shaper;

/// Stage of a pointer gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    /// A button was pressed.
    Down,
    /// The pointer moved while pressed.
    Moved,
    /// The button was released.
    Up,
    /// The host took the gesture away.
    Cancelled,
}

/// Pointer button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PointerButton {
    /// The main button.
    #[default]
    Primary,
    /// The context menu button.
    Secondary,
}

/// A pointer event in container coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Location of the pointer.
    pub location: Point,
    /// Stage of the gesture.
    pub phase: PointerPhase,
    /// Button involved.
    pub button: PointerButton,
    /// Resolved click count of a press, starting at 1.
    pub click_count: u32,
}

impl PointerEvent {
    /// A primary button press.
    pub fn down(location: Point, click_count: u32) -> Self {
        Self {
            location,
            phase: PointerPhase::Down,
            button: PointerButton::Primary,
            click_count,
        }
    }

    /// A primary button drag.
    pub fn moved(location: Point) -> Self {
        Self {
            phase: PointerPhase::Moved,
            ..Self::down(location, 0)
        }
    }

    /// A primary button release.
    pub fn up(location: Point) -> Self {
        Self {
            phase: PointerPhase::Up,
            ..Self::down(location, 0)
        }
    }

    /// A secondary button press.
    pub fn secondary(location: Point) -> Self {
        Self {
            button: PointerButton::Secondary,
            ..Self::down(location, 1)
        }
    }
}

/// Keyboard commands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Copy the selection.
    Copy,
    /// Select all of the text.
    SelectAll,
}

/// Identifies the owner of a context menu.
///
/// Shared menu systems use it to tell which label a menu belongs to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OwnerToken(pub u64);

/// Gesture thresholds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    /// Distance the pointer must travel from the press before a drag starts.
    pub drag_threshold: f64,
    /// Longest pause between presses of a multi-click.
    pub multi_click_interval: Duration,
    /// Farthest distance between presses of a multi-click.
    pub multi_click_distance: f64,
    /// Owner of the menus this interaction requests.
    pub owner: OwnerToken,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 4.0,
            multi_click_interval: Duration::from_millis(500),
            multi_click_distance: 4.0,
            owner: OwnerToken::default(),
        }
    }
}

/// Groups presses that are close in time and space into multi-clicks.
///
/// For hosts whose events carry no click count.
#[derive(Clone, Debug)]
pub struct ClickCounter {
    interval: Duration,
    distance: f64,
    last: Option<(Instant, Point, u32)>,
}

impl ClickCounter {
    /// Creates a counter with the thresholds of `config`.
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            interval: config.multi_click_interval,
            distance: config.multi_click_distance,
            last: None,
        }
    }

    /// Records a press and returns its click count.
    pub fn register(&mut self, location: Point, now: Instant) -> u32 {
        let count = match self.last {
            Some((at, point, count))
                if now.saturating_duration_since(at) <= self.interval
                    && point.distance(location) <= self.distance =>
            {
                count.saturating_add(1)
            }
            _ => 1,
        };
        self.last = Some((now, location, count));
        count
    }

    /// Forgets previous presses.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for ClickCounter {
    fn default() -> Self {
        Self::new(&InteractionConfig::default())
    }
}

/// A press and release on the same link region.
///
/// Presses on attachments pass through to their widgets and never tap.
#[derive(Clone, Debug, PartialEq)]
pub struct Tap {
    /// Range of the region.
    pub range: Range<usize>,
    /// The tapped link.
    pub link: Link,
    /// Where the pointer was released.
    pub location: Point,
}

/// Kind of context menu to show.
#[derive(Clone, Debug, PartialEq)]
pub enum MenuKind {
    /// Actions on the selection.
    Selection,
    /// Actions on a link.
    Link(Link),
}

/// A request to show a context menu.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuRequest {
    /// The interaction asking for the menu.
    pub owner: OwnerToken,
    /// Where to show the menu.
    pub location: Point,
    /// What the menu is about.
    pub kind: MenuKind,
}

/// What the host should do after an event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionResponse {
    /// The selection or the active region changed.
    pub repaint: bool,
    /// The event landed on an attachment and belongs to its widget.
    pub pass_through: bool,
    /// A region was tapped.
    pub tap: Option<Tap>,
    /// A context menu should be shown.
    pub menu: Option<MenuRequest>,
    /// Text to put on the clipboard.
    pub copied: Option<String>,
}

/// Gesture state of a pointer driving a [`TextLabel`].
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    config: InteractionConfig,
    anchor: Option<Point>,
    first_move: bool,
    dragging: bool,
    active_region: Option<Range<usize>>,
    pressed_generation: u64,
    state: SelectionState,
}

impl Interaction {
    /// Creates an idle interaction.
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The gesture thresholds.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Current gesture state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Start of the active link region, if one is pressed.
    pub fn active_region(&self) -> Option<usize> {
        self.active_region.as_ref().map(|range| range.start)
    }

    /// Handles a pointer event.
    pub fn handle_pointer<S: Shaper>(
        &mut self,
        label: &mut TextLabel<S>,
        event: &PointerEvent,
    ) -> InteractionResponse {
        match (event.button, event.phase) {
            (PointerButton::Secondary, PointerPhase::Down) => self.context_menu(label, event),
            (PointerButton::Secondary, _) => InteractionResponse::default(),
            (PointerButton::Primary, PointerPhase::Down) => self.pointer_down(label, event),
            (PointerButton::Primary, PointerPhase::Moved) => self.pointer_moved(label, event),
            (PointerButton::Primary, PointerPhase::Up) => self.pointer_up(label, event),
            (PointerButton::Primary, PointerPhase::Cancelled) => self.cancel(),
        }
    }

    /// Handles a keyboard command.
    pub fn handle_command<S: Shaper>(
        &mut self,
        label: &mut TextLabel<S>,
        command: Command,
    ) -> InteractionResponse {
        match command {
            Command::Copy => InteractionResponse {
                copied: label.selected_plain_text(),
                ..InteractionResponse::default()
            },
            Command::SelectAll => InteractionResponse {
                repaint: label.select_all().is_some(),
                ..InteractionResponse::default()
            },
        }
    }

    fn pointer_down<S: Shaper>(
        &mut self,
        label: &mut TextLabel<S>,
        event: &PointerEvent,
    ) -> InteractionResponse {
        let location = event.location;
        if label.attachment_at(location).is_some() {
            return InteractionResponse {
                pass_through: true,
                ..InteractionResponse::default()
            };
        }
        self.anchor = Some(location);
        self.first_move = true;
        self.dragging = false;

        let mut response = InteractionResponse::default();
        if let Some(region) = label.link_region_at(location) {
            self.active_region = Some(region.range());
            self.pressed_generation = label.generation();
            response.repaint = true;
            return response;
        }
        if !label.options().selectable {
            return response;
        }

        let had_selection = label.selection().is_some();
        let granularity = Granularity::from_click_count(event.click_count);
        let selection = match granularity {
            Granularity::Character => {
                if !label.is_point_in_selection(location) {
                    label.clear_selection();
                }
                label.selection()
            }
            Granularity::Word => label.text_index(location).and_then(|i| label.select_word(i)),
            Granularity::Line => label.text_index(location).and_then(|i| label.select_line(i)),
        };
        self.state = match (granularity, selection) {
            (Granularity::Character, _) | (_, None) => SelectionState::Idle,
            (granularity, Some(_)) => granularity.into(),
        };
        response.repaint = had_selection || label.selection().is_some();
        tracing::trace!(?granularity, ?selection, "pointer down");
        response
    }

    fn pointer_moved<S: Shaper>(
        &mut self,
        label: &mut TextLabel<S>,
        event: &PointerEvent,
    ) -> InteractionResponse {
        let Some(anchor) = self.anchor else {
            return InteractionResponse::default();
        };
        if !self.dragging && anchor.distance(event.location) <= self.config.drag_threshold {
            return InteractionResponse::default();
        }
        self.dragging = true;

        let mut response = InteractionResponse {
            repaint: self.active_region.take().is_some(),
            ..InteractionResponse::default()
        };
        if self.first_move {
            self.first_move = false;
            response.repaint |= label.selection().is_some();
            label.clear_selection();
        }
        if label.options().selectable {
            let selection = label.select_range(anchor, event.location);
            self.state = SelectionState::Dragging;
            response.repaint |= selection.is_some();
        }
        response
    }

    fn pointer_up<S: Shaper>(
        &mut self,
        label: &mut TextLabel<S>,
        event: &PointerEvent,
    ) -> InteractionResponse {
        let mut response = InteractionResponse::default();
        if let Some(pressed) = self.active_region.take() {
            response.repaint = true;
            // A relayout since the press invalidates the pressed range.
            let inset = label.options().interaction_inset;
            let region = label
                .regions()
                .get(AttributeKey::Link, pressed.start)
                .filter(|_| label.generation() == self.pressed_generation)
                .filter(|r| r.range() == pressed && r.contains(event.location, inset));
            if let Some(link) = region.and_then(|r| r.link()) {
                response.tap = Some(Tap {
                    range: pressed,
                    link: link.clone(),
                    location: event.location,
                });
            }
        }
        if self.state == SelectionState::Dragging {
            self.state = SelectionState::Idle;
        }
        self.anchor = None;
        self.dragging = false;
        response
    }

    fn cancel(&mut self) -> InteractionResponse {
        let repaint = self.active_region.take().is_some();
        self.anchor = None;
        self.dragging = false;
        self.state = SelectionState::Idle;
        InteractionResponse {
            repaint,
            ..InteractionResponse::default()
        }
    }

    fn context_menu<S: Shaper>(
        &self,
        label: &TextLabel<S>,
        event: &PointerEvent,
    ) -> InteractionResponse {
        let kind = if label.selection().is_some() {
            Some(MenuKind::Selection)
        } else {
            label
                .link_region_at(event.location)
                .and_then(|r| r.link())
                .map(|link| MenuKind::Link(link.clone()))
        };
        InteractionResponse {
            menu: kind.map(|kind| MenuRequest {
                owner: self.config.owner,
                location: event.location,
                kind,
            }),
            ..InteractionResponse::default()
        }
    }
}
