// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout, hit-testing and selection for interactive styled text.
//!
//! A layout pass turns a [`StyledText`] and a [`ContainerSize`] into shaped
//! lines ([`LineCache`]), ends the last line with an ellipsis when the text
//! does not fit ([`truncate`]), and collects link and attachment
//! [`HighlightRegions`]. [`HitTester`] and [`SelectionEngine`] answer
//! geometric queries over the lines of a pass, and [`reconcile`] places
//! pooled attachment widgets.
//!
//! [`TextLabel`] sequences these steps and holds the selection, and
//! [`Interaction`] drives a label from pointer events and commands.
//!
//! Shaping is delegated to a [`Shaper`]. [`MetricsShaper`] is a font-less
//! implementation with fixed advances.
//!
//! Text offsets are UTF-8 byte offsets. Coordinates are container-local with
//! y growing downward.
//!
//! ```
//! use lumen::{ContainerSize, TextLabel};
//! use lumen::kurbo::Point;
//! use lumen_text::StyledText;
//!
//! let mut label = TextLabel::default();
//! label.set_container_size(ContainerSize::unbounded_height(200.0));
//! label.set_text(StyledText::new("hello world"));
//! let index = label.text_index(Point::new(60.0, 8.0)).unwrap();
//! let word = label.select_word(index).unwrap();
//! assert_eq!(word.range(), 6..11);
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use lumen_text;
pub use peniko::kurbo;

mod attachment;
mod interaction;
mod label;

pub mod highlight;
pub mod layout;
pub mod selection;
pub mod shape;

#[cfg(test)]
mod tests;

pub use attachment::{reconcile, AttachmentSlot, Reconciliation, SlotRequest};
pub use highlight::{HighlightRegion, HighlightRegions, RegionKind, RenderToken};
pub use hit_test::{HitTester, LineHit};
pub use interaction::{
    ClickCounter, Command, Interaction, InteractionConfig, InteractionResponse, MenuKind,
    MenuRequest, OwnerToken, PointerButton, PointerEvent, PointerPhase, Tap,
};
pub use label::{LabelOptions, TextLabel};
pub use layout::{truncate, ContainerSize, LineCache, TRUNCATION_TOKEN};
pub use lumen_text::StyledText;
pub use selection::{Granularity, SelectionEngine, SelectionRange, SelectionState};
pub use shape::{MetricsShaper, MetricsShaperOptions, ShapedLine, Shaper};
