// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lumen Text is the styled text model consumed by the Lumen layout core.
//!
//! A [`StyledText`] is an immutable string plus a list of style spans. Spans are
//! resolved into coalesced [`AttributeRun`]s where the last applied property wins,
//! and the two attributes the layout core acts upon (links and attachments) can
//! be queried for their [effective range](StyledText::effective_range).
//!
//! ## Features
//!
//! - `std` (enabled by default): Enables `std` support in `peniko`.
//! - `libm`: Use `libm` for floating point math in `no_std` builds.
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
#![no_std]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("lumen_text requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

mod attributes;
mod builder;
mod error;
mod runs;
mod styled_text;

pub use crate::attributes::{
    Alignment, Attachment, AttributeKey, Link, ParagraphStyle, ReuseKey, StyleProperty,
    TextAttributes,
};
pub use crate::builder::StyledTextBuilder;
pub use crate::error::{BoundaryInfo, Endpoint, Error, ErrorKind};
pub use crate::runs::AttributeRun;
pub use crate::styled_text::StyledText;

/// The character used to stand in for an [`Attachment`] in the text.
pub const OBJECT_REPLACEMENT_CHARACTER: char = '\u{FFFC}';

/// Returns `true` if `ch` forces a line break after it.
pub fn is_hard_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
