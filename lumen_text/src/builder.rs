// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::{Attachment, Link, StyleProperty, StyledText, TextAttributes};

/// Builds a [`StyledText`] by appending styled fragments.
///
/// Ranges are computed by the builder, so building cannot fail.
#[derive(Clone, Debug, Default)]
pub struct StyledTextBuilder {
    text: String,
    defaults: TextAttributes,
    spans: Vec<(Range<usize>, StyleProperty)>,
}

impl StyledTextBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property on every character, including ones already pushed.
    pub fn push_default(&mut self, property: StyleProperty) -> &mut Self {
        self.defaults.apply(&property);
        self
    }

    /// Appends `text` styled with `properties`.
    pub fn push(
        &mut self,
        text: &str,
        properties: impl IntoIterator<Item = StyleProperty>,
    ) -> &mut Self {
        let start = self.text.len();
        self.text.push_str(text);
        let range = start..self.text.len();
        if !range.is_empty() {
            self.spans
                .extend(properties.into_iter().map(|p| (range.clone(), p)));
        }
        self
    }

    /// Appends `text` linking to `link`.
    pub fn push_link(
        &mut self,
        text: &str,
        link: Link,
        properties: impl IntoIterator<Item = StyleProperty>,
    ) -> &mut Self {
        self.push(
            text,
            core::iter::once(StyleProperty::Link(link)).chain(properties),
        )
    }

    /// Appends an object replacement character carrying `attachment`.
    pub fn push_attachment(&mut self, attachment: Attachment) -> &mut Self {
        let mut buf = [0_u8; 4];
        let placeholder = crate::OBJECT_REPLACEMENT_CHARACTER.encode_utf8(&mut buf);
        self.push(placeholder, [StyleProperty::Attachment(attachment)])
    }

    /// Finishes the text.
    pub fn build(self) -> StyledText {
        StyledText::from_parts(self.text.into(), self.defaults, self.spans)
    }
}
