// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;

use peniko::color::Rgba8;
use peniko::kurbo::Size;

/// Horizontal alignment of the lines of a paragraph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Lines start at the leading edge of the container.
    #[default]
    Start,
    /// Lines are centered in the container.
    Center,
    /// Lines end at the trailing edge of the container.
    End,
}

/// Paragraph level style.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ParagraphStyle {
    /// Horizontal alignment of each line.
    pub alignment: Alignment,
    /// Extra space added above each line, in pixels.
    pub line_spacing: f32,
}

/// Target of a link span.
///
/// Two links are the same link when their targets are equal, so adjacent spans
/// pointing at the same URL form a single effective range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Link(Arc<str>);

impl Link {
    /// Creates a link pointing at `url`.
    pub fn new(url: impl Into<Arc<str>>) -> Self {
        Self(url.into())
    }

    /// The link target.
    pub fn url(&self) -> &str {
        &self.0
    }
}

/// Caller assigned key used to pool interchangeable attachment widgets.
///
/// Widgets created for one attachment may be handed to any other attachment
/// with an equal key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReuseKey(Arc<str>);

impl ReuseKey {
    /// Creates a new reuse key.
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// The key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ReuseKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// An inline widget embedded in the text.
///
/// Attachments are compared by identity: two clones of the same attachment are
/// equal, two attachments built from equal parts are not.
#[derive(Clone, Debug)]
pub struct Attachment(Arc<AttachmentData>);

#[derive(Debug)]
struct AttachmentData {
    reuse_key: ReuseKey,
    size: Size,
    text_representation: Arc<str>,
}

impl Attachment {
    /// Creates an attachment of the given size.
    ///
    /// `text_representation` replaces the attachment when text is extracted
    /// for the clipboard.
    pub fn new(
        reuse_key: impl Into<ReuseKey>,
        size: Size,
        text_representation: impl Into<Arc<str>>,
    ) -> Self {
        Self(Arc::new(AttachmentData {
            reuse_key: reuse_key.into(),
            size,
            text_representation: text_representation.into(),
        }))
    }

    /// The key used to pool widgets for this attachment.
    pub fn reuse_key(&self) -> &ReuseKey {
        &self.0.reuse_key
    }

    /// The declared size of the attachment.
    pub fn size(&self) -> Size {
        self.0.size
    }

    /// Text substituted for the attachment in plain text extraction.
    pub fn text_representation(&self) -> &str {
        &self.0.text_representation
    }
}

impl PartialEq for Attachment {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Attachment {}

/// The attributes that make a span interactive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    /// [`TextAttributes::link`].
    Link,
    /// [`TextAttributes::attachment`].
    Attachment,
}

/// A single style property applied over a range of text.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleProperty {
    /// Font family name.
    FontFamily(Arc<str>),
    /// Font size in pixels.
    FontSize(f32),
    /// Font weight, 400 being regular.
    FontWeight(f32),
    /// Foreground color.
    Color(Rgba8),
    /// Underline decoration.
    Underline(bool),
    /// Strikethrough decoration.
    Strikethrough(bool),
    /// Paragraph style.
    Paragraph(ParagraphStyle),
    /// Link target.
    Link(Link),
    /// Inline attachment.
    Attachment(Attachment),
}

/// The fully resolved attributes of a run of text.
///
/// Every style field is optional so that an unset field can fall back to the
/// shaper's defaults.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct TextAttributes {
    /// Font family name.
    pub font_family: Option<Arc<str>>,
    /// Font size in pixels.
    pub font_size: Option<f32>,
    /// Font weight.
    pub font_weight: Option<f32>,
    /// Foreground color.
    pub color: Option<Rgba8>,
    /// Whether the text is underlined.
    pub underline: bool,
    /// Whether the text is struck through.
    pub strikethrough: bool,
    /// Paragraph style.
    pub paragraph: Option<ParagraphStyle>,
    /// Link target.
    pub link: Option<Link>,
    /// Inline attachment.
    pub attachment: Option<Attachment>,
}

impl TextAttributes {
    /// Overwrites the field addressed by `property`.
    pub fn apply(&mut self, property: &StyleProperty) {
        match property {
            StyleProperty::FontFamily(family) => self.font_family = Some(family.clone()),
            StyleProperty::FontSize(size) => self.font_size = Some(*size),
            StyleProperty::FontWeight(weight) => self.font_weight = Some(*weight),
            StyleProperty::Color(color) => self.color = Some(*color),
            StyleProperty::Underline(underline) => self.underline = *underline,
            StyleProperty::Strikethrough(strikethrough) => self.strikethrough = *strikethrough,
            StyleProperty::Paragraph(paragraph) => self.paragraph = Some(*paragraph),
            StyleProperty::Link(link) => self.link = Some(link.clone()),
            StyleProperty::Attachment(attachment) => self.attachment = Some(attachment.clone()),
        }
    }

    /// Returns `true` if the attribute addressed by `key` is equal in both sets.
    pub fn same_value(&self, other: &Self, key: AttributeKey) -> bool {
        match key {
            AttributeKey::Link => self.link == other.link,
            AttributeKey::Attachment => self.attachment == other.attachment,
        }
    }

    /// Returns `true` if the attribute addressed by `key` is set.
    pub fn has(&self, key: AttributeKey) -> bool {
        match key {
            AttributeKey::Link => self.link.is_some(),
            AttributeKey::Attachment => self.attachment.is_some(),
        }
    }

    /// The subset of attributes that describe how glyphs look.
    ///
    /// Used to style synthesized glyphs such as a truncation token: font,
    /// color and paragraph style are kept, decorations and interactive
    /// attributes are dropped.
    pub fn appearance(&self) -> Self {
        Self {
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            font_weight: self.font_weight,
            color: self.color,
            paragraph: self.paragraph,
            ..Self::default()
        }
    }
}
