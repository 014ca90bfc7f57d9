// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive regions of laid out text.

use core::ops::Range;

use hashbrown::HashMap;
use lumen_text::{Attachment, AttributeKey, Link, StyledText, TextAttributes};
use peniko::kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::shape::{GlyphRun, ShapedLine};

/// Share of an attachment's height its rectangle extends below the baseline.
const ATTACHMENT_BASELINE_SHIFT: f64 = 0.1;

/// Handle stored on a region by the rendering collaborator.
///
/// The layout core never reads it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RenderToken(pub u64);

/// What a region points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionKind {
    /// A link span.
    Link(Link),
    /// An inline attachment.
    Attachment(Attachment),
}

/// A link or attachment span with the rectangles it covers.
#[derive(Clone, Debug)]
pub struct HighlightRegion {
    range: Range<usize>,
    attributes: TextAttributes,
    kind: RegionKind,
    rects: SmallVec<[Rect; 2]>,
    rendering_token: Option<RenderToken>,
}

impl HighlightRegion {
    /// The effective range of the region's link or attachment.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Attributes at the start of the region.
    pub fn attributes(&self) -> &TextAttributes {
        &self.attributes
    }

    /// What the region points at.
    pub fn kind(&self) -> &RegionKind {
        &self.kind
    }

    /// The attribute the region was built from.
    pub fn key(&self) -> AttributeKey {
        match self.kind {
            RegionKind::Link(_) => AttributeKey::Link,
            RegionKind::Attachment(_) => AttributeKey::Attachment,
        }
    }

    /// The link, if this is a link region.
    pub fn link(&self) -> Option<&Link> {
        match &self.kind {
            RegionKind::Link(link) => Some(link),
            RegionKind::Attachment(_) => None,
        }
    }

    /// The attachment, if this is an attachment region.
    pub fn attachment(&self) -> Option<&Attachment> {
        match &self.kind {
            RegionKind::Attachment(attachment) => Some(attachment),
            RegionKind::Link(_) => None,
        }
    }

    /// One rectangle per visual run of the region, in reading order.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Returns `true` if `point` lies within `inset` of any of the rectangles.
    pub fn contains(&self, point: Point, inset: f64) -> bool {
        self.rects
            .iter()
            .any(|rect| rect.inflate(inset, inset).contains(point))
    }

    /// The token set by the rendering collaborator.
    pub fn rendering_token(&self) -> Option<RenderToken> {
        self.rendering_token
    }

    /// Stores a rendering token on the region.
    pub fn set_rendering_token(&mut self, token: RenderToken) {
        self.rendering_token = Some(token);
    }

    /// Removes and returns the rendering token.
    pub fn take_rendering_token(&mut self) -> Option<RenderToken> {
        self.rendering_token.take()
    }
}

/// The regions of one layout pass, keyed by their attribute and the start of
/// their range.
///
/// A link and an attachment may start at the same offset, for example when a
/// link wraps an attachment, and still form separate regions.
#[derive(Clone, Debug, Default)]
pub struct HighlightRegions {
    regions: Vec<HighlightRegion>,
    by_start: HashMap<(AttributeKey, usize), usize>,
}

impl HighlightRegions {
    /// Collects the link and attachment regions shown by `lines`.
    ///
    /// Runs belonging to the same effective range accumulate into a single
    /// region, so a link wrapped over two lines yields one region with two
    /// rectangles.
    pub fn extract(lines: &[ShapedLine], text: &StyledText) -> Self {
        let mut regions = Self::default();
        for line in lines {
            let origin = line.origin();
            for run in line.runs() {
                if run.is_truncation_token() {
                    continue;
                }
                let attributes = run.attributes();
                let (key, kind) = if let Some(attachment) = &attributes.attachment {
                    (
                        AttributeKey::Attachment,
                        RegionKind::Attachment(attachment.clone()),
                    )
                } else if let Some(link) = &attributes.link {
                    (AttributeKey::Link, RegionKind::Link(link.clone()))
                } else {
                    continue;
                };
                let Some(range) = text.effective_range(run.text_range().start, key) else {
                    continue;
                };
                let rect = run_rect(origin, run);
                match regions.by_start.get(&(key, range.start)) {
                    Some(&index) => regions.regions[index].rects.push(rect),
                    None => {
                        regions
                            .by_start
                            .insert((key, range.start), regions.regions.len());
                        regions.regions.push(HighlightRegion {
                            range,
                            attributes: attributes.clone(),
                            kind,
                            rects: smallvec::smallvec![rect],
                            rendering_token: None,
                        });
                    }
                }
            }
        }
        tracing::trace!(regions = regions.len(), "extracted highlight regions");
        regions
    }

    /// The region built from `key` whose range starts at `start`.
    pub fn get(&self, key: AttributeKey, start: usize) -> Option<&HighlightRegion> {
        self.by_start.get(&(key, start)).map(|&i| &self.regions[i])
    }

    /// The region built from `key` whose range starts at `start`, mutably.
    pub fn get_mut(&mut self, key: AttributeKey, start: usize) -> Option<&mut HighlightRegion> {
        self.by_start.get(&(key, start)).map(|&i| &mut self.regions[i])
    }

    /// Regions in the order they were first encountered.
    pub fn iter(&self) -> impl Iterator<Item = &HighlightRegion> + '_ {
        self.regions.iter()
    }

    /// Regions in the order they were first encountered, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut HighlightRegion> + '_ {
        self.regions.iter_mut()
    }

    /// Attachment regions in the order they were first encountered.
    pub fn attachments(&self) -> impl Iterator<Item = &HighlightRegion> + '_ {
        self.regions.iter().filter(|r| r.attachment().is_some())
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if there are no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The first region containing `point`, with rectangles grown by `inset`.
    pub fn region_at(&self, point: Point, inset: f64) -> Option<&HighlightRegion> {
        self.regions.iter().find(|r| r.contains(point, inset))
    }
}

/// The rectangle covered by `run` on a line with baseline origin `origin`.
///
/// Attachments use their declared size and extend a tenth of their height
/// below the baseline.
fn run_rect(origin: Point, run: &GlyphRun) -> Rect {
    let x0 = origin.x + f64::from(run.offset());
    if let Some(attachment) = &run.attributes().attachment {
        let size = attachment.size();
        let bottom = origin.y + size.height * ATTACHMENT_BASELINE_SHIFT;
        return Rect::new(x0, bottom - size.height, x0 + size.width, bottom);
    }
    Rect::new(
        x0,
        origin.y - f64::from(run.ascent()),
        x0 + f64::from(run.advance()),
        origin.y + f64::from(run.descent()),
    )
}
