// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pooled placement of attachment widgets.

use core::ops::Range;
use std::collections::VecDeque;

use hashbrown::HashMap;
use lumen_text::ReuseKey;
use peniko::kurbo::Rect;

use crate::highlight::HighlightRegions;

/// A widget handle placed at a rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct AttachmentSlot<H> {
    /// Pool the widget belongs to.
    pub reuse_key: ReuseKey,
    /// Where the widget is placed, in container coordinates.
    pub rect: Rect,
    /// The embedder's widget handle.
    pub handle: H,
}

/// A placement for an attachment that has no widget yet.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotRequest {
    /// Pool to create the widget in.
    pub reuse_key: ReuseKey,
    /// Where the widget goes.
    pub rect: Rect,
    /// Text range of the attachment.
    pub range: Range<usize>,
}

impl SlotRequest {
    /// One request per attachment region, placed at its first rectangle.
    pub fn from_regions(regions: &HighlightRegions) -> Vec<Self> {
        regions
            .attachments()
            .filter_map(|region| {
                let attachment = region.attachment()?;
                let rect = *region.rects().first()?;
                Some(Self {
                    reuse_key: attachment.reuse_key().clone(),
                    rect,
                    range: region.range(),
                })
            })
            .collect()
    }
}

/// How to get from the previous widget placement to the current one.
#[derive(Clone, Debug, PartialEq)]
pub struct Reconciliation<H> {
    /// Reused widgets already at the right place.
    pub keep: Vec<AttachmentSlot<H>>,
    /// Reused widgets to move. Each slot carries its new rectangle.
    pub reposition: Vec<AttachmentSlot<H>>,
    /// Attachments that need a new widget.
    pub create: Vec<SlotRequest>,
    /// Widgets no longer needed, in their previous order.
    pub release: Vec<AttachmentSlot<H>>,
}

impl<H> Default for Reconciliation<H> {
    fn default() -> Self {
        Self {
            keep: Vec::new(),
            reposition: Vec::new(),
            create: Vec::new(),
            release: Vec::new(),
        }
    }
}

impl<H> Reconciliation<H> {
    /// Returns `true` if nothing needs to change.
    pub fn is_unchanged(&self) -> bool {
        self.reposition.is_empty() && self.create.is_empty() && self.release.is_empty()
    }

    /// The slots in place once the embedder has applied this reconciliation.
    ///
    /// `create` is called for each requested widget. Released slots are
    /// dropped.
    pub fn into_slots(self, mut create: impl FnMut(&SlotRequest) -> H) -> Vec<AttachmentSlot<H>> {
        let created = self.create.iter().map(|request| AttachmentSlot {
            reuse_key: request.reuse_key.clone(),
            rect: request.rect,
            handle: create(request),
        });
        let mut slots: Vec<_> = self.keep;
        slots.extend(self.reposition);
        slots.extend(created);
        slots
    }
}

/// Matches `current` attachment placements with `previous` widgets.
///
/// Widgets are only reused within the pool of their reuse key, first come
/// first served. A claimed widget is kept if its rectangle is unchanged and
/// repositioned otherwise. Placements left without a widget are created and
/// widgets left unclaimed are released.
pub fn reconcile<H>(
    current: impl IntoIterator<Item = SlotRequest>,
    previous: Vec<AttachmentSlot<H>>,
) -> Reconciliation<H> {
    let mut pools: HashMap<ReuseKey, VecDeque<usize>> = HashMap::new();
    for (index, slot) in previous.iter().enumerate() {
        pools.entry(slot.reuse_key.clone()).or_default().push_back(index);
    }
    let mut previous: Vec<Option<AttachmentSlot<H>>> = previous.into_iter().map(Some).collect();

    let mut result = Reconciliation::default();
    for request in current {
        let claimed = pools
            .get_mut(&request.reuse_key)
            .and_then(VecDeque::pop_front)
            .and_then(|index| previous[index].take());
        match claimed {
            Some(slot) if slot.rect == request.rect => result.keep.push(slot),
            Some(slot) => result.reposition.push(AttachmentSlot {
                rect: request.rect,
                ..slot
            }),
            None => result.create.push(request),
        }
    }
    result.release = previous.into_iter().flatten().collect();
    tracing::debug!(
        keep = result.keep.len(),
        reposition = result.reposition.len(),
        create = result.create.len(),
        release = result.release.len(),
        "reconciled attachment slots"
    );
    result
}
