// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Range;

use crate::error::validate_range;
use crate::runs::{resolve_runs, run_index};
use crate::{AttributeKey, AttributeRun, Error, StyleProperty, TextAttributes};

/// A string with style spans applied to it.
///
/// Cloning is cheap for the text itself, which is shared.
#[derive(Clone, Debug, Default)]
pub struct StyledText {
    text: Arc<str>,
    defaults: TextAttributes,
    spans: Vec<(Range<usize>, StyleProperty)>,
    runs: Vec<AttributeRun>,
}

impl StyledText {
    /// Creates unstyled text with default attributes.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self::with_defaults(text, TextAttributes::default())
    }

    /// Creates text where every character starts out with `defaults`.
    pub fn with_defaults(text: impl Into<Arc<str>>, defaults: TextAttributes) -> Self {
        let text = text.into();
        let runs = resolve_runs(text.len(), &defaults, &[]);
        Self {
            text,
            defaults,
            spans: Vec::new(),
            runs,
        }
    }

    pub(crate) fn from_parts(
        text: Arc<str>,
        defaults: TextAttributes,
        spans: Vec<(Range<usize>, StyleProperty)>,
    ) -> Self {
        let runs = resolve_runs(text.len(), &defaults, &spans);
        Self {
            text,
            defaults,
            spans,
            runs,
        }
    }

    /// Applies `property` over the byte `range`.
    ///
    /// Properties applied later take precedence where they overlap.
    ///
    /// Every call re-resolves the runs of the whole text. To style text built
    /// from many pieces, use [`StyledTextBuilder`](crate::StyledTextBuilder),
    /// which resolves once.
    pub fn apply(&mut self, range: Range<usize>, property: StyleProperty) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        if !range.is_empty() {
            self.spans.push((range, property));
            self.runs = resolve_runs(self.text.len(), &self.defaults, &self.spans);
        }
        Ok(())
    }

    /// The underlying string.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if there is no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The coalesced attribute runs, in text order, covering the whole text.
    pub fn runs(&self) -> &[AttributeRun] {
        &self.runs
    }

    /// Attributes in effect at byte `index`.
    pub fn attributes_at(&self, index: usize) -> Option<&TextAttributes> {
        run_index(&self.runs, index).map(|i| &self.runs[i].attributes)
    }

    /// The maximal range around `index` over which the attribute addressed by
    /// `key` is set and constant.
    ///
    /// Returns `None` if `index` is out of bounds or the attribute is not set
    /// at `index`.
    pub fn effective_range(&self, index: usize, key: AttributeKey) -> Option<Range<usize>> {
        let i = run_index(&self.runs, index)?;
        let attributes = &self.runs[i].attributes;
        if !attributes.has(key) {
            return None;
        }
        let same = |run: &AttributeRun| run.attributes.same_value(attributes, key);
        let first = self.runs[..i]
            .iter()
            .rposition(|run| !same(run))
            .map_or(0, |p| p + 1);
        let last = self.runs[i..]
            .iter()
            .position(|run| !same(run))
            .map_or(self.runs.len(), |p| p + i);
        Some(self.runs[first].range.start..self.runs[last - 1].range.end)
    }

    /// Copies the styled text in `range` into a new value.
    ///
    /// Returns `None` if `range` is not a valid range of this text.
    pub fn slice(&self, range: Range<usize>) -> Option<Self> {
        validate_range(&self.text, &range).ok()?;
        let spans = self
            .spans
            .iter()
            .filter_map(|(span, property)| {
                let start = span.start.max(range.start);
                let end = span.end.min(range.end);
                (start < end).then(|| (start - range.start..end - range.start, property.clone()))
            })
            .collect();
        Some(Self::from_parts(
            Arc::from(&self.text[range]),
            self.defaults.clone(),
            spans,
        ))
    }

    /// The text in `range` with every attachment replaced by its text
    /// representation.
    ///
    /// Returns `None` if `range` is not a valid range of this text.
    pub fn plain_text(&self, range: Range<usize>) -> Option<String> {
        validate_range(&self.text, &range).ok()?;
        let mut out = String::with_capacity(range.len());
        for run in &self.runs {
            let start = run.range.start.max(range.start);
            let end = run.range.end.min(range.end);
            if start >= end {
                continue;
            }
            let segment = &self.text[start..end];
            match &run.attributes.attachment {
                Some(attachment) => {
                    for ch in segment.chars() {
                        if ch == crate::OBJECT_REPLACEMENT_CHARACTER {
                            out.push_str(attachment.text_representation());
                        } else {
                            out.push(ch);
                        }
                    }
                }
                None => out.push_str(segment),
            }
        }
        Some(out)
    }
}

impl PartialEq for StyledText {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.runs == other.runs
    }
}
