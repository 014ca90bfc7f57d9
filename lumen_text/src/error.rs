// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// Error returned when a style span cannot be applied to a [`StyledText`].
///
/// Carries a non-exhaustive [`ErrorKind`] plus the attempted range and, for
/// boundary failures, the UTF-8 character enclosing the offending index.
///
/// [`StyledText`]: crate::StyledText
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    start: usize,
    end: usize,
    len: usize,
    boundary: Option<BoundaryInfo>,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` reports the length of the text being styled, not of the error."
)]
impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The start byte index of the range provided by the caller.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end byte index of the range provided by the caller.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The length in bytes of the text at the time of the error.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Boundary details, present when the kind is [`ErrorKind::NotOnCharBoundary`].
    pub fn boundary(&self) -> Option<BoundaryInfo> {
        self.boundary
    }

    fn new(kind: ErrorKind, range: &Range<usize>, len: usize) -> Self {
        Self {
            kind,
            start: range.start,
            end: range.end,
            len,
            boundary: None,
        }
    }

    fn not_on_char_boundary(text: &str, range: &Range<usize>, which: Endpoint) -> Self {
        let index = match which {
            Endpoint::Start => range.start,
            Endpoint::End => range.end,
        };
        let (char_start, char_end) = enclosing_char_span(text, index);
        Self {
            boundary: Some(BoundaryInfo {
                which,
                index,
                char_start,
                char_end,
            }),
            ..Self::new(ErrorKind::NotOnCharBoundary, range, text.len())
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidBounds => write!(
                f,
                "range {}..{} out of bounds for len {}",
                self.start, self.end, self.len
            ),
            ErrorKind::InvalidRange => {
                write!(f, "invalid range {}..{}: start > end", self.start, self.end)
            }
            ErrorKind::NotOnCharBoundary => match self.boundary {
                Some(b) => {
                    let which = match b.which {
                        Endpoint::Start => "start",
                        Endpoint::End => "end",
                    };
                    write!(
                        f,
                        "range {}..{}: {} index {} not on UTF-8 boundary (char {}..{})",
                        self.start, self.end, which, b.index, b.char_start, b.char_end
                    )
                }
                None => write!(
                    f,
                    "range {}..{} not on UTF-8 boundary",
                    self.start, self.end
                ),
            },
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The range extends past the end of the text.
    InvalidBounds,

    /// The provided range had `start > end`.
    InvalidRange,

    /// Either `start` or `end` was not aligned to a UTF-8 character boundary.
    NotOnCharBoundary,
}

/// Identifies which endpoint of a range failed boundary validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// The `start` endpoint of the range.
    Start,

    /// The `end` endpoint of the range.
    End,
}

/// Details about an index that was not on a UTF-8 character boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundaryInfo {
    /// Which endpoint was invalid.
    pub which: Endpoint,

    /// The offending byte index.
    pub index: usize,

    /// The start byte index of the enclosing codepoint.
    pub char_start: usize,

    /// The end byte index (exclusive) of the enclosing codepoint.
    pub char_end: usize,
}

/// Checks that `range` is ordered, in bounds and on character boundaries of `text`.
pub(crate) fn validate_range(text: &str, range: &Range<usize>) -> Result<(), Error> {
    if range.start > range.end {
        return Err(Error::new(ErrorKind::InvalidRange, range, text.len()));
    }
    if range.end > text.len() {
        return Err(Error::new(ErrorKind::InvalidBounds, range, text.len()));
    }
    if !text.is_char_boundary(range.start) {
        return Err(Error::not_on_char_boundary(text, range, Endpoint::Start));
    }
    if !text.is_char_boundary(range.end) {
        return Err(Error::not_on_char_boundary(text, range, Endpoint::End));
    }
    Ok(())
}

fn enclosing_char_span(text: &str, index: usize) -> (usize, usize) {
    // A UTF-8 sequence is at most four bytes long.
    let start = (index.saturating_sub(3)..=index)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(index);
    let end = (index..=(index + 3).min(text.len()))
        .find(|&i| i > index && text.is_char_boundary(i))
        .unwrap_or(index);
    (start, end)
}
