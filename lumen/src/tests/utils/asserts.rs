// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helper functions to assert truths during testing.

use peniko::kurbo::Rect;

use crate::ShapedLine;

/// Assert that line ranges follow each other without gaps, starting at 0.
#[track_caller]
pub(crate) fn assert_contiguous(lines: &[ShapedLine], case: &str) {
    let mut expected_start = 0;
    for (i, line) in lines.iter().enumerate() {
        let range = line.text_range();
        assert_eq!(
            range.start, expected_start,
            "{case}: line {i} does not continue the previous line"
        );
        assert!(!range.is_empty(), "{case}: line {i} is empty");
        expected_start = range.end;
    }
}

/// Assert that two rectangles are equal up to rounding.
#[track_caller]
pub(crate) fn assert_rect_eq(actual: Rect, expected: Rect, case: &str) {
    let close = |a: f64, b: f64| (a - b).abs() < 1e-3;
    assert!(
        close(actual.x0, expected.x0)
            && close(actual.y0, expected.y0)
            && close(actual.x1, expected.x1)
            && close(actual.y1, expected.y1),
        "{case}: expected {expected:?}, got {actual:?}"
    );
}
