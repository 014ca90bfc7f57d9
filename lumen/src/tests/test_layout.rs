// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lumen_text::{StyleProperty, StyledText};
use peniko::kurbo::Size;

use super::utils::{assert_contiguous, LabelTest};
use crate::shape::BreakReason;
use crate::{ContainerSize, LineCache, MetricsShaper};

#[test]
fn empty_text() {
    let test = LabelTest::plain("", 100.0);
    assert!(test.label.lines().is_empty(), "no lines");
    assert!(test.label.regions().is_empty(), "no regions");
    assert_eq!(test.label.intrinsic_size(), Size::ZERO, "zero size");
}

#[test]
fn wraps_at_spaces() {
    let test = LabelTest::plain("go to docs page", 80.0);
    assert_eq!(test.line_texts(), ["go to docs ", "page"], "two lines");
    assert_eq!(
        test.label.lines()[0].break_reason(),
        BreakReason::Regular,
        "soft break"
    );
}

#[test]
fn hard_breaks_start_new_lines() {
    let test = LabelTest::plain("ab\ncd\n\nef", 1000.0);
    assert_eq!(test.line_texts(), ["ab\n", "cd\n", "\n", "ef"], "one line per paragraph");
    let lines = test.label.lines();
    assert_eq!(lines[2].top(), 32.0, "empty line keeps its height");
    assert_eq!(lines[3].origin().y, 60.0, "fourth baseline");
}

#[test]
fn lines_are_contiguous() {
    let texts = [
        "The quick brown fox jumps over the lazy dog.",
        "héllo wörld, ünïcode wräps tôo",
        "a\nb\r\nc\u{2029}d",
        "unbreakablewordthatiswiderthanthecontainer and more",
    ];
    for text in texts {
        for width in [0.0, 8.0, 40.0, 100.0, f32::INFINITY] {
            let test = LabelTest::plain(text, width);
            let case = format!("{text:?} at {width}");
            assert_contiguous(test.label.lines(), &case);
            assert_eq!(
                test.label.line_cache().visible_len(),
                text.len(),
                "{case}: every character is shown"
            );
        }
    }
}

#[test]
fn layout_is_pure() {
    let mut text = StyledText::new("some styled text that wraps");
    text.apply(5..11, StyleProperty::FontSize(24.0)).unwrap();
    let shaper = MetricsShaper::default();
    let container = ContainerSize::new(90.0, 100.0);
    assert_eq!(
        LineCache::layout(&shaper, &text, container),
        LineCache::layout(&shaper, &text, container),
        "same inputs, same lines"
    );
}

#[test]
fn larger_font_makes_taller_line() {
    let mut text = StyledText::new("ab");
    text.apply(1..2, StyleProperty::FontSize(32.0)).unwrap();
    let test = LabelTest::new(text, ContainerSize::unbounded());
    let line = &test.label.lines()[0];
    assert_eq!(line.metrics().ascent, 24.0, "largest ascent wins");
    assert_eq!(line.bottom(), 32.0, "largest descent wins");
    assert_eq!(line.runs().len(), 2, "one run per style");
    assert_eq!(line.runs()[1].offset(), 8.0, "second run follows the first");
}

#[test]
fn zero_height_container_has_no_lines() {
    let test = LabelTest::new(StyledText::new("hello"), ContainerSize::new(100.0, 0.0));
    assert!(test.label.lines().is_empty(), "nothing fits");
    assert!(!test.label.line_cache().is_truncated(), "nothing to truncate");
}

#[test]
fn height_limits_lines() {
    let test = LabelTest::new(
        StyledText::new("one two three four five"),
        ContainerSize::new(80.0, 40.0),
    );
    assert_eq!(test.label.lines().len(), 2, "third line would end at 48");
}

#[test]
fn intrinsic_size() {
    let mut test = LabelTest::plain("hello world", f32::INFINITY);
    assert_eq!(test.label.intrinsic_size(), Size::new(88.0, 16.0), "single line");

    test.label.set_preferred_max_width(48.0);
    assert_eq!(
        test.label.intrinsic_size(),
        Size::new(40.0, 32.0),
        "wrapped, trailing space not counted"
    );
}

#[test]
fn measure_respects_height() {
    let text = StyledText::new("hello world");
    let size = LineCache::measure(&MetricsShaper::default(), &text, Size::new(48.0, 20.0));
    assert_eq!(size, Size::new(40.0, 16.0), "only the first line fits");
}

#[test]
fn resize_relayouts() {
    let mut test = LabelTest::plain("hello world", 48.0);
    assert_eq!(test.label.lines().len(), 2, "narrow");
    test.label.set_container_size(ContainerSize::unbounded_height(200.0));
    assert_eq!(test.label.lines().len(), 1, "wide");
}

#[test]
fn generation_counts_layout_passes() {
    let mut test = LabelTest::plain("hello world", 48.0);
    let first = test.label.generation();
    test.label.set_container_size(ContainerSize::unbounded_height(48.0));
    assert_eq!(test.label.generation(), first, "same size keeps the layout");
    test.label.set_container_size(ContainerSize::unbounded_height(200.0));
    assert_eq!(test.label.generation(), first + 1, "resize");
    test.label.set_text(StyledText::new("hello world"));
    assert_eq!(test.label.generation(), first + 2, "new text");
}
