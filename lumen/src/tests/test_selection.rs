// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lumen_text::{Attachment, StyleProperty, StyledText, StyledTextBuilder};
use peniko::kurbo::{Point, Rect, Size};

use super::utils::{assert_rect_eq, LabelTest};
use crate::{ContainerSize, Granularity, LabelOptions, MetricsShaper, SelectionRange, TextLabel};

#[test]
fn select_word_and_line() {
    let mut test = LabelTest::plain("hello world", 200.0);
    let word = test.label.select_word(7).unwrap();
    assert_eq!((word.start(), word.len()), (6, 5), "world");
    assert_eq!(test.label.select_word(5), None, "space is not a word");

    let mut test = LabelTest::plain("hello, world", 200.0);
    assert_eq!(test.label.select_word(5), None, "comma is not a word");
    let word = test.label.select_word(3).unwrap();
    assert_eq!(word.range(), 0..5, "word stops at the comma");
    assert_eq!(test.selected_text(), Some("hello"), "no punctuation selected");

    let mut test = LabelTest::plain("ab\ncd", 200.0);
    let line = test.label.select_line(4).unwrap();
    assert_eq!((line.start(), line.len()), (3, 2), "second line");
    assert_eq!(test.selected_text(), Some("cd"), "no line break selected");
}

#[test]
fn select_at_granularity() {
    let test = LabelTest::plain("one two\nthree", 200.0);
    let engine = test.label.selection_engine();
    assert_eq!(engine.select_at(5, Granularity::Character), None, "caret only");
    assert_eq!(
        engine.select_at(5, Granularity::Word).map(|s| s.range()),
        Some(4..7),
        "word"
    );
    assert_eq!(
        engine.select_at(5, Granularity::Line).map(|s| s.range()),
        Some(0..7),
        "line"
    );
}

#[test]
fn range_normalizes_points() {
    let mut test = LabelTest::plain("hello world", 200.0);
    let selection = test
        .label
        .select_range(Point::new(88.0, 8.0), Point::new(20.0, 8.0))
        .unwrap();
    assert_eq!(selection.range(), 2..11, "reversed drag");

    let selection = test
        .label
        .select_range(Point::new(-10.0, -10.0), Point::new(1000.0, 1000.0))
        .unwrap();
    assert_eq!(selection.range(), 0..11, "clamped to the text");

    assert_eq!(
        test.label
            .select_range(Point::new(20.0, 8.0), Point::new(19.0, 8.0)),
        None,
        "same offset is no selection"
    );
}

#[test]
fn rects_cover_each_line() {
    let mut test = LabelTest::plain("hello world", 48.0);
    test.label.select_all().unwrap();
    let rects = test.label.selection_rects();
    assert_eq!(rects.len(), 2, "one rect per line");
    assert_rect_eq(rects[0], Rect::new(0.0, 0.0, 48.0, 16.0), "first line");
    assert_rect_eq(rects[1], Rect::new(0.0, 16.0, 40.0, 32.0), "second line");

    let rects = test.label.selection_engine().rects_for(2..8);
    assert_eq!(rects.len(), 2, "partial");
    assert_rect_eq(rects[0], Rect::new(16.0, 0.0, 48.0, 16.0), "'llo '");
    assert_rect_eq(rects[1], Rect::new(0.0, 16.0, 16.0, 32.0), "'wo'");

    assert!(
        test.label.selection_engine().rects_for(2..20).is_empty(),
        "out of bounds"
    );
}

#[test]
fn point_in_selection() {
    let mut test = LabelTest::plain("hello world", 200.0);
    assert!(
        !test.label.is_point_in_selection(Point::new(60.0, 8.0)),
        "no selection"
    );
    test.label.select_word(7).unwrap();
    assert!(test.label.is_point_in_selection(test.point_on("orl")), "inside");
    assert!(!test.label.is_point_in_selection(test.point_on("hello")), "outside");
}

#[test]
fn layout_clears_selection() {
    let mut test = LabelTest::plain("hello world", 200.0);
    test.label.select_all().unwrap();
    test.label.set_container_size(ContainerSize::unbounded_height(48.0));
    assert_eq!(test.label.selection(), None, "resize");

    test.label.select_all().unwrap();
    test.label.set_text(StyledText::new("hello world"));
    assert_eq!(test.label.selection(), None, "new text");
}

#[test]
fn stale_selection_is_rejected() {
    let mut test = LabelTest::plain("short", 200.0);
    let stale = SelectionRange::new(3, 10);
    assert_eq!(test.label.set_selection(stale), None, "past the end");
    assert_eq!(test.label.selection(), None, "not stored");

    let fresh = SelectionRange::new(1, 4);
    assert_eq!(test.label.set_selection(fresh), fresh, "fits");
    assert_eq!(test.selected_text(), Some("hort"), "selected");

    assert_eq!(
        test.label.set_selection(SelectionRange::new(usize::MAX, 2)),
        None,
        "end past usize::MAX"
    );
    assert_eq!(test.label.selection(), None, "overflow not stored");
}

fn with_switch() -> LabelTest {
    let mut builder = StyledTextBuilder::new();
    builder
        .push("on ", [StyleProperty::Underline(true)])
        .push_attachment(Attachment::new("switch", Size::new(20.0, 10.0), "[x]"))
        .push(" off", [StyleProperty::FontWeight(700.0)]);
    LabelTest::new(builder.build(), ContainerSize::unbounded_height(200.0))
}

#[test]
fn copied_text_spells_out_attachments() {
    let mut test = with_switch();
    test.label.select_all().unwrap();
    assert_eq!(
        test.label.selected_plain_text().as_deref(),
        Some("on [x] off"),
        "attachment replaced"
    );

    test.label.set_selection(SelectionRange::new(0, 3));
    let styled = test.label.selected_styled_text().unwrap();
    assert_eq!(styled.as_str(), "on ", "sliced text");
    assert_eq!(
        styled.attributes_at(0).map(|a| a.underline),
        Some(true),
        "styles kept"
    );
}

#[test]
fn unselectable_label() {
    let options = LabelOptions {
        selectable: false,
        ..LabelOptions::default()
    };
    let mut label = TextLabel::new(MetricsShaper::default(), options);
    label.set_text(StyledText::new("hello world"));
    assert_eq!(label.select_all(), None, "select all");
    assert_eq!(label.select_word(0), None, "select word");
    assert_eq!(label.selected_plain_text(), None, "nothing to copy");

    label.set_selectable(true);
    assert!(label.select_all().is_some(), "turned on");
    label.set_selectable(false);
    assert_eq!(label.selection(), None, "turning off clears");
}

#[test]
fn empty_text_selects_nothing() {
    let mut test = LabelTest::plain("", 200.0);
    assert_eq!(test.label.select_all(), None, "select all");
    assert!(test.label.selection_rects().is_empty(), "no rects");
}
