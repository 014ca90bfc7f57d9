// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lumen_text::{Alignment, ParagraphStyle, StyleProperty, StyledText, TextAttributes};
use peniko::kurbo::Point;

use super::utils::LabelTest;
use crate::shape::{BreakReason, Cluster, GlyphRun, LineMetrics, ShapedLine};
use crate::{ContainerSize, HitTester};

fn round_trip(test: &LabelTest, case: &str) {
    let text = test.label.text().as_str();
    let engine = test.label.selection_engine();
    let mut checked = 0;
    for (index, ch) in text.char_indices() {
        let rects = engine.rects_for(index..index + ch.len_utf8());
        // Hard line breaks have no width.
        let Some(rect) = rects.first() else {
            continue;
        };
        assert_eq!(
            test.label.nearest_index(rect.center()),
            index,
            "{case}: center of {ch:?} at {index}"
        );
        checked += 1;
    }
    assert!(checked > 0, "{case}: nothing checked");
}

#[test]
fn character_centers_round_trip() {
    round_trip(&LabelTest::plain("héllo wörld wraps here", 80.0), "wrapped");
    round_trip(&LabelTest::plain("ab\ncd\n\nef", 1000.0), "hard breaks");

    let mut text = StyledText::new("mixed sizes here");
    text.apply(6..11, StyleProperty::FontSize(32.0)).unwrap();
    round_trip(
        &LabelTest::new(text, ContainerSize::unbounded_height(100.0)),
        "styled",
    );
}

#[test]
fn aligned_lines_round_trip() {
    let mut text = StyledText::new("centered text wraps");
    let paragraph = ParagraphStyle {
        alignment: Alignment::Center,
        line_spacing: 4.0,
    };
    text.apply(0..19, StyleProperty::Paragraph(paragraph)).unwrap();
    let test = LabelTest::new(text, ContainerSize::unbounded_height(120.0));
    assert!(test.label.lines()[0].origin().x > 0.0, "lines are indented");
    round_trip(&test, "centered");
}

#[test]
fn ties_go_to_the_earlier_offset() {
    let test = LabelTest::plain("ab", 100.0);
    let at = |x| test.label.nearest_index(Point::new(x, 8.0));
    assert_eq!(at(4.0), 0, "middle of 'a'");
    assert_eq!(at(4.5), 1, "past the middle of 'a'");
    assert_eq!(at(12.0), 1, "middle of 'b'");
    assert_eq!(at(12.5), 2, "past the middle of 'b'");
}

#[test]
fn points_beside_a_line() {
    let test = LabelTest::plain("héllo wörld wraps here", 80.0);
    let second = test.index_of("wörld");
    let third = test.index_of("wraps");
    assert_eq!(test.line_texts()[1], "wörld ", "second line");
    assert_eq!(
        test.label.nearest_index(Point::new(-5.0, 24.0)),
        second,
        "left of the line gives its start"
    );
    assert_eq!(
        test.label.nearest_index(Point::new(500.0, 24.0)),
        third,
        "right of the line gives its end"
    );
}

#[test]
fn points_above_and_below() {
    let test = LabelTest::plain("héllo wörld wraps here", 80.0);
    assert_eq!(
        test.label.nearest_index(Point::new(20.0, -10.0)),
        test.index_of("llo"),
        "above resolves on the first line"
    );
    assert_eq!(
        test.label.nearest_index(Point::new(20.0, 1000.0)),
        test.label.text().len(),
        "below gives the end of the text"
    );
}

#[test]
fn text_index_only_resolves_on_lines() {
    let test = LabelTest::new(
        StyledText::new("one two three four five"),
        ContainerSize::new(80.0, 32.0),
    );
    assert_eq!(test.label.text_index(Point::new(20.0, -1.0)), None, "above");
    assert_eq!(
        test.label.text_index(Point::new(20.0, 8.0)),
        Some(2),
        "inside 'one'"
    );
    assert_eq!(
        test.label.text_index(Point::new(20.0, 100.0)),
        Some(17),
        "below gives the end of the truncated last line"
    );
    assert_eq!(
        test.label.nearest_index(Point::new(20.0, 100.0)),
        23,
        "nearest index still gives the end of the text"
    );
}

#[test]
fn token_is_not_a_caret_position() {
    let test = LabelTest::new(
        StyledText::new("one two three four five"),
        ContainerSize::new(80.0, 32.0),
    );
    // The ellipsis spans x = 72..80 on the second line.
    assert_eq!(
        test.label.nearest_index(Point::new(78.0, 24.0)),
        17,
        "over the token gives the cut"
    );
}

fn line(start: usize, len: usize, top: f32) -> ShapedLine {
    let clusters = (start..start + len)
        .map(|i| Cluster {
            text_range: i..i + 1,
            advance: 8.0,
        })
        .collect();
    let run = GlyphRun::new(TextAttributes::default(), 0.0, 12.0, 4.0, clusters);
    let advance = run.advance();
    let metrics = LineMetrics {
        ascent: 12.0,
        descent: 4.0,
        baseline: top + 12.0,
        advance,
        min_coord: top,
        max_coord: top + 16.0,
        ..LineMetrics::default()
    };
    ShapedLine::new(start..start + len, vec![run], metrics, BreakReason::Regular)
}

#[test]
fn gaps_use_the_closest_line() {
    let lines = [line(0, 2, 0.0), line(2, 2, 30.0)];
    let hit = HitTester::new(&lines, 4);
    assert!(hit.line_containing(Point::new(9.0, 20.0)).is_none(), "in the gap");
    assert_eq!(hit.nearest_index(Point::new(9.0, 20.0)), 1, "closer to the first line");
    assert_eq!(hit.nearest_index(Point::new(9.0, 26.0)), 3, "closer to the second line");
    assert_eq!(hit.text_index(Point::new(9.0, 20.0)), None, "no tap in the gap");

    let found = hit.line_containing(Point::new(0.0, 40.0)).unwrap();
    assert_eq!(found.index, 1, "second line");
    assert_eq!(found.origin, Point::new(0.0, 42.0), "baseline origin");
}

#[test]
fn empty_text_has_no_positions() {
    let test = LabelTest::plain("", 100.0);
    assert_eq!(test.label.nearest_index(Point::new(10.0, 10.0)), 0, "start of nothing");
    assert_eq!(test.label.text_index(Point::new(10.0, 10.0)), None, "no tap");
    assert!(
        test.label.selection_engine().rects_for(0..0).is_empty(),
        "no rects"
    );
}
