// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caret placement, hit testing, scrolling and drawing of a `TextField`.

use peniko::color::palette::css::WHITE;
use peniko::kurbo::{Point, Rect, Vec2};
use quill_draw::{DrawList, FieldStyle, TextField};
use quill_text::{MoveUnit, Movement, TextInput};

use crate::util::{ADVANCE, UNMAPPED, test_store};

/// Inner area from x = 15 to 105; baseline at y = 43.
fn field() -> TextField {
    TextField::new(Rect::new(10.0, 20.0, 110.0, 50.0), Vec2::new(5.0, 4.0))
}

fn input_with(text: &str) -> TextInput {
    let mut input = TextInput::with_capacity(64);
    input.write(text);
    input
}

#[test]
fn field_text_origin() {
    let store = test_store(8);
    let origin = field().text_origin(store.font_metrics());
    assert_eq!(origin, Point::new(15.0, 43.0));
    assert_eq!(store.font_metrics().line_height(), 13.0);
}

#[test]
fn field_caret_offsets() {
    let mut store = test_store(8);
    assert_eq!(TextField::caret_offset(&mut store, "abc", 0), 0.0);
    assert_eq!(TextField::caret_offset(&mut store, "abc", 2), 2.0 * ADVANCE);
    assert_eq!(TextField::caret_offset(&mut store, "abc", 99), 3.0 * ADVANCE);
    // "ł" takes two bytes but one caret stop.
    assert_eq!(TextField::caret_offset(&mut store, "łb", 2), ADVANCE);
}

#[test]
fn field_caret_positions_include_the_end() {
    let mut store = test_store(8);
    let positions = field().caret_positions(&mut store, "a ł");
    assert_eq!(positions, [(0, 15.0), (1, 23.0), (2, 27.0), (4, 35.0)]);
}

#[test]
fn field_hit_test_picks_the_nearest_stop() {
    let mut store = test_store(8);
    let field = field();
    assert_eq!(field.hit_test(&mut store, "ab", 20.0), 1);
    assert_eq!(field.hit_test(&mut store, "ab", 19.0), 0, "ties go left");
    assert_eq!(field.hit_test(&mut store, "ab", -50.0), 0);
    assert_eq!(field.hit_test(&mut store, "ab", 1000.0), 2);
    assert_eq!(field.hit_test(&mut store, "", 40.0), 0);
}

#[test]
fn field_click_places_the_cursor() {
    let mut store = test_store(8);
    let field = field();
    let mut input = input_with("hello");
    let pos = field.hit_test(&mut store, input.text(), 40.0);
    input.set_cursor(pos, false);
    assert_eq!(input.cursor(), 3);

    let pos = field.hit_test(&mut store, input.text(), 17.0);
    input.set_cursor(pos, true);
    assert_eq!(input.selected_text(), "hel");
}

#[test]
fn field_scrolls_to_keep_the_cursor_visible() {
    let mut store = test_store(8);
    let mut field = field();
    let mut input = input_with(&"a".repeat(20));

    // 160px of text in a 90px area, caret at the end.
    field.scroll_to_cursor(&mut store, &input);
    assert_eq!(field.scroll_x(), -70.0);

    input.move_cursor(-1, Movement::by(MoveUnit::Extent));
    field.scroll_to_cursor(&mut store, &input);
    assert_eq!(field.scroll_x(), 0.0);

    input.move_cursor(1, Movement::by(MoveUnit::Extent));
    field.scroll_to_cursor(&mut store, &input);
    assert_eq!(field.scroll_x(), -70.0);
    for _ in 0..5 {
        input.backdelete(MoveUnit::Codepoint);
    }
    field.scroll_to_cursor(&mut store, &input);
    assert_eq!(field.scroll_x(), -30.0, "no empty space after the text");

    field.reset_scroll();
    assert_eq!(field.scroll_x(), 0.0);
}

#[test]
fn field_scrolls_by_caret_stops_in_multibyte_text() {
    let mut store = test_store(8);
    let mut field = field();
    // Twenty two-byte codepoints, 160px wide.
    let mut input = input_with(&"ł".repeat(20));
    field.scroll_to_cursor(&mut store, &input);
    assert_eq!(field.scroll_x(), -70.0);

    // Byte 20 is the tenth stop, still inside the area.
    input.set_cursor(20, false);
    field.scroll_to_cursor(&mut store, &input);
    assert_eq!(field.scroll_x(), -70.0);

    // The second stop lies left of the area; scroll just far enough to show it.
    input.set_cursor(2, false);
    field.scroll_to_cursor(&mut store, &input);
    assert_eq!(field.scroll_x(), -8.0);
}

#[test]
fn field_short_text_never_scrolls() {
    let mut store = test_store(8);
    let mut field = field();
    let input = input_with("short");
    field.scroll_to_cursor(&mut store, &input);
    assert_eq!(field.scroll_x(), 0.0);
}

#[test]
fn field_draw_selection_text_and_caret() {
    let mut store = test_store(8);
    let style = FieldStyle::default();
    let mut input = input_with("ab");
    input.select_all();

    let mut list = DrawList::new();
    field().draw(&mut store, &input, &mut list, &style);

    let rects = list.rects();
    assert_eq!(rects.len(), 3);
    assert_eq!(rects[0].rect, field().rect);
    assert_eq!(rects[0].color, style.background);
    assert_eq!(rects[1].rect, Rect::new(15.0, 33.0, 33.0, 46.0));
    assert_eq!(rects[1].color, style.selection);
    assert_eq!(rects[2].rect, Rect::new(31.0, 33.0, 33.0, 46.0));
    assert_eq!(rects[2].color, style.caret);

    let quads = list.glyph_quads();
    assert_eq!(quads.len(), 2);
    assert_eq!((quads[0].x, quads[0].y), (16.0, 33.0));
    assert_eq!((quads[1].x, quads[1].y), (24.0, 33.0));
    assert_eq!(quads[0].color, [255, 255, 255, 255]);
}

#[test]
fn field_draw_culls_scrolled_out_glyphs() {
    let mut store = test_store(8);
    let mut field = field();
    let input = input_with(&"a".repeat(20));
    field.scroll_to_cursor(&mut store, &input);

    let mut list = DrawList::new();
    field.draw(&mut store, &input, &mut list, &FieldStyle::default());
    let quads = list.glyph_quads();
    // Glyphs 8 to 19 reach into the field; the ones before lie left of it.
    assert_eq!(quads.len(), 12);
    assert_eq!(quads[0].x, -55.0 + 8.0 * ADVANCE as f32 + 1.0);
    assert!(quads.iter().all(|quad| quad.x < 110.0));
}

#[test]
fn field_draw_fallback_glyph_is_inverted() {
    let mut store = test_store(8);
    let style = FieldStyle {
        text: WHITE,
        ..FieldStyle::default()
    };
    let input = input_with(&format!("a{UNMAPPED}"));
    let mut list = DrawList::new();
    field().draw(&mut store, &input, &mut list, &style);

    let quads = list.glyph_quads();
    assert_eq!(quads.len(), 2);
    assert_eq!(quads[1].color, [0, 0, 0, 255]);
    let question = store.lookup(u32::from('?'));
    assert_eq!(
        (quads[1].tex_x, quads[1].tex_y),
        (f32::from(question.tex_x), f32::from(question.tex_y))
    );
}
