// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use peniko::color::palette::css::WHITE;
use peniko::color::{AlphaColor, Srgb};
use peniko::kurbo::{Point, Rect, Vec2};
use quill_text::TextInput;

use crate::glyph::{for_each_glyph, invert_rgb};
use crate::raster::{AtlasWriter, FontMetrics, Rasterizer};
use crate::{DrawList, GlyphStore};

/// Colors and caret shape for [`TextField::draw`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldStyle {
    /// Fill behind the text.
    pub background: AlphaColor<Srgb>,
    /// Glyph color.
    pub text: AlphaColor<Srgb>,
    /// Fill behind selected text.
    pub selection: AlphaColor<Srgb>,
    /// Caret color.
    pub caret: AlphaColor<Srgb>,
    /// Caret width in pixels.
    pub caret_width: f64,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            background: AlphaColor::from_rgba8(0x13, 0x05, 0x00, 0xFF),
            text: WHITE,
            selection: AlphaColor::from_rgba8(0x20, 0x40, 0x90, 0xFF),
            caret: AlphaColor::from_rgba8(0xFF, 0xAA, 0x11, 0xFF),
            caret_width: 2.0,
        }
    }
}

/// Screen placement and horizontal scroll of a single-line text input.
///
/// The field keeps no text of its own; it lays out whatever [`TextInput`] it
/// is given. Text is drawn on a baseline sitting the font's descent above the
/// bottom padding, starting at the left padding and shifted by the scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextField {
    /// Outer bounds of the field.
    pub rect: Rect,
    /// Space between the bounds and the text, horizontally and vertically.
    pub padding: Vec2,
    scroll_x: f64,
}

impl TextField {
    /// Creates an unscrolled field.
    pub fn new(rect: Rect, padding: Vec2) -> Self {
        Self {
            rect,
            padding,
            scroll_x: 0.0,
        }
    }

    /// Horizontal scroll in pixels. Zero or negative; negative moves the text
    /// left.
    pub fn scroll_x(&self) -> f64 {
        self.scroll_x
    }

    /// Scrolls back to the start of the text.
    pub fn reset_scroll(&mut self) {
        self.scroll_x = 0.0;
    }

    /// The pen position of the first glyph, on the baseline.
    pub fn text_origin(&self, metrics: &FontMetrics) -> Point {
        Point::new(
            self.rect.x0 + self.padding.x + self.scroll_x,
            self.rect.y1 - self.padding.y + f64::from(metrics.descent),
        )
    }

    /// Distance from the start of `text` to the caret stop before byte `pos`.
    ///
    /// Positions past the end measure the whole text.
    pub fn caret_offset<R: Rasterizer, W: AtlasWriter>(
        store: &mut GlyphStore<R, W>,
        text: &str,
        pos: usize,
    ) -> f64 {
        let mut offset = None;
        let width = for_each_glyph(store, text, |index, pen, _, _| {
            if index == pos {
                offset = Some(pen);
            }
        });
        offset.unwrap_or(width)
    }

    /// Every caret stop in `text` as a byte offset and a screen x position,
    /// including the one after the last codepoint.
    pub fn caret_positions<R: Rasterizer, W: AtlasWriter>(
        &self,
        store: &mut GlyphStore<R, W>,
        text: &str,
    ) -> Vec<(usize, f64)> {
        let left = self.text_origin(store.font_metrics()).x;
        let mut positions = Vec::with_capacity(text.len() + 1);
        let width = for_each_glyph(store, text, |index, pen, _, _| {
            positions.push((index, left + pen));
        });
        positions.push((text.len(), left + width));
        positions
    }

    /// The byte offset of the caret stop nearest to `x`, as when clicking.
    ///
    /// On a tie the earlier stop wins.
    pub fn hit_test<R: Rasterizer, W: AtlasWriter>(
        &self,
        store: &mut GlyphStore<R, W>,
        text: &str,
        x: f64,
    ) -> usize {
        let mut best = (0, f64::INFINITY);
        for (index, caret) in self.caret_positions(store, text) {
            let distance = (caret - x).abs();
            if distance < best.1 {
                best = (index, distance);
            }
        }
        best.0
    }

    /// Adjusts the scroll so that the caret of `input` is inside the padded
    /// area, then takes back any empty space left on the right of the text.
    pub fn scroll_to_cursor<R: Rasterizer, W: AtlasWriter>(
        &mut self,
        store: &mut GlyphStore<R, W>,
        input: &TextInput,
    ) {
        let (text, cursor) = (input.text(), input.cursor());
        let mut caret = None;
        let width = for_each_glyph(store, text, |index, pen, _, _| {
            if index == cursor {
                caret = Some(pen);
            }
        });
        let caret = caret.unwrap_or(width);
        let inner_left = self.rect.x0 + self.padding.x;
        let inner_right = self.rect.x1 - self.padding.x;

        let mut scroll = self.scroll_x;
        let caret_x = inner_left + scroll + caret;
        if caret_x > inner_right {
            scroll -= caret_x - inner_right;
        }
        if caret_x < inner_left {
            scroll += inner_left - caret_x;
        }
        let end_x = inner_left + scroll + width;
        if scroll < 0.0 && end_x < inner_right {
            scroll += inner_right - end_x;
        }
        self.scroll_x = scroll.min(0.0);
    }

    /// Records the background, selection, text and caret of `input`.
    ///
    /// Glyphs entirely outside the field are left out.
    pub fn draw<R: Rasterizer, W: AtlasWriter>(
        &self,
        store: &mut GlyphStore<R, W>,
        input: &TextInput,
        list: &mut DrawList,
        style: &FieldStyle,
    ) {
        let metrics = *store.font_metrics();
        let origin = self.text_origin(&metrics);
        let top = origin.y - f64::from(metrics.ascent);
        let bottom = top + f64::from(metrics.line_height());

        list.push_rect(self.rect, style.background);

        let text = input.text();
        if input.has_selection() {
            let selection = input.selection();
            let start = Self::caret_offset(store, text, selection.start);
            let end = Self::caret_offset(store, text, selection.end);
            let highlight = Rect::new(
                origin.x + start,
                top,
                origin.x + end + style.caret_width,
                bottom,
            );
            list.push_rect(highlight.intersect(self.rect), style.selection);
        }

        let fallback_color = invert_rgb(style.text);
        let (left, right) = (self.rect.x0, self.rect.x1);
        for_each_glyph(store, text, |_, pen, glyph, fallback| {
            let x = origin.x + pen + f64::from(glyph.offset_x);
            if x + f64::from(glyph.width) <= left || x >= right {
                return;
            }
            let color = if fallback { fallback_color } else { style.text };
            list.push_glyph(&glyph, Point::new(origin.x + pen, origin.y), color);
        });

        let caret_x = origin.x + Self::caret_offset(store, text, input.cursor());
        let caret = Rect::new(caret_x, top, caret_x + style.caret_width, bottom);
        list.push_rect(caret.intersect(self.rect), style.caret);
    }
}
