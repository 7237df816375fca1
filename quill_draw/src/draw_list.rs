// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use bytemuck::{Pod, Zeroable};
use peniko::color::{AlphaColor, Srgb};
use peniko::kurbo::{Point, Rect};

use crate::Glyph;

/// A glyph bitmap to copy from the atlas to the screen.
///
/// Laid out for direct upload as vertex or instance data; see
/// [`DrawList::quad_bytes`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GlyphQuad {
    /// Left edge on screen.
    pub x: f32,
    /// Top edge on screen.
    pub y: f32,
    /// Width in pixels, both on screen and in the atlas.
    pub width: f32,
    /// Height in pixels, both on screen and in the atlas.
    pub height: f32,
    /// Left edge in the atlas.
    pub tex_x: f32,
    /// Top edge in the atlas.
    pub tex_y: f32,
    /// Straight-alpha sRGB color, multiplied by the atlas coverage.
    pub color: [u8; 4],
}

/// A solid rectangle, such as a background, a selection or a caret.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidRect {
    /// Area to fill.
    pub rect: Rect,
    /// Fill color.
    pub color: AlphaColor<Srgb>,
}

/// Glyph quads and rectangles for one frame.
///
/// Renderers paint all rectangles in order, then all quads in order.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    rects: Vec<SolidRect>,
    quads: Vec<GlyphQuad>,
}

impl DrawList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes everything, keeping the allocations for the next frame.
    pub fn reset(&mut self) {
        self.rects.clear();
        self.quads.clear();
    }

    /// Returns `true` if nothing has been pushed since the last reset.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.quads.is_empty()
    }

    /// Adds a solid rectangle. Empty rectangles are dropped.
    pub fn push_rect(&mut self, rect: Rect, color: AlphaColor<Srgb>) {
        if rect.width() > 0.0 && rect.height() > 0.0 {
            self.rects.push(SolidRect { rect, color });
        }
    }

    /// Adds a quad for `glyph` with its pen position at `pen` on the baseline.
    ///
    /// Glyphs without a bitmap in the atlas are skipped.
    pub fn push_glyph(&mut self, glyph: &Glyph, pen: Point, color: AlphaColor<Srgb>) {
        if !glyph.is_loaded() {
            return;
        }
        let rgba = color.to_rgba8();
        self.quads.push(GlyphQuad {
            x: narrow(pen.x + f64::from(glyph.offset_x)),
            y: narrow(pen.y + f64::from(glyph.offset_y)),
            width: f32::from(glyph.width),
            height: f32::from(glyph.height),
            tex_x: f32::from(glyph.tex_x),
            tex_y: f32::from(glyph.tex_y),
            color: [rgba.r, rgba.g, rgba.b, rgba.a],
        });
    }

    /// The rectangles, in the order they were pushed.
    pub fn rects(&self) -> &[SolidRect] {
        &self.rects
    }

    /// The glyph quads, in the order they were pushed.
    pub fn glyph_quads(&self) -> &[GlyphQuad] {
        &self.quads
    }

    /// The glyph quads as raw bytes.
    pub fn quad_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.quads)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "screen coordinates fit comfortably in f32"
)]
fn narrow(value: f64) -> f32 {
    value as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GlyphStatus;
    use peniko::color::palette::css::WHITE;

    fn loaded() -> Glyph {
        Glyph {
            tex_x: 10,
            tex_y: 20,
            width: 3,
            height: 5,
            offset_x: 1,
            offset_y: -5,
            advance: 4.0,
            status: GlyphStatus::Loaded,
        }
    }

    #[test]
    fn glyph_quads_are_placed_from_the_pen() {
        let mut list = DrawList::new();
        list.push_glyph(&loaded(), Point::new(100.0, 50.0), WHITE);
        assert_eq!(
            list.glyph_quads(),
            [GlyphQuad {
                x: 101.0,
                y: 45.0,
                width: 3.0,
                height: 5.0,
                tex_x: 10.0,
                tex_y: 20.0,
                color: [255, 255, 255, 255],
            }]
        );
        assert_eq!(list.quad_bytes().len(), 28);
    }

    #[test]
    fn unloaded_glyphs_and_empty_rects_are_skipped() {
        let mut list = DrawList::new();
        let metrics_only = Glyph {
            status: GlyphStatus::MetricsOnly,
            ..loaded()
        };
        list.push_glyph(&metrics_only, Point::ORIGIN, WHITE);
        list.push_rect(Rect::new(5.0, 5.0, 5.0, 10.0), WHITE);
        assert!(list.is_empty());

        list.push_rect(Rect::new(0.0, 0.0, 1.0, 1.0), WHITE);
        assert_eq!(list.rects().len(), 1);
        list.reset();
        assert!(list.is_empty());
    }
}
