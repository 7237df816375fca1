// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seams between the glyph store, the font and the atlas texture.

#[cfg(feature = "skrifa")]
pub mod skrifa;

/// Vertical metrics of a font at the rasterized size, plus the largest glyph box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the line, positive upwards.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line, usually negative.
    pub descent: f32,
    /// Extra space between lines.
    pub line_gap: f32,
    /// Width of the union of all glyph boxes, in whole pixels.
    pub max_width: u16,
    /// Height of the union of all glyph boxes, in whole pixels.
    pub max_height: u16,
}

impl FontMetrics {
    /// Height of a line of text: ascent minus descent.
    pub fn line_height(&self) -> f32 {
        self.ascent - self.descent
    }
}

/// Bitmap size and placement of a rasterized glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterMetrics {
    /// Width of the bitmap in pixels.
    pub width: u16,
    /// Height of the bitmap in pixels.
    pub height: u16,
    /// Offset from the pen position to the left edge of the bitmap.
    pub bearing_x: i16,
    /// Offset from the baseline to the top edge of the bitmap, positive
    /// downwards (so usually negative).
    pub bearing_y: i16,
}

/// What a [`Rasterizer`] produces for a codepoint the font maps.
#[derive(Clone, Copy, Debug)]
pub struct RasterizedGlyph<'a> {
    /// Size and placement of `coverage`.
    pub metrics: RasterMetrics,
    /// Horizontal advance in pixels.
    pub advance: f32,
    /// Row-major 8-bit coverage, `width * height` bytes.
    ///
    /// `None` for glyphs without an outline, such as spaces.
    pub coverage: Option<&'a [u8]>,
}

/// Produces glyph bitmaps for codepoints.
pub trait Rasterizer {
    /// Metrics of the font at the rasterized size.
    ///
    /// The glyph store sizes its atlas cells from `max_width` and `max_height`.
    fn font_metrics(&self) -> FontMetrics;

    /// Rasterizes the glyph for `codepoint`.
    ///
    /// Returns `None` when the font has no glyph for it. The coverage may borrow
    /// a scratch buffer owned by the rasterizer; it is copied out before the next
    /// call.
    fn rasterize(&mut self, codepoint: u32) -> Option<RasterizedGlyph<'_>>;
}

impl<T: Rasterizer + ?Sized> Rasterizer for &mut T {
    fn font_metrics(&self) -> FontMetrics {
        (**self).font_metrics()
    }

    fn rasterize(&mut self, codepoint: u32) -> Option<RasterizedGlyph<'_>> {
        (**self).rasterize(codepoint)
    }
}

/// Receives glyph coverage uploads into the atlas texture.
pub trait AtlasWriter {
    /// Writes `coverage` (row-major, `width * height` bytes) to the rectangle of
    /// the atlas with its top-left corner at `x`, `y`.
    ///
    /// The rectangle always lies inside the atlas the store was configured with.
    fn upload(&mut self, x: u16, y: u16, width: u16, height: u16, coverage: &[u8]);
}

impl<T: AtlasWriter + ?Sized> AtlasWriter for &mut T {
    fn upload(&mut self, x: u16, y: u16, width: u16, height: u16, coverage: &[u8]) {
        (**self).upload(x, y, width, height, coverage);
    }
}
