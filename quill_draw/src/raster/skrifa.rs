// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Rasterizer`] for TrueType and OpenType outlines.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use peniko::kurbo::Rect;
use skrifa::instance::{LocationRef, Size};
use skrifa::metrics::GlyphMetrics;
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{FontRef, GlyphId, MetadataProvider, OutlineGlyphCollection, charmap::Charmap};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use super::{FontMetrics, RasterMetrics, RasterizedGlyph, Rasterizer};
use crate::Error;

/// Rasterizes glyph outlines of a font at a fixed pixel height.
///
/// The size is given as the height of a line (ascent minus descent) in pixels,
/// not in pixels per em. Outlines are drawn unhinted with anti-aliasing.
pub struct SkrifaRasterizer<'a> {
    charmap: Charmap<'a>,
    outlines: OutlineGlyphCollection<'a>,
    glyph_metrics: GlyphMetrics<'a>,
    size: Size,
    metrics: FontMetrics,
    /// Canvas of the maximum glyph size, cleared before each glyph.
    canvas: Pixmap,
    coverage: Vec<u8>,
}

impl<'a> SkrifaRasterizer<'a> {
    /// Parses the first font in `data` and prepares to rasterize it so that a
    /// line of text is `pixel_height` pixels tall.
    pub fn new(data: &'a [u8], pixel_height: f32) -> Result<Self, Error> {
        Self::from_index(data, 0, pixel_height)
    }

    /// Like [`new`](Self::new), for the font at `index` in a collection.
    pub fn from_index(data: &'a [u8], index: u32, pixel_height: f32) -> Result<Self, Error> {
        if !pixel_height.is_finite() || pixel_height <= 0.0 {
            return Err(Error::InvalidPixelSize);
        }
        let font = FontRef::from_index(data, index).map_err(|_| Error::InvalidFont)?;
        let location = LocationRef::default();

        let units = font.metrics(Size::unscaled(), location);
        let units_height = units.ascent - units.descent;
        if units_height <= 0.0 {
            return Err(Error::InvalidFont);
        }
        let size = Size::new(pixel_height * f32::from(units.units_per_em) / units_height);

        let scaled = font.metrics(size, location);
        let (max_width, max_height) = match scaled.bounds {
            Some(bounds) => (
                pixel_extent(bounds.x_max - bounds.x_min),
                pixel_extent(bounds.y_max - bounds.y_min),
            ),
            None => {
                let em = size.ppem().unwrap_or(pixel_height);
                (pixel_extent(em), pixel_extent(em))
            }
        };
        let canvas =
            Pixmap::new(u32::from(max_width), u32::from(max_height)).ok_or(Error::EmptyCell)?;

        log::debug!(
            "font rasterizer ready: {pixel_height}px line, {:.2} ppem, {max_width}x{max_height} glyph box",
            size.ppem().unwrap_or_default()
        );

        Ok(Self {
            charmap: font.charmap(),
            outlines: font.outline_glyphs(),
            glyph_metrics: font.glyph_metrics(size, location),
            size,
            metrics: FontMetrics {
                ascent: scaled.ascent,
                descent: scaled.descent,
                line_gap: scaled.leading,
                max_width,
                max_height,
            },
            canvas,
            coverage: Vec::new(),
        })
    }

    fn draw_outline(&mut self, glyph_id: GlyphId) -> Option<RasterMetrics> {
        let outline = self.outlines.get(glyph_id)?;
        let mut pen = FlippedPath::new();
        outline
            .draw(
                DrawSettings::unhinted(self.size, LocationRef::default()),
                &mut pen,
            )
            .ok()?;
        if pen.bbox.is_zero_area() || !pen.bbox.is_finite() {
            return None;
        }
        let path = pen.path.finish()?;

        let bounds = pen.bbox.expand();
        let width = pixel_size(bounds.width());
        let height = pixel_size(bounds.height());
        if u32::from(width) > self.canvas.width() || u32::from(height) > self.canvas.height() {
            log::warn!("glyph {glyph_id:?} is larger than the font's maximum glyph box");
            return None;
        }

        self.canvas.fill(tiny_skia::Color::TRANSPARENT);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "glyph bounds are a few hundred pixels at most"
        )]
        let (left, top) = (bounds.x0 as f32, bounds.y0 as f32);
        self.canvas.fill_path(
            &path,
            &Paint::default(),
            FillRule::Winding,
            Transform::from_translate(-left, -top),
            None,
        );

        let stride = usize::from(self.metrics.max_width);
        let pixels = self.canvas.pixels();
        self.coverage.clear();
        for row in pixels.chunks(stride).take(usize::from(height)) {
            self.coverage
                .extend(row[..usize::from(width)].iter().map(|pixel| pixel.alpha()));
        }

        #[expect(
            clippy::cast_possible_truncation,
            reason = "glyph bounds are a few hundred pixels at most"
        )]
        let (bearing_x, bearing_y) = (bounds.x0 as i16, bounds.y0 as i16);
        Some(RasterMetrics {
            width,
            height,
            bearing_x,
            bearing_y,
        })
    }
}

impl Rasterizer for SkrifaRasterizer<'_> {
    fn font_metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn rasterize(&mut self, codepoint: u32) -> Option<RasterizedGlyph<'_>> {
        let glyph_id = self.charmap.map(codepoint)?;
        if glyph_id == GlyphId::NOTDEF {
            return None;
        }
        let advance = self.glyph_metrics.advance_width(glyph_id).unwrap_or(0.0);
        match self.draw_outline(glyph_id) {
            Some(metrics) => Some(RasterizedGlyph {
                metrics,
                advance,
                coverage: Some(&self.coverage),
            }),
            None => Some(RasterizedGlyph {
                metrics: RasterMetrics::default(),
                advance,
                coverage: None,
            }),
        }
    }
}

impl Debug for SkrifaRasterizer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SkrifaRasterizer")
            .field("size", &self.size)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// Whole pixels needed to cover `extent`, plus one for anti-aliasing spill.
#[expect(
    clippy::cast_possible_truncation,
    reason = "clamped to the u16 range before casting"
)]
fn pixel_extent(extent: f32) -> u16 {
    (extent.ceil() + 1.0).clamp(1.0, f32::from(u16::MAX)) as u16
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "clamped to the u16 range before casting"
)]
fn pixel_size(extent: f64) -> u16 {
    extent.clamp(0.0, f64::from(u16::MAX)) as u16
}

/// Collects an outline into a path, flipping the y-axis so it points down.
struct FlippedPath {
    path: PathBuilder,
    bbox: Rect,
}

impl FlippedPath {
    fn new() -> Self {
        Self {
            path: PathBuilder::new(),
            bbox: Rect {
                x0: f64::INFINITY,
                y0: f64::INFINITY,
                x1: f64::NEG_INFINITY,
                y1: f64::NEG_INFINITY,
            },
        }
    }

    fn include(&mut self, x: f32, y: f32) {
        self.bbox = self.bbox.union_pt((f64::from(x), f64::from(-y)));
    }
}

impl OutlinePen for FlippedPath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(x, -y);
        self.include(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(x, -y);
        self.include(x, y);
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.path.quad_to(cx, -cy, x, -y);
        self.include(cx, cy);
        self.include(x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.cubic_to(cx0, -cy0, cx1, -cy1, x, -y);
        self.include(cx0, cy0);
        self.include(cx1, cy1);
        self.include(x, y);
    }

    fn close(&mut self) {
        self.path.close();
    }
}
