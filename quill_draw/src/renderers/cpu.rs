// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory atlas and a software compositor for [`DrawList`]s.

use alloc::vec;
use alloc::vec::Vec;

use peniko::color::{AlphaColor, Srgb};

use crate::raster::AtlasWriter;
use crate::{DrawList, GlyphQuad, GlyphStoreConfig};

/// A single-channel coverage texture kept in memory.
#[derive(Clone, Debug)]
pub struct CpuAtlas {
    width: u16,
    height: u16,
    coverage: Vec<u8>,
    uploads: u64,
}

impl CpuAtlas {
    /// Creates a blank atlas.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            coverage: vec![0; usize::from(width) * usize::from(height)],
            uploads: 0,
        }
    }

    /// Creates a blank atlas of the size a glyph store will lay out.
    pub fn for_config(config: &GlyphStoreConfig) -> Self {
        Self::new(config.atlas_width, config.atlas_height)
    }

    /// Width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Row-major coverage, one byte per pixel.
    pub fn data(&self) -> &[u8] {
        &self.coverage
    }

    /// Coverage at `x`, `y`, or 0 outside the atlas.
    pub fn coverage(&self, x: u16, y: u16) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    /// Number of uploads received.
    pub fn upload_count(&self) -> u64 {
        self.uploads
    }
}

impl AtlasWriter for CpuAtlas {
    fn upload(&mut self, x: u16, y: u16, width: u16, height: u16, coverage: &[u8]) {
        self.uploads += 1;
        let stride = usize::from(self.width);
        let visible = usize::from(width.min(self.width.saturating_sub(x)));
        if visible == 0 || height == 0 {
            return;
        }
        let rows = coverage
            .chunks_exact(usize::from(width))
            .take(usize::from(height.min(self.height.saturating_sub(y))));
        for (row_index, row) in rows.enumerate() {
            let start = (usize::from(y) + row_index) * stride + usize::from(x);
            self.coverage[start..start + visible].copy_from_slice(&row[..visible]);
        }
    }
}

/// An RGBA8 image to composite draw lists into.
#[derive(Clone, Debug)]
pub struct CpuCanvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl CpuCanvas {
    /// Creates a transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major straight-alpha RGBA bytes.
    pub fn data(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// The pixel at `x`, `y`, or transparent outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Sets every pixel to `color`.
    pub fn fill(&mut self, color: AlphaColor<Srgb>) {
        let rgba = color.to_rgba8();
        self.pixels.fill([rgba.r, rgba.g, rgba.b, rgba.a]);
    }

    /// Paints the rectangles of `list`, then its glyph quads sampled from `atlas`.
    ///
    /// Rectangles cover the pixels whose centers they contain.
    pub fn render(&mut self, list: &DrawList, atlas: &CpuAtlas) {
        for solid in list.rects() {
            let rgba = solid.color.to_rgba8();
            let color = [rgba.r, rgba.g, rgba.b, rgba.a];
            let x0 = pixel_edge(solid.rect.x0, self.width);
            let x1 = pixel_edge(solid.rect.x1, self.width);
            let y0 = pixel_edge(solid.rect.y0, self.height);
            let y1 = pixel_edge(solid.rect.y1, self.height);
            for y in y0..y1 {
                for x in x0..x1 {
                    self.blend(x, y, color, 255);
                }
            }
        }
        for quad in list.glyph_quads() {
            self.blit(quad, atlas);
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "quad sizes come from u16 glyph sizes"
    )]
    fn blit(&mut self, quad: &GlyphQuad, atlas: &CpuAtlas) {
        let left = round(quad.x);
        let top = round(quad.y);
        let (tex_x, tex_y) = (quad.tex_x as u16, quad.tex_y as u16);
        for row in 0..quad.height as u16 {
            let Ok(y) = u32::try_from(top + i64::from(row)) else {
                continue;
            };
            for col in 0..quad.width as u16 {
                let Ok(x) = u32::try_from(left + i64::from(col)) else {
                    continue;
                };
                let coverage =
                    atlas.coverage(tex_x.saturating_add(col), tex_y.saturating_add(row));
                self.blend(x, y, quad.color, coverage);
            }
        }
    }

    /// Source-over blend of `color`, scaled by `coverage`, onto one pixel.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "blended channels stay within 0..=255"
    )]
    fn blend(&mut self, x: u32, y: u32, color: [u8; 4], coverage: u8) {
        if x >= self.width || y >= self.height || coverage == 0 {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        let dst = &mut self.pixels[index];
        let alpha = u32::from(color[3]) * u32::from(coverage) / 255;
        let keep = 255 - alpha;
        for (channel, source) in dst.iter_mut().zip(color).take(3) {
            let mixed = u32::from(source) * alpha + u32::from(*channel) * keep;
            *channel = ((mixed + 127) / 255) as u8;
        }
        dst[3] = (alpha + (u32::from(dst[3]) * keep + 127) / 255) as u8;
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "clamped to the canvas size before casting"
)]
fn pixel_edge(value: f64, limit: u32) -> u32 {
    (value.clamp(0.0, f64::from(limit)) + 0.5) as u32
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "screen coordinates are far inside the i64 range"
)]
fn round(value: f32) -> i64 {
    if value >= 0.0 {
        (value + 0.5) as i64
    } else {
        -((0.5 - value) as i64)
    }
}
