// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

use std::path::Path;

use quill_draw::renderers::cpu::CpuAtlas;
use quill_draw::{
    FontMetrics, GlyphStore, GlyphStoreConfig, RasterMetrics, RasterizedGlyph, Rasterizer,
};

/// Advance of every drawable test glyph except the space.
pub(crate) const ADVANCE: f64 = 8.0;
/// Advance of the space.
pub(crate) const SPACE_ADVANCE: f64 = 4.0;
/// Size of every drawable test glyph.
pub(crate) const GLYPH_WIDTH: u16 = 6;
pub(crate) const GLYPH_HEIGHT: u16 = 10;

/// A codepoint the test font does not map.
pub(crate) const UNMAPPED: char = '\u{E000}';
/// A codepoint whose glyph is too large for an atlas cell.
pub(crate) const OVERSIZED: char = '🦢';
/// A codepoint that maps to an empty, zero-advance glyph.
pub(crate) const ZERO_WIDTH: char = '\u{200B}';

/// A synthetic monospaced font.
///
/// Every glyph is a solid block whose coverage value is derived from the
/// codepoint, so atlas contents can be traced back to the glyph.
#[derive(Debug, Default)]
pub(crate) struct TestFont {
    /// Every codepoint passed to [`Rasterizer::rasterize`], in order.
    pub(crate) calls: Vec<u32>,
    scratch: Vec<u8>,
}

/// The coverage value the test font uses for `codepoint`.
pub(crate) fn coverage_of(codepoint: u32) -> u8 {
    (codepoint % 251) as u8 + 1
}

impl Rasterizer for TestFont {
    fn font_metrics(&self) -> FontMetrics {
        FontMetrics {
            ascent: 10.0,
            descent: -3.0,
            line_gap: 1.0,
            max_width: 8,
            max_height: 12,
        }
    }

    fn rasterize(&mut self, codepoint: u32) -> Option<RasterizedGlyph<'_>> {
        self.calls.push(codepoint);
        match char::from_u32(codepoint)? {
            UNMAPPED => None,
            ' ' => Some(RasterizedGlyph {
                metrics: RasterMetrics::default(),
                advance: SPACE_ADVANCE as f32,
                coverage: None,
            }),
            ZERO_WIDTH => Some(RasterizedGlyph {
                metrics: RasterMetrics::default(),
                advance: 0.0,
                coverage: None,
            }),
            OVERSIZED => {
                self.scratch.clear();
                self.scratch.resize(20 * 20, 0xFF);
                Some(RasterizedGlyph {
                    metrics: RasterMetrics {
                        width: 20,
                        height: 20,
                        bearing_x: 0,
                        bearing_y: -16,
                    },
                    advance: 16.0,
                    coverage: Some(&self.scratch),
                })
            }
            _ => {
                self.scratch.clear();
                self.scratch.resize(
                    usize::from(GLYPH_WIDTH) * usize::from(GLYPH_HEIGHT),
                    coverage_of(codepoint),
                );
                Some(RasterizedGlyph {
                    metrics: RasterMetrics {
                        width: GLYPH_WIDTH,
                        height: GLYPH_HEIGHT,
                        bearing_x: 1,
                        bearing_y: -10,
                    },
                    advance: ADVANCE as f32,
                    coverage: Some(&self.scratch),
                })
            }
        }
    }
}

pub(crate) type TestStore = GlyphStore<TestFont, CpuAtlas>;

/// A 256x256 atlas; `None` uses every cell.
pub(crate) fn test_config(max_dynamic_slots: Option<u16>) -> GlyphStoreConfig {
    GlyphStoreConfig {
        atlas_width: 256,
        atlas_height: 256,
        max_dynamic_slots,
    }
}

/// A store for the test font with at most `slots` dynamic slots.
pub(crate) fn test_store(slots: u16) -> TestStore {
    let config = test_config(Some(slots));
    GlyphStore::new(config, TestFont::default(), CpuAtlas::for_config(&config))
        .expect("the test font fits a 256x256 atlas")
}

/// The bytes of the DejaVu Sans font bundled with the tests.
pub(crate) fn dejavu_sans() -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("DejaVuSans.ttf");
    std::fs::read(&path).unwrap_or_else(|err| panic!("reading {}: {err}", path.display()))
}

/// A tiny deterministic generator for access patterns.
pub(crate) struct Lcg(u64);

impl Lcg {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// A value in `0..bound`.
    pub(crate) fn below(&mut self, bound: u32) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((self.0 >> 33) % u64::from(bound)) as u32
    }
}
