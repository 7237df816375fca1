// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Laying out a single line of text from cached glyphs.

use peniko::color::{AlphaColor, Srgb};
use peniko::kurbo::Point;

use crate::raster::{AtlasWriter, Rasterizer};
use crate::{DrawList, Glyph, GlyphStore};

/// Drawn in place of codepoints the font cannot render.
pub const FALLBACK_CODEPOINT: u32 = '?' as u32;

/// Looks up `codepoint`, substituting [`FALLBACK_CODEPOINT`] if the font has
/// neither a bitmap nor an advance for it.
///
/// The flag is `true` when the fallback was used.
pub fn resolve_glyph<R: Rasterizer, W: AtlasWriter>(
    store: &mut GlyphStore<R, W>,
    codepoint: u32,
) -> (Glyph, bool) {
    let glyph = store.lookup(codepoint);
    if glyph.is_usable() {
        (glyph, false)
    } else {
        (store.lookup(FALLBACK_CODEPOINT), true)
    }
}

/// Calls `f` with the byte index, pen offset and resolved glyph of every
/// codepoint in `text`. Returns the total advance.
pub(crate) fn for_each_glyph<R: Rasterizer, W: AtlasWriter>(
    store: &mut GlyphStore<R, W>,
    text: &str,
    mut f: impl FnMut(usize, f64, Glyph, bool),
) -> f64 {
    let mut pen = 0.0;
    for (index, ch) in text.char_indices() {
        let (glyph, fallback) = resolve_glyph(store, u32::from(ch));
        f(index, pen, glyph, fallback);
        pen += f64::from(glyph.advance);
    }
    pen
}

/// Total advance of `text`, including fallback glyphs.
pub fn measure_text<R: Rasterizer, W: AtlasWriter>(
    store: &mut GlyphStore<R, W>,
    text: &str,
) -> f64 {
    for_each_glyph(store, text, |_, _, _, _| {})
}

/// Records quads for `text` with the pen starting at `origin` on the baseline.
///
/// Fallback glyphs are drawn with the color's RGB channels inverted so that
/// they stand out. Returns the total advance.
pub fn draw_text<R: Rasterizer, W: AtlasWriter>(
    store: &mut GlyphStore<R, W>,
    list: &mut DrawList,
    text: &str,
    origin: Point,
    color: AlphaColor<Srgb>,
) -> f64 {
    let fallback_color = invert_rgb(color);
    for_each_glyph(store, text, |_, pen, glyph, fallback| {
        let color = if fallback { fallback_color } else { color };
        list.push_glyph(&glyph, Point::new(origin.x + pen, origin.y), color);
    })
}

pub(crate) fn invert_rgb(color: AlphaColor<Srgb>) -> AlphaColor<Srgb> {
    let [r, g, b, a] = color.components;
    AlphaColor::new([1.0 - r, 1.0 - g, 1.0 - b, a])
}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::color::palette::css::{BLACK, WHITE};

    #[test]
    fn inversion_keeps_alpha() {
        assert_eq!(invert_rgb(WHITE).components, BLACK.components);
        let translucent = AlphaColor::<Srgb>::from_rgba8(0x10, 0x20, 0x30, 0x80);
        let inverted = invert_rgb(translucent).to_rgba8();
        assert_eq!(
            [inverted.r, inverted.g, inverted.b, inverted.a],
            [0xEF, 0xDF, 0xCF, 0x80]
        );
    }
}
