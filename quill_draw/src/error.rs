// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Errors that can occur while setting up a [`GlyphStore`](crate::GlyphStore)
/// or a rasterizer.
///
/// Nothing after construction can fail: lookups of glyphs the font cannot draw
/// resolve to an invalid glyph instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The font reports a zero-sized maximum glyph box, so no atlas cell can be
    /// laid out.
    EmptyCell,
    /// The printable ASCII glyphs do not fit in the atlas.
    AsciiDoesNotFit {
        /// Width of the atlas in pixels.
        atlas_width: u16,
        /// Height of the atlas in pixels.
        atlas_height: u16,
        /// The first codepoint that could not be placed.
        codepoint: u32,
    },
    /// No dynamic cell fits below the ASCII block.
    NoDynamicSlots {
        /// Width of a single cell in pixels.
        cell_width: u16,
        /// Height of a single cell in pixels.
        cell_height: u16,
    },
    /// The font data could not be parsed.
    InvalidFont,
    /// The requested pixel size is not a positive, finite number.
    InvalidPixelSize,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCell => f.write_str("font has an empty glyph bounding box"),
            Self::AsciiDoesNotFit {
                atlas_width,
                atlas_height,
                codepoint,
            } => write!(
                f,
                "printable ASCII does not fit in a {atlas_width}x{atlas_height} atlas (stopped at U+{codepoint:04X})"
            ),
            Self::NoDynamicSlots {
                cell_width,
                cell_height,
            } => write!(
                f,
                "no {cell_width}x{cell_height} glyph cell fits in the atlas after the ASCII block"
            ),
            Self::InvalidFont => f.write_str("font data could not be parsed"),
            Self::InvalidPixelSize => f.write_str("pixel size must be positive and finite"),
        }
    }
}

impl core::error::Error for Error {}
