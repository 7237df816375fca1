// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph records and atlas space allocation.

/// How much of a glyph could be prepared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GlyphStatus {
    /// The record holds no glyph.
    #[default]
    Empty,
    /// The font has nothing to draw or advance for this codepoint.
    Invalid,
    /// The glyph advances the pen but has no bitmap in the atlas, because it
    /// has no outline or is larger than an atlas cell.
    MetricsOnly,
    /// The glyph bitmap is in the atlas.
    Loaded,
}

/// Where a glyph lives in the atlas and how to place it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Glyph {
    /// Left edge of the bitmap in the atlas.
    pub tex_x: u16,
    /// Top edge of the bitmap in the atlas.
    pub tex_y: u16,
    /// Width of the bitmap in pixels.
    pub width: u16,
    /// Height of the bitmap in pixels.
    pub height: u16,
    /// Offset from the pen position to the left edge of the bitmap.
    pub offset_x: i16,
    /// Offset from the baseline to the top edge of the bitmap, positive downwards.
    pub offset_y: i16,
    /// Horizontal advance in pixels.
    pub advance: f32,
    /// What the other fields can be used for.
    pub status: GlyphStatus,
}

impl Glyph {
    /// A record with no glyph.
    pub const EMPTY: Self = Self {
        tex_x: 0,
        tex_y: 0,
        width: 0,
        height: 0,
        offset_x: 0,
        offset_y: 0,
        advance: 0.0,
        status: GlyphStatus::Empty,
    };

    /// The glyph for codepoints the font cannot render.
    pub const INVALID: Self = Self {
        status: GlyphStatus::Invalid,
        ..Self::EMPTY
    };

    /// Returns `true` if the glyph has a bitmap in the atlas.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.status == GlyphStatus::Loaded
    }

    /// Returns `true` if the glyph can be drawn or at least advanced over.
    #[inline]
    pub fn is_usable(&self) -> bool {
        matches!(self.status, GlyphStatus::Loaded | GlyphStatus::MetricsOnly)
    }
}

/// Packs rectangles left to right into rows of a fixed height.
///
/// Used for the ASCII block, which is packed once at construction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Shelf {
    atlas_width: u16,
    atlas_height: u16,
    row_height: u16,
    padding: u16,
    x: u16,
    y: u16,
}

impl Shelf {
    pub(crate) fn new(atlas_width: u16, atlas_height: u16, row_height: u16, padding: u16) -> Self {
        Self {
            atlas_width,
            atlas_height,
            row_height,
            padding,
            x: 0,
            y: 0,
        }
    }

    /// Reserves a `width` by `height` rectangle, returning its top-left corner.
    pub(crate) fn allocate(&mut self, width: u16, height: u16) -> Option<(u16, u16)> {
        if width > self.atlas_width || height > self.row_height {
            return None;
        }
        if u32::from(self.x) + u32::from(width) > u32::from(self.atlas_width) {
            self.x = 0;
            self.y = self.y.checked_add(self.row_height)?;
        }
        if u32::from(self.y) + u32::from(height) > u32::from(self.atlas_height) {
            return None;
        }
        let corner = (self.x, self.y);
        self.x = self.x.saturating_add(width).saturating_add(self.padding);
        Some(corner)
    }

    /// The first row below everything allocated so far.
    pub(crate) fn bottom(&self) -> u16 {
        if self.x == 0 {
            self.y
        } else {
            self.y.saturating_add(self.row_height)
        }
    }
}

/// Fixed cells of the dynamic region, laid out row by row below the shelf.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CellGrid {
    top: u16,
    columns: u16,
    rows: u16,
    cell_width: u16,
    cell_height: u16,
}

impl CellGrid {
    pub(crate) fn new(
        atlas_width: u16,
        atlas_height: u16,
        top: u16,
        cell_width: u16,
        cell_height: u16,
    ) -> Self {
        Self {
            top,
            columns: atlas_width / cell_width,
            rows: atlas_height.saturating_sub(top) / cell_height,
            cell_width,
            cell_height,
        }
    }

    /// Number of cells that fit.
    pub(crate) fn len(&self) -> usize {
        usize::from(self.columns) * usize::from(self.rows)
    }

    /// Top-left corner of the cell at `index`, which must be below [`len`](Self::len).
    #[expect(
        clippy::cast_possible_truncation,
        reason = "cells of a grid lie inside a u16-sized atlas"
    )]
    pub(crate) fn cell(&self, index: usize) -> (u16, u16) {
        let columns = usize::from(self.columns);
        let x = (index % columns) * usize::from(self.cell_width);
        let y = usize::from(self.top) + (index / columns) * usize::from(self.cell_height);
        (x as u16, y as u16)
    }
}
