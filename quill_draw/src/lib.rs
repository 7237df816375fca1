// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quill Draw caches rasterized glyphs in a single fixed-size atlas texture and
//! turns text into textured quads.
//!
//! The pieces, from the bottom up:
//!
//! - [`Rasterizer`]: the font seam. Given a codepoint it produces metrics and an
//!   8-bit coverage bitmap. [`SkrifaRasterizer`] implements it for TrueType and
//!   OpenType fonts.
//! - [`AtlasWriter`]: the texture seam. The store calls it to upload coverage
//!   into a rectangle of the atlas. [`CpuAtlas`](renderers::cpu::CpuAtlas)
//!   keeps the texture in memory.
//! - [`GlyphStore`]: printable ASCII is rasterized once, up front. Every other
//!   codepoint goes through a fixed set of atlas cells with least-recently-used
//!   eviction. Lookups never allocate.
//! - [`DrawList`], [`draw_text`] and [`TextField`]: a single line of text, its
//!   caret and its selection, recorded as quads and rectangles for a renderer.
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//! - `skrifa` (enabled by default): Provides [`SkrifaRasterizer`], rendering outlines
//!   with `tiny-skia`. Implies `std`.
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use peniko::{color, kurbo};

mod draw_list;
mod error;
mod field;
mod glyph;

pub mod atlas;
pub mod raster;
pub mod renderers;

pub use atlas::{Glyph, GlyphStatus, GlyphStore, GlyphStoreConfig};
pub use draw_list::{DrawList, GlyphQuad, SolidRect};
pub use error::Error;
pub use field::{FieldStyle, TextField};
pub use glyph::{FALLBACK_CODEPOINT, draw_text, measure_text, resolve_glyph};
pub use raster::{AtlasWriter, FontMetrics, RasterMetrics, RasterizedGlyph, Rasterizer};

#[cfg(feature = "skrifa")]
pub use raster::skrifa::SkrifaRasterizer;
