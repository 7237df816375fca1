// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph atlas with a preloaded ASCII block and a fixed-size LRU cache.
//!
//! The atlas is split into two regions:
//! - Printable ASCII, packed into shelves at the top when the store is created.
//! - A grid of equally sized cells below it. Each cell is one dynamic slot and
//!   holds at most one glyph at a time.
//!
//! Dynamic slots are found through a chained hash table keyed by codepoint and
//! kept in recency order by a ring of links through the slots themselves, so
//! neither lookups nor evictions touch the allocator.

mod cache;
mod key;
mod region;

pub use cache::{GLYPH_PADDING, GlyphStore, GlyphStoreConfig, MAX_DYNAMIC_SLOTS};
pub use region::{Glyph, GlyphStatus};
