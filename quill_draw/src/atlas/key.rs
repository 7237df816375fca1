// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Codepoint keys for the dynamic glyph cache.

use quill_text::MAX_CODEPOINT;

/// First codepoint of the preloaded ASCII block (space).
pub(crate) const ASCII_FIRST: u32 = 0x20;
/// Last codepoint of the preloaded ASCII block (tilde).
pub(crate) const ASCII_LAST: u32 = 0x7E;
/// Number of preloaded ASCII glyphs.
pub(crate) const ASCII_COUNT: usize = (ASCII_LAST - ASCII_FIRST + 1) as usize;

/// Index into the preloaded ASCII block, if `codepoint` is printable ASCII.
#[inline]
pub(crate) fn ascii_index(codepoint: u32) -> Option<usize> {
    if (ASCII_FIRST..=ASCII_LAST).contains(&codepoint) {
        Some((codepoint - ASCII_FIRST) as usize)
    } else {
        None
    }
}

/// Whether `codepoint` may occupy a dynamic slot.
///
/// Codepoint 0 marks a free slot, and values past the Unicode range can never
/// name a glyph.
#[inline]
pub(crate) fn is_cacheable(codepoint: u32) -> bool {
    codepoint != 0 && codepoint <= MAX_CODEPOINT && ascii_index(codepoint).is_none()
}

/// Number of hash buckets for `slots` dynamic slots: the smallest power of two
/// at or above four thirds of the slot count.
pub(crate) fn bucket_count(slots: usize) -> usize {
    (slots * 4 / 3).max(1).next_power_of_two()
}

/// The bucket a codepoint hashes to, for a table of `mask + 2` entries.
///
/// Keys start at 1; entry 0 of the table is never used.
#[inline]
pub(crate) fn bucket_of(codepoint: u32, mask: u32) -> usize {
    1 + (codepoint & mask) as usize
}
