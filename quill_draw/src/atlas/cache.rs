// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-capacity glyph cache with least-recently-used eviction.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use super::key::{ASCII_COUNT, ASCII_FIRST, ascii_index, bucket_count, bucket_of, is_cacheable};
use super::region::{CellGrid, Glyph, GlyphStatus, Shelf};
use crate::Error;
use crate::raster::{AtlasWriter, FontMetrics, Rasterizer};

/// Padding in pixels between neighbouring glyphs in the atlas.
pub const GLYPH_PADDING: u16 = 1;

/// Largest number of dynamic slots; slot indices are `u16` and index 0 is
/// reserved.
pub const MAX_DYNAMIC_SLOTS: u16 = u16::MAX - 1;

/// Slot index 0 heads the recency ring and ends every bucket chain.
const SENTINEL: u16 = 0;

/// The codepoint stored in a free slot.
const FREE: u32 = 0;

/// Atlas layout for a [`GlyphStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphStoreConfig {
    /// Width of the atlas texture in pixels.
    pub atlas_width: u16,
    /// Height of the atlas texture in pixels.
    pub atlas_height: u16,
    /// Upper bound on the number of dynamic slots.
    ///
    /// `None` uses every cell that fits in the atlas.
    pub max_dynamic_slots: Option<u16>,
}

impl Default for GlyphStoreConfig {
    fn default() -> Self {
        Self {
            atlas_width: 1024,
            atlas_height: 1024,
            max_dynamic_slots: None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    glyph: Glyph,
    /// The cached codepoint, or [`FREE`].
    codepoint: u32,
    /// Next slot in the same bucket, or [`SENTINEL`].
    next_in_bucket: u16,
    /// Neighbour towards the most recently used end of the ring.
    prev: u16,
    /// Neighbour towards the least recently used end of the ring.
    next: u16,
    cell_x: u16,
    cell_y: u16,
}

/// Glyphs for one font at one size, backed by a single atlas texture.
///
/// Printable ASCII (U+0020 to U+007E) is rasterized when the store is created
/// and stays resident. Every other codepoint is loaded on first use into one of
/// a fixed number of equally sized atlas cells, replacing the least recently
/// used glyph when all cells are taken.
///
/// All storage is allocated up front; [`lookup`](Self::lookup) never allocates.
pub struct GlyphStore<R, W> {
    rasterizer: R,
    atlas: W,
    config: GlyphStoreConfig,
    font_metrics: FontMetrics,
    ascii: [Glyph; ASCII_COUNT],
    /// Slot 0 is the sentinel; slots `1..` are the dynamic cells.
    slots: Box<[Slot]>,
    /// Head of each bucket chain, or [`SENTINEL`]. Indexed by
    /// [`bucket_of`], so entry 0 stays empty.
    buckets: Box<[u16]>,
    bucket_mask: u32,
    len: usize,
    cache_hits: u64,
    cache_misses: u64,
}

impl<R: Rasterizer, W: AtlasWriter> GlyphStore<R, W> {
    /// Lays out the atlas, uploads printable ASCII and prepares the dynamic slots.
    ///
    /// Cells are sized from the font's maximum glyph box. Fails if the font has
    /// an empty glyph box, if the ASCII glyphs do not fit in the atlas or if no
    /// dynamic cell fits below them.
    pub fn new(config: GlyphStoreConfig, mut rasterizer: R, mut atlas: W) -> Result<Self, Error> {
        let font_metrics = rasterizer.font_metrics();
        let (max_width, max_height) = (font_metrics.max_width, font_metrics.max_height);
        if max_width == 0 || max_height == 0 {
            return Err(Error::EmptyCell);
        }
        let cell_width = max_width.saturating_add(GLYPH_PADDING);
        let cell_height = max_height.saturating_add(GLYPH_PADDING);

        let mut shelf = Shelf::new(
            config.atlas_width,
            config.atlas_height,
            cell_height,
            GLYPH_PADDING,
        );
        let mut ascii = [Glyph::EMPTY; ASCII_COUNT];
        for (codepoint, glyph) in (ASCII_FIRST..).zip(ascii.iter_mut()) {
            *glyph = prepare_glyph(
                &mut rasterizer,
                &mut atlas,
                codepoint,
                (max_width, max_height),
                |width, height| shelf.allocate(width, height),
            )
            .ok_or(Error::AsciiDoesNotFit {
                atlas_width: config.atlas_width,
                atlas_height: config.atlas_height,
                codepoint,
            })?;
        }

        let grid = CellGrid::new(
            config.atlas_width,
            config.atlas_height,
            shelf.bottom(),
            cell_width,
            cell_height,
        );
        let slot_count = grid
            .len()
            .min(usize::from(config.max_dynamic_slots.unwrap_or(u16::MAX)))
            .min(usize::from(MAX_DYNAMIC_SLOTS));
        if slot_count == 0 {
            return Err(Error::NoDynamicSlots {
                cell_width,
                cell_height,
            });
        }

        // Free slots start out in reverse so that cells are taken in order.
        let ring_len = slot_count + 1;
        let slots = (0..ring_len)
            .map(|index| {
                let (cell_x, cell_y) = if index == 0 {
                    (0, 0)
                } else {
                    grid.cell(index - 1)
                };
                Slot {
                    glyph: Glyph::EMPTY,
                    codepoint: FREE,
                    next_in_bucket: SENTINEL,
                    prev: slot_index((index + 1) % ring_len),
                    next: slot_index((index + ring_len - 1) % ring_len),
                    cell_x,
                    cell_y,
                }
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();
        let buckets = bucket_count(slot_count);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "at most 2^17 buckets for u16 slot indices"
        )]
        let bucket_mask = (buckets - 1) as u32;

        log::debug!(
            "glyph store: {}x{} atlas, {cell_width}x{cell_height} cells, {slot_count} dynamic slots, {buckets} buckets",
            config.atlas_width,
            config.atlas_height,
        );

        Ok(Self {
            rasterizer,
            atlas,
            config,
            font_metrics,
            ascii,
            slots,
            buckets: vec![SENTINEL; buckets + 1].into_boxed_slice(),
            bucket_mask,
            len: 0,
            cache_hits: 0,
            cache_misses: 0,
        })
    }

    /// Returns the glyph for `codepoint`, loading it into the atlas on a miss.
    ///
    /// Printable ASCII comes from the preloaded block. Codepoint 0 and values
    /// past U+10FFFF resolve to [`Glyph::INVALID`]. Anything else is looked up
    /// in the dynamic cache and becomes its most recently used entry; on a miss
    /// the least recently used entry is evicted and its cell reused.
    ///
    /// The status of the returned glyph tells whether it can be drawn.
    pub fn lookup(&mut self, codepoint: u32) -> Glyph {
        if let Some(index) = ascii_index(codepoint) {
            return self.ascii[index];
        }
        if !is_cacheable(codepoint) {
            return Glyph::INVALID;
        }

        let bucket = bucket_of(codepoint, self.bucket_mask);
        let index = match self.find(bucket, codepoint) {
            Some(index) => {
                self.cache_hits += 1;
                index
            }
            None => {
                self.cache_misses += 1;
                self.load(bucket, codepoint)
            }
        };
        self.touch(index);
        self.slots[usize::from(index)].glyph
    }

    fn find(&self, bucket: usize, codepoint: u32) -> Option<u16> {
        let mut index = self.buckets[bucket];
        while index != SENTINEL {
            let slot = &self.slots[usize::from(index)];
            if slot.codepoint == codepoint {
                return Some(index);
            }
            index = slot.next_in_bucket;
        }
        None
    }

    /// Fills the least recently used slot with `codepoint`.
    fn load(&mut self, bucket: usize, codepoint: u32) -> u16 {
        let index = self.slots[usize::from(SENTINEL)].prev;
        if self.slots[usize::from(index)].codepoint != FREE {
            self.evict(index);
        }

        let slot = &self.slots[usize::from(index)];
        let cell = (slot.cell_x, slot.cell_y);
        let max = (self.font_metrics.max_width, self.font_metrics.max_height);
        let mut glyph = prepare_glyph(
            &mut self.rasterizer,
            &mut self.atlas,
            codepoint,
            max,
            |_, _| Some(cell),
        )
        .unwrap_or(Glyph::INVALID);
        (glyph.tex_x, glyph.tex_y) = cell;
        log::trace!(
            "loaded U+{codepoint:04X} into slot {index} as {:?}",
            glyph.status
        );

        let slot = &mut self.slots[usize::from(index)];
        slot.glyph = glyph;
        slot.codepoint = codepoint;
        slot.next_in_bucket = self.buckets[bucket];
        self.buckets[bucket] = index;
        self.len += 1;
        index
    }

    /// Unlinks the slot at `index` from its bucket chain and marks it free.
    fn evict(&mut self, index: u16) {
        let slot = self.slots[usize::from(index)];
        let bucket = bucket_of(slot.codepoint, self.bucket_mask);
        if self.buckets[bucket] == index {
            self.buckets[bucket] = slot.next_in_bucket;
        } else {
            let mut link = self.buckets[bucket];
            while link != SENTINEL {
                let prev = &mut self.slots[usize::from(link)];
                if prev.next_in_bucket == index {
                    prev.next_in_bucket = slot.next_in_bucket;
                    break;
                }
                link = prev.next_in_bucket;
            }
        }
        log::trace!("evicted U+{:04X} from slot {index}", slot.codepoint);

        let slot = &mut self.slots[usize::from(index)];
        slot.codepoint = FREE;
        slot.next_in_bucket = SENTINEL;
        slot.glyph = Glyph::EMPTY;
        self.len -= 1;
    }

    /// Moves the slot at `index` to the most recently used end of the ring.
    fn touch(&mut self, index: u16) {
        let Slot { prev, next, .. } = self.slots[usize::from(index)];
        self.slots[usize::from(prev)].next = next;
        self.slots[usize::from(next)].prev = prev;

        let head = self.slots[usize::from(SENTINEL)].next;
        let slot = &mut self.slots[usize::from(index)];
        slot.prev = SENTINEL;
        slot.next = head;
        self.slots[usize::from(head)].prev = index;
        self.slots[usize::from(SENTINEL)].next = index;
    }

    /// Returns `true` if `codepoint` can be looked up without rasterizing.
    ///
    /// Does not change the recency order.
    pub fn contains(&self, codepoint: u32) -> bool {
        if ascii_index(codepoint).is_some() {
            return true;
        }
        is_cacheable(codepoint)
            && self
                .find(bucket_of(codepoint, self.bucket_mask), codepoint)
                .is_some()
    }

    /// The preloaded glyph for a printable ASCII codepoint.
    pub fn ascii_glyph(&self, codepoint: u32) -> Option<Glyph> {
        ascii_index(codepoint).map(|index| self.ascii[index])
    }

    /// Cached codepoints, from the most to the least recently used.
    ///
    /// Printable ASCII is not included.
    pub fn resident_codepoints(&self) -> impl Iterator<Item = u32> + '_ {
        let mut index = self.slots[usize::from(SENTINEL)].next;
        core::iter::from_fn(move || {
            while index != SENTINEL {
                let slot = &self.slots[usize::from(index)];
                index = slot.next;
                if slot.codepoint != FREE {
                    return Some(slot.codepoint);
                }
            }
            None
        })
    }

    /// Forgets every dynamic glyph. The ASCII block stays.
    ///
    /// Atlas contents are not touched; freed cells are overwritten as they are
    /// reused.
    pub fn clear(&mut self) {
        let ring_len = self.slots.len();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.glyph = Glyph::EMPTY;
            slot.codepoint = FREE;
            slot.next_in_bucket = SENTINEL;
            slot.prev = slot_index((index + 1) % ring_len);
            slot.next = slot_index((index + ring_len - 1) % ring_len);
        }
        self.buckets.fill(SENTINEL);
        log::debug!("cleared {} cached glyphs", self.len);
        self.len = 0;
    }

    /// Number of dynamic glyphs currently cached.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no dynamic glyph is cached.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of dynamic slots.
    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    /// Number of dynamic lookups answered from the cache since the last
    /// [`clear_stats`](Self::clear_stats).
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    /// Number of dynamic lookups that had to rasterize since the last
    /// [`clear_stats`](Self::clear_stats).
    pub fn cache_misses(&self) -> u64 {
        self.cache_misses
    }

    /// Resets the hit and miss counters without touching the cache.
    pub fn clear_stats(&mut self) {
        self.cache_hits = 0;
        self.cache_misses = 0;
    }

    /// Metrics of the font the store was created with.
    pub fn font_metrics(&self) -> &FontMetrics {
        &self.font_metrics
    }

    /// The atlas layout the store was created with.
    pub fn config(&self) -> &GlyphStoreConfig {
        &self.config
    }

    /// The rasterizer.
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// The atlas writer.
    pub fn atlas(&self) -> &W {
        &self.atlas
    }

    /// The atlas writer, mutably.
    ///
    /// Writing into cells the store manages corrupts the glyphs in them.
    pub fn atlas_mut(&mut self) -> &mut W {
        &mut self.atlas
    }

    /// Takes the store apart.
    pub fn into_parts(self) -> (R, W) {
        (self.rasterizer, self.atlas)
    }
}

impl<R, W> Debug for GlyphStore<R, W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlyphStore")
            .field("config", &self.config)
            .field("font_metrics", &self.font_metrics)
            .field("len", &self.len)
            .field("capacity", &(self.slots.len() - 1))
            .field("cache_hits", &self.cache_hits)
            .field("cache_misses", &self.cache_misses)
            .finish_non_exhaustive()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "slot counts are capped at MAX_DYNAMIC_SLOTS"
)]
fn slot_index(index: usize) -> u16 {
    index as u16
}

/// Rasterizes `codepoint` and decides its status.
///
/// A bitmap that fits in `max` is uploaded to the position returned by
/// `place`; a glyph that only advances the pen becomes
/// [`GlyphStatus::MetricsOnly`]. Returns `None` only if `place` finds no room.
fn prepare_glyph<R: Rasterizer, W: AtlasWriter>(
    rasterizer: &mut R,
    atlas: &mut W,
    codepoint: u32,
    max: (u16, u16),
    place: impl FnOnce(u16, u16) -> Option<(u16, u16)>,
) -> Option<Glyph> {
    let Some(raster) = rasterizer.rasterize(codepoint) else {
        return Some(Glyph::INVALID);
    };
    let metrics = raster.metrics;
    let mut glyph = Glyph {
        width: metrics.width,
        height: metrics.height,
        offset_x: metrics.bearing_x,
        offset_y: metrics.bearing_y,
        advance: raster.advance,
        ..Glyph::EMPTY
    };

    let area = usize::from(metrics.width) * usize::from(metrics.height);
    let fits = area > 0 && metrics.width <= max.0 && metrics.height <= max.1;
    match raster.coverage {
        Some(coverage) if fits && coverage.len() >= area => {
            let (x, y) = place(metrics.width, metrics.height)?;
            atlas.upload(x, y, metrics.width, metrics.height, &coverage[..area]);
            glyph.tex_x = x;
            glyph.tex_y = y;
            glyph.status = GlyphStatus::Loaded;
        }
        coverage => {
            if coverage.is_some() && area > 0 {
                log::warn!(
                    "U+{codepoint:04X} is {}x{} and does not fit a {}x{} cell",
                    metrics.width,
                    metrics.height,
                    max.0,
                    max.1
                );
            }
            glyph.status = if raster.advance != 0.0 {
                GlyphStatus::MetricsOnly
            } else {
                GlyphStatus::Invalid
            };
        }
    }
    Some(glyph)
}
