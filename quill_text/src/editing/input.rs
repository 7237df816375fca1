// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-line text input with a cursor and a selection.

use core::ops::Range;

use crate::buffer::TextBuffer;
use crate::editing::{MoveUnit, Movement};
use crate::navigation::{move_by_codepoints, move_by_words, move_to_extent};

/// Opaque representation of a generation.
///
/// Obtained from [`TextInput::generation`]. Changes whenever the text, the
/// cursor or the selection changes, so consumers can skip relayout while it
/// stays the same.
// Overflow handling: generations are only compared for equality, so wrapping
// only matters if exactly `u32::MAX` edits happen between two checks.
#[derive(PartialEq, Eq, Default, Clone, Copy, Debug)]
pub struct Generation(u32);

impl Generation {
    fn nudge(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Editable text with a cursor and a selection anchor.
///
/// The cursor is the moving end of the selection and the mark is its fixed
/// end; both are byte offsets into the text. When they are equal there is no
/// selection.
///
/// Every operation is total: offsets are clamped and insertions that do not fit
/// are truncated at a codepoint boundary.
#[derive(Clone, Debug)]
pub struct TextInput {
    buffer: TextBuffer,
    cursor: usize,
    mark: usize,
    generation: Generation,
}

impl TextInput {
    /// Creates an empty input that can hold `capacity` bytes of text.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: TextBuffer::with_capacity(capacity),
            cursor: 0,
            mark: 0,
            // Start away from the default so consumers holding a default
            // generation draw at least once.
            generation: Generation(1),
        }
    }

    /// The current text. See [`TextBuffer::as_str`] for the cost.
    #[inline]
    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    /// The underlying buffer.
    #[inline]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Byte offset of the cursor.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Byte offset of the selection anchor.
    #[inline]
    pub fn mark(&self) -> usize {
        self.mark
    }

    /// The current generation.
    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The selected byte range, ordered. Empty when there is no selection.
    #[inline]
    pub fn selection(&self) -> Range<usize> {
        self.cursor.min(self.mark)..self.cursor.max(self.mark)
    }

    /// Returns `true` if the cursor and the mark differ.
    #[inline]
    pub fn has_selection(&self) -> bool {
        self.cursor != self.mark
    }

    /// The selected text.
    pub fn selected_text(&self) -> &str {
        self.text().get(self.selection()).unwrap_or_default()
    }

    fn set_positions(&mut self, cursor: usize, mark: usize) {
        if (cursor, mark) != (self.cursor, self.mark) {
            self.cursor = cursor;
            self.mark = mark;
            self.generation.nudge();
        }
    }

    /// Inserts `text` at the cursor, replacing the selection.
    ///
    /// Returns `false` if nothing changed, for example because the buffer is
    /// full. On success the cursor is placed after the inserted text.
    pub fn write(&mut self, text: &str) -> bool {
        let splice = self.buffer.replace_range(self.cursor, self.mark, text);
        if splice.changed {
            self.cursor = splice.cursor;
            self.mark = splice.cursor;
            self.generation.nudge();
        }
        splice.changed
    }

    /// Moves the cursor by `delta` units. Negative values move backwards.
    ///
    /// A plain movement (see [`Movement::is_plain`]) with an active selection
    /// only collapses the selection onto its edge in the direction of `delta`.
    /// Otherwise the cursor moves, and the mark follows it unless the movement
    /// is selecting.
    pub fn move_cursor(&mut self, delta: isize, movement: Movement) {
        if movement.is_plain() && self.has_selection() {
            let edge = if delta > 0 {
                self.cursor.max(self.mark)
            } else {
                self.cursor.min(self.mark)
            };
            self.set_positions(edge, edge);
            return;
        }

        let text = self.buffer.as_bytes();
        let cursor = match movement.unit {
            MoveUnit::Extent => move_to_extent(text, delta >= 0),
            MoveUnit::Word => move_by_words(text, self.cursor, delta),
            MoveUnit::Codepoint => move_by_codepoints(text, self.cursor, delta),
        };
        let mark = if movement.select { self.mark } else { cursor };
        self.set_positions(cursor, mark);
    }

    /// Selects the whole text, leaving the cursor at the end.
    pub fn select_all(&mut self) {
        self.set_positions(self.buffer.len(), 0);
    }

    /// Places the cursor at `pos`, as when clicking into the text.
    ///
    /// `pos` is clamped to the text and moved back to a codepoint boundary. With
    /// `extend`, the mark stays put and the selection grows to `pos`.
    pub fn set_cursor(&mut self, pos: usize, extend: bool) {
        let text = self.text();
        let mut pos = pos.min(text.len());
        while !text.is_char_boundary(pos) {
            pos -= 1;
        }
        let mark = if extend { self.mark } else { pos };
        self.set_positions(pos, mark);
    }

    /// Deletes the selection, or one `unit` after the cursor.
    ///
    /// Returns `true` if any text was removed.
    pub fn delete(&mut self, unit: MoveUnit) -> bool {
        self.delete_towards(1, unit)
    }

    /// Deletes the selection, or one `unit` before the cursor.
    ///
    /// Returns `true` if any text was removed.
    pub fn backdelete(&mut self, unit: MoveUnit) -> bool {
        self.delete_towards(-1, unit)
    }

    fn delete_towards(&mut self, direction: isize, unit: MoveUnit) -> bool {
        if !self.has_selection() {
            self.move_cursor(direction, Movement::by(unit).selecting());
        }
        self.write("")
    }

    /// Removes all text and resets the cursor.
    pub fn clear(&mut self) {
        if !self.buffer.is_empty() {
            self.buffer.clear();
            self.generation.nudge();
        }
        self.set_positions(0, 0);
    }
}
