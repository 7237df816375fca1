// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A fixed-capacity UTF-8 byte buffer with in-place range replacement.

use alloc::boxed::Box;
use alloc::vec;
use core::fmt::{self, Debug, Display};
use core::ops::Range;

use crate::codec::truncate_partial_tail;

/// Outcome of [`TextBuffer::replace_range`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Splice {
    /// Whether the buffer was modified.
    pub changed: bool,
    /// Byte offset just past the inserted text.
    ///
    /// When nothing changed this is the start of the (clamped) range.
    pub cursor: usize,
}

/// Text storage that never grows past the capacity it was created with.
///
/// The storage is allocated once, up front. The bytes in `0..len()` are always
/// valid UTF-8: insertions that do not fit are cut back to the last whole
/// codepoint that does.
#[derive(Clone)]
pub struct TextBuffer {
    bytes: Box<[u8]>,
    len: usize,
}

impl TextBuffer {
    /// Creates an empty buffer that can hold `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Maximum number of bytes the buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Number of bytes currently in use.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bytes that can still be inserted.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.len
    }

    /// The text as raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The text as a string slice.
    ///
    /// The bytes are validated on every call, so fetch the slice once per
    /// pass over the text.
    pub fn as_str(&self) -> &str {
        // Only whole codepoints of `&str` inputs are ever copied in.
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    /// Removes all text. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Clamps `range` to the buffer and orders its endpoints.
    fn clamp_range(&self, start: usize, end: usize) -> Range<usize> {
        let start = start.min(self.len);
        let end = end.min(self.len);
        start.min(end)..start.max(end)
    }

    /// Replaces the bytes between `start` and `end` with `insert`.
    ///
    /// The endpoints are clamped to the buffer and may be given in either order.
    /// If `insert` does not fit in the remaining capacity it is cut from the end,
    /// back to a codepoint boundary. When the cut text would still not fit in
    /// place of the deleted range, or there is nothing to do, the buffer is left
    /// untouched and `changed` is `false`.
    pub fn replace_range(&mut self, start: usize, end: usize, insert: &str) -> Splice {
        let range = self.clamp_range(start, end);
        let unchanged = Splice {
            changed: false,
            cursor: range.start,
        };

        let to_delete = range.len();
        let mut insert = insert.as_bytes();
        let requested_growth = insert.len().saturating_sub(to_delete);
        if requested_growth > self.remaining() {
            let excess = requested_growth - self.remaining();
            insert = &insert[..insert.len() - excess];
            insert = &insert[..truncate_partial_tail(insert)];
        }

        if insert.is_empty() && to_delete == 0 {
            return unchanged;
        }
        // The cut ate into the room freed by the deletion.
        if requested_growth > 0 && insert.len() < to_delete {
            return unchanged;
        }

        let new_len = self.len - to_delete + insert.len();
        let tail = range.end..self.len;
        let tail_dest = range.start + insert.len();
        self.bytes.copy_within(tail, tail_dest);
        self.bytes[range.start..tail_dest].copy_from_slice(insert);
        self.len = new_len;

        Splice {
            changed: true,
            cursor: tail_dest,
        }
    }

    /// Inserts `text` at `index`. See [`replace_range`](Self::replace_range).
    pub fn insert(&mut self, index: usize, text: &str) -> Splice {
        self.replace_range(index, index, text)
    }

    /// Replaces the whole text. See [`replace_range`](Self::replace_range).
    pub fn set_text(&mut self, text: &str) -> Splice {
        self.replace_range(0, self.len, text)
    }
}

impl Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("text", &self.as_str())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for TextBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
