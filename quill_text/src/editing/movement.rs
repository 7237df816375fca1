// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The distance covered by a single cursor step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MoveUnit {
    /// One codepoint (plain arrow keys).
    #[default]
    Codepoint,
    /// One word (arrow keys with a word modifier, usually Ctrl or Alt).
    Word,
    /// All the way to the start or end of the text (Home and End).
    Extent,
}

/// How [`TextInput::move_cursor`](super::TextInput::move_cursor) moves the cursor.
///
/// The default value is a plain codepoint step that collapses the selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Movement {
    /// The unit of movement.
    pub unit: MoveUnit,
    /// Keep the selection anchor in place, extending the selection.
    pub select: bool,
}

impl Movement {
    /// A step of the given unit that collapses the selection.
    pub const fn by(unit: MoveUnit) -> Self {
        Self {
            unit,
            select: false,
        }
    }

    /// The same movement, but extending the selection.
    pub const fn selecting(self) -> Self {
        Self {
            select: true,
            ..self
        }
    }

    /// Returns `true` for an unmodified codepoint step.
    ///
    /// With an active selection, such a step collapses the selection instead of
    /// moving.
    pub fn is_plain(self) -> bool {
        self == Self::default()
    }
}

impl From<MoveUnit> for Movement {
    fn from(unit: MoveUnit) -> Self {
        Self::by(unit)
    }
}
