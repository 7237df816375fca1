// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-codepoint UTF-8 encoding and decoding.
//!
//! Decoding never fails: malformed input resolves to [`INVALID_CODEPOINT`] with a
//! length of one byte, so a caller stepping through garbage always makes progress.

use core::fmt;
use core::ops::Deref;

/// The largest valid Unicode scalar value.
pub const MAX_CODEPOINT: u32 = 0x10_FFFF;

/// Sentinel returned when a byte sequence does not decode to a codepoint.
pub const INVALID_CODEPOINT: u32 = u32::MAX;

/// Classification of a single byte by its role in a UTF-8 sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ByteClass {
    /// `10xxxxxx`, the trailing bytes of a multi-byte sequence.
    Continuation,
    /// `0xxxxxxx`, a complete one-byte sequence.
    Ascii,
    /// `110xxxxx`, starts a two-byte sequence.
    Lead2,
    /// `1110xxxx`, starts a three-byte sequence.
    Lead3,
    /// `11110xxx`, starts a four-byte sequence.
    Lead4,
    /// `11111xxx`, never valid in UTF-8.
    Invalid,
}

impl ByteClass {
    /// Length of the sequence started by a byte of this class.
    ///
    /// Returns `None` for continuation and invalid bytes.
    pub const fn sequence_len(self) -> Option<usize> {
        match self {
            Self::Ascii => Some(1),
            Self::Lead2 => Some(2),
            Self::Lead3 => Some(3),
            Self::Lead4 => Some(4),
            Self::Continuation | Self::Invalid => None,
        }
    }
}

/// Maps the top five bits of a byte to its class.
const CLASS_BY_TOP5: [ByteClass; 32] = {
    use ByteClass::*;
    [
        Ascii, Ascii, Ascii, Ascii, Ascii, Ascii, Ascii, Ascii, //
        Ascii, Ascii, Ascii, Ascii, Ascii, Ascii, Ascii, Ascii, //
        Continuation, Continuation, Continuation, Continuation, //
        Continuation, Continuation, Continuation, Continuation, //
        Lead2, Lead2, Lead2, Lead2, //
        Lead3, Lead3, //
        Lead4, //
        Invalid,
    ]
};

/// Payload bits kept from the lead byte, indexed by sequence length.
const LEAD_PAYLOAD: [u8; 5] = [0, 0x7F, 0x1F, 0x0F, 0x07];

/// Classifies `byte` by the role it can play in a UTF-8 sequence.
#[inline]
pub const fn byte_class(byte: u8) -> ByteClass {
    CLASS_BY_TOP5[(byte >> 3) as usize]
}

/// A decoded codepoint together with the number of bytes it occupied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded codepoint, or [`INVALID_CODEPOINT`].
    pub codepoint: u32,
    /// Number of bytes consumed. Always at least one.
    pub len: usize,
}

impl Decoded {
    /// Result for malformed or missing input.
    pub const INVALID: Self = Self {
        codepoint: INVALID_CODEPOINT,
        len: 1,
    };

    /// Returns `true` if a codepoint was decoded.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.codepoint != INVALID_CODEPOINT
    }

    /// Converts the codepoint to a `char`, if it is a Unicode scalar value.
    #[inline]
    pub fn to_char(self) -> Option<char> {
        char::from_u32(self.codepoint)
    }
}

/// Decodes the codepoint at the start of `bytes`.
///
/// Returns [`Decoded::INVALID`] if `bytes` is empty, starts with a continuation
/// or invalid byte, is cut short, or holds a sequence beyond [`MAX_CODEPOINT`].
pub fn decode_forward(bytes: &[u8]) -> Decoded {
    let Some(&lead) = bytes.first() else {
        return Decoded::INVALID;
    };
    let Some(len) = byte_class(lead).sequence_len() else {
        return Decoded::INVALID;
    };
    let Some(sequence) = bytes.get(..len) else {
        return Decoded::INVALID;
    };

    let mut codepoint = u32::from(lead & LEAD_PAYLOAD[len]);
    for &byte in &sequence[1..] {
        if byte_class(byte) != ByteClass::Continuation {
            return Decoded::INVALID;
        }
        codepoint = (codepoint << 6) | u32::from(byte & 0x3F);
    }

    if codepoint > MAX_CODEPOINT {
        return Decoded::INVALID;
    }
    Decoded { codepoint, len }
}

/// Decodes the codepoint that ends at the end of `bytes`.
///
/// Looks back at most four bytes for the start of the sequence. If no start is
/// found, or the bytes after it are not exactly one well-formed sequence, the
/// result is [`Decoded::INVALID`], which steps back over a single byte.
pub fn decode_backward(bytes: &[u8]) -> Decoded {
    let window = bytes.len().saturating_sub(4);
    let Some(start) = bytes[window..]
        .iter()
        .rposition(|&byte| byte_class(byte) != ByteClass::Continuation)
        .map(|index| window + index)
    else {
        return Decoded::INVALID;
    };

    let tail = &bytes[start..];
    let decoded = decode_forward(tail);
    if decoded.is_valid() && decoded.len == tail.len() {
        decoded
    } else {
        Decoded::INVALID
    }
}

/// Returns how many leading bytes of `bytes` to keep so that it does not end
/// in the middle of a sequence.
///
/// Intended for text that was valid UTF-8 before being cut at an arbitrary
/// byte. At most three trailing bytes are dropped.
pub fn truncate_partial_tail(bytes: &[u8]) -> usize {
    let mut continuations = 0;
    for (index, &byte) in bytes.iter().enumerate().rev().take(4) {
        match byte_class(byte) {
            ByteClass::Continuation => continuations += 1,
            class => {
                return if class.sequence_len() == Some(continuations + 1) {
                    bytes.len()
                } else {
                    index
                };
            }
        }
    }
    bytes.len()
}

/// The UTF-8 encoding of a single codepoint.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Encoded {
    bytes: [u8; 4],
    len: u8,
}

impl Encoded {
    /// The encoded bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }
}

impl Deref for Encoded {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Encoded {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Encoded").field(&self.as_bytes()).finish()
    }
}

/// Encodes `codepoint` as UTF-8.
///
/// Values above [`MAX_CODEPOINT`] encode as a single `?`. Surrogates are
/// encoded like any other three-byte value.
#[expect(
    clippy::cast_possible_truncation,
    reason = "every value is masked to fit its byte before the cast"
)]
pub fn encode(codepoint: u32) -> Encoded {
    const CONT: u32 = 0x80;
    let (bytes, len) = match codepoint {
        0..=0x7F => ([codepoint as u8, 0, 0, 0], 1),
        0x80..=0x7FF => (
            [
                (0xC0 | (codepoint >> 6)) as u8,
                (CONT | (codepoint & 0x3F)) as u8,
                0,
                0,
            ],
            2,
        ),
        0x800..=0xFFFF => (
            [
                (0xE0 | (codepoint >> 12)) as u8,
                (CONT | ((codepoint >> 6) & 0x3F)) as u8,
                (CONT | (codepoint & 0x3F)) as u8,
                0,
            ],
            3,
        ),
        0x1_0000..=MAX_CODEPOINT => (
            [
                (0xF0 | (codepoint >> 18)) as u8,
                (CONT | ((codepoint >> 12) & 0x3F)) as u8,
                (CONT | ((codepoint >> 6) & 0x3F)) as u8,
                (CONT | (codepoint & 0x3F)) as u8,
            ],
            4,
        ),
        _ => ([b'?', 0, 0, 0], 1),
    };
    Encoded { bytes, len }
}
