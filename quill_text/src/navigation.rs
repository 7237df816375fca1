// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor movement over UTF-8 text.
//!
//! All functions take a byte offset and return a new byte offset. Offsets past
//! the end of the text are clamped to its length; movement stops at either end.

use crate::codec::{decode_backward, decode_forward};

/// Returns `true` for codepoints that separate words.
///
/// These are ASCII whitespace (space, backspace through carriage return) and
/// ASCII punctuation.
pub fn is_word_separator(codepoint: u32) -> bool {
    matches!(
        codepoint,
        0x20 | 0x08..=0x0D
            | 0x21..=0x2F // ! through /
            | 0x3A..=0x40 // : through @
            | 0x5B..=0x5E // [ through ^
            | 0x7B..=0x7E // { through ~
    )
}

/// Moves `pos` by `count` codepoints, forwards when positive.
pub fn move_by_codepoints(text: &[u8], pos: usize, count: isize) -> usize {
    let mut pos = pos.min(text.len());
    if count >= 0 {
        for _ in 0..count.unsigned_abs() {
            let rest = &text[pos..];
            if rest.is_empty() {
                break;
            }
            pos += decode_forward(rest).len;
        }
    } else {
        for _ in 0..count.unsigned_abs() {
            let before = &text[..pos];
            if before.is_empty() {
                break;
            }
            pos -= decode_backward(before).len;
        }
    }
    pos
}

/// Moves `pos` by `count` words, forwards when positive.
///
/// Moving forwards skips any separators, then one word, then the separators
/// after it, so the cursor lands on the start of the following word (or the end
/// of the text). Moving backwards skips separators and then one word, landing
/// on the start of that word.
pub fn move_by_words(text: &[u8], pos: usize, count: isize) -> usize {
    let mut pos = pos.min(text.len());
    let mut remaining = count.unsigned_abs();
    let mut in_separators = true;

    if count > 0 {
        while pos < text.len() {
            let decoded = decode_forward(&text[pos..]);
            if is_word_separator(decoded.codepoint) {
                if !in_separators {
                    remaining -= 1;
                    in_separators = true;
                }
            } else {
                if remaining == 0 {
                    break;
                }
                in_separators = false;
            }
            pos += decoded.len;
        }
    } else if count < 0 {
        while pos > 0 {
            let decoded = decode_backward(&text[..pos]);
            if is_word_separator(decoded.codepoint) {
                if !in_separators {
                    remaining -= 1;
                    if remaining == 0 {
                        break;
                    }
                    in_separators = true;
                }
            } else {
                in_separators = false;
            }
            pos -= decoded.len;
        }
    }
    pos
}

/// Returns the start or the end of the text.
#[inline]
pub fn move_to_extent(text: &[u8], forward: bool) -> usize {
    if forward { text.len() } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_moves_from_reference_table() {
        let cases: &[(&str, usize, isize, usize)] = &[
            ("--Ax-B C", 0, 2, 7),
            ("Ab   Cd   Ef", 2, 1, 10),
            ("underflow", 0, 1, 9),
            ("overflow", 100, 1, 8),
            ("move overflow", 1, 100, 13),
            (" a b c ", 5, -2, 1),
            ("abc\t d+ef- \n-ghi", 11, -1, 7),
        ];
        for &(text, pos, count, expected) in cases {
            assert_eq!(
                move_by_words(text.as_bytes(), pos, count),
                expected,
                "{text:?} from {pos} by {count} words"
            );
        }
    }

    #[test]
    fn word_moves_stop_at_text_ends() {
        let text = b"Ab   Cd   Ef";
        assert_eq!(move_by_words(text, 10, 1), 12);
        assert_eq!(move_by_words(text, 12, 1), 12);
        assert_eq!(move_by_words(text, 10, -1), 5);
        assert_eq!(move_by_words(text, 5, -1), 0);
        assert_eq!(move_by_words(text, 0, -1), 0);
        assert_eq!(move_by_words(text, 4, 0), 4);
    }

    #[test]
    fn word_moves_treat_non_ascii_as_word_characters() {
        let text = "żółw, łabędź".as_bytes();
        let after_first = move_by_words(text, 0, 1);
        assert_eq!(&text[after_first..], "łabędź".as_bytes());
        assert_eq!(move_by_words(text, text.len(), -1), after_first);
    }

    #[test]
    fn codepoint_moves() {
        let text = "ał🦢b".as_bytes();
        assert_eq!(move_by_codepoints(text, 0, 1), 1);
        assert_eq!(move_by_codepoints(text, 0, 2), 3);
        assert_eq!(move_by_codepoints(text, 0, 3), 7);
        assert_eq!(move_by_codepoints(text, 0, 100), 8);
        assert_eq!(move_by_codepoints(text, 8, -1), 7);
        assert_eq!(move_by_codepoints(text, 7, -1), 3);
        assert_eq!(move_by_codepoints(text, 8, -100), 0);
        assert_eq!(move_by_codepoints(text, 3, 0), 3);
    }

    #[test]
    fn codepoint_moves_clamp_start() {
        let text = b"abc";
        assert_eq!(move_by_codepoints(text, 50, 0), 3);
        assert_eq!(move_by_codepoints(text, 50, 1), 3);
        assert_eq!(move_by_codepoints(text, 50, -1), 2);
    }

    #[test]
    fn codepoint_moves_through_garbage() {
        let text = b"a\xFF\x80\xC5b";
        let mut pos = 0;
        let mut steps = 0;
        while pos < text.len() {
            pos = move_by_codepoints(text, pos, 1);
            steps += 1;
        }
        assert_eq!(steps, 5, "each malformed byte is one step");
        while pos > 0 {
            pos = move_by_codepoints(text, pos, -1);
            steps -= 1;
        }
        assert_eq!(steps, 0, "backwards takes as many steps");
    }

    #[test]
    fn separators() {
        for ch in [' ', '\t', '\n', '\r', '!', '/', ':', '@', '[', '^', '{', '~', '-'] {
            assert!(is_word_separator(u32::from(ch)), "{ch:?}");
        }
        for ch in ['a', 'Z', '0', '9', '_', '`', 'ł', '\u{A0}'] {
            assert!(!is_word_separator(u32::from(ch)), "{ch:?}");
        }
    }

    #[test]
    fn extent() {
        assert_eq!(move_to_extent(b"hello", true), 5);
        assert_eq!(move_to_extent(b"hello", false), 0);
    }
}
