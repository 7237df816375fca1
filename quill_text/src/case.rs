// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simple, table-free case folding.
//!
//! Covers Latin-1, Latin Extended-A/B, Greek and Cyrillic. This is a one-to-one
//! codepoint mapping; it does not implement full Unicode case folding.

use crate::codec::decode_forward;

/// Maps an upper-case codepoint to its lower-case form.
///
/// Codepoints without a known lower-case form are returned unchanged.
pub fn codepoint_to_lower(codepoint: u32) -> u32 {
    match codepoint {
        0x0041..=0x005A
        | 0x00C0..=0x00D6
        | 0x00D8..=0x00DE
        | 0x0391..=0x03A1
        | 0x03A3..=0x03AB
        | 0x0410..=0x042F => codepoint + 32,
        0x0400..=0x040F => codepoint + 80,
        0x0100..=0x012F
        | 0x0132..=0x0137
        | 0x014A..=0x0177
        | 0x0182..=0x0185
        | 0x01A0..=0x01A5
        | 0x01DE..=0x01EF
        | 0x01F8..=0x021F
        | 0x0222..=0x0233
        | 0x0246..=0x024F
        | 0x03D8..=0x03EF
        | 0x0460..=0x0481
        | 0x048A..=0x04FF => codepoint | 1,
        0x0139..=0x0148
        | 0x0179..=0x017E
        | 0x01AF..=0x01B0
        | 0x01B3..=0x01B6
        | 0x01CD..=0x01DC => (codepoint + 1) & !1,
        0x0178 => 0x00FF,
        0x0243 => 0x0180,
        0x018E => 0x01DD,
        0x023D => 0x019A,
        0x0220 => 0x019E,
        0x01B7 => 0x0292,
        0x01C4 => 0x01C6,
        0x01C7 => 0x01C9,
        0x01CA => 0x01CC,
        0x01F1 => 0x01F3,
        0x01F7 => 0x01BF,
        0x0187 => 0x0188,
        0x018B => 0x018C,
        0x0191 => 0x0192,
        0x0198 => 0x0199,
        0x01A7 => 0x01A8,
        0x01AC => 0x01AD,
        0x01B8 => 0x01B9,
        0x01BC => 0x01BD,
        0x01F4 => 0x01F5,
        0x023B => 0x023C,
        0x0241 => 0x0242,
        0x03FD => 0x037B,
        0x03FE => 0x037C,
        0x03FF => 0x037D,
        0x037F => 0x03F3,
        0x0386 => 0x03AC,
        0x0388 => 0x03AD,
        0x0389 => 0x03AE,
        0x038A => 0x03AF,
        0x038C => 0x03CC,
        0x038E => 0x03CD,
        0x038F => 0x03CE,
        0x0370 => 0x0371,
        0x0372 => 0x0373,
        0x0376 => 0x0377,
        0x03F4 => 0x03B8,
        0x03CF => 0x03D7,
        0x03F9 => 0x03F2,
        0x03F7 => 0x03F8,
        0x03FA => 0x03FB,
        _ => codepoint,
    }
}

/// Compares two UTF-8 byte strings codepoint by codepoint, ignoring case.
///
/// Malformed bytes compare as [`INVALID_CODEPOINT`](crate::INVALID_CODEPOINT),
/// so two strings with garbage in the same places still compare equal.
pub fn eq_ignore_case(a: impl AsRef<[u8]>, b: impl AsRef<[u8]>) -> bool {
    let (mut a, mut b) = (a.as_ref(), b.as_ref());
    loop {
        if a.is_empty() || b.is_empty() {
            return a.len() == b.len();
        }
        let (lhs, rhs) = (decode_forward(a), decode_forward(b));
        if codepoint_to_lower(lhs.codepoint) != codepoint_to_lower(rhs.codepoint) {
            return false;
        }
        a = &a[lhs.len..];
        b = &b[rhs.len..];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowers_common_scripts() {
        assert_eq!(codepoint_to_lower(u32::from('A')), u32::from('a'));
        assert_eq!(codepoint_to_lower(u32::from('Ł')), u32::from('ł'));
        assert_eq!(codepoint_to_lower(u32::from('Ę')), u32::from('ę'));
        assert_eq!(codepoint_to_lower(u32::from('Ź')), u32::from('ź'));
        assert_eq!(codepoint_to_lower(u32::from('Ÿ')), u32::from('ÿ'));
        assert_eq!(codepoint_to_lower(u32::from('Ω')), u32::from('ω'));
        assert_eq!(codepoint_to_lower(u32::from('Ж')), u32::from('ж'));
        assert_eq!(codepoint_to_lower(u32::from('Ё')), u32::from('ё'));
    }

    #[test]
    fn leaves_other_codepoints_alone() {
        for ch in ['a', '1', '-', 'ł', '漢', '🦢'] {
            assert_eq!(codepoint_to_lower(u32::from(ch)), u32::from(ch), "{ch:?}");
        }
    }

    #[test]
    fn case_insensitive_equality() {
        assert!(eq_ignore_case("Łabędzie", "Łabędzie"));
        assert!(eq_ignore_case("ŁabędZIE", "łabędzie"));
        assert!(!eq_ignore_case("Abc2", "Abc"));
        assert!(!eq_ignore_case("Abc", "Abd"));
        assert!(eq_ignore_case("", ""));
        assert!(eq_ignore_case(b"a\xFFb", b"A\xFFB"));
    }
}
