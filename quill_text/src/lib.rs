// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-capacity, UTF-8-safe text editing.
//!
//! This crate provides the text side of a single-line input field:
//!
//! - [`codec`]: decoding and encoding single codepoints, forwards and backwards,
//!   with a one-byte fallback for malformed input.
//! - [`TextBuffer`]: a byte buffer of fixed capacity whose range replacement never
//!   splits a codepoint, truncating insertions that do not fit.
//! - [`navigation`]: cursor movement by codepoints, words, or to the text ends.
//! - [`TextInput`]: a buffer with a cursor and a selection anchor.
//! - [`case`]: simple case folding for case-insensitive comparison.
//!
//! No operation in this crate allocates after construction, and none can fail:
//! out-of-range offsets are clamped and overflowing insertions are cut short.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use quill_text::{MoveUnit, Movement, TextInput};
//!
//! let mut input = TextInput::with_capacity(16);
//! input.write("Hello, world");
//! input.move_cursor(-1, Movement::by(MoveUnit::Word).selecting());
//! assert_eq!(input.selected_text(), "world");
//!
//! // Only nine bytes fit; the emoji is dropped rather than split.
//! input.write("świat 🌍");
//! assert_eq!(input.text(), "Hello, świat ");
//! ```
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

mod buffer;
mod editing;

pub mod case;
pub mod codec;
pub mod navigation;

pub use buffer::{Splice, TextBuffer};
pub use codec::{Decoded, Encoded, INVALID_CODEPOINT, MAX_CODEPOINT};
pub use editing::{Generation, MoveUnit, Movement, TextInput};
