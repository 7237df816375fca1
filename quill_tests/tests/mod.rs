// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `quill_text` and `quill_draw`.
//!
//! - The `util` module contains a synthetic font and helpers shared by different tests.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so the shared helpers are compiled once.
//! - For test naming, put the "topic" of the test at the start of the name, for example
//!   `store_evicts_least_recently_used` rather than `evicts_least_recently_used_store`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod field;
mod util;
