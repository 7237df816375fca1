// Copyright 2025 the Quill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod input;
mod movement;

pub use self::input::*;
pub use self::movement::*;
