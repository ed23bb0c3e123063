// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity record storage.

pub mod memory;

pub use memory::{ActivityStore, PlannedActivityStore};
