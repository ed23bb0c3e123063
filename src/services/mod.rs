// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business logic services.

pub mod activity;
pub mod gpx;
pub mod planned;
pub mod recording;
pub mod search;

pub use activity::ActivityManager;
pub use gpx::{DecodeError, DecodedTrack};
pub use planned::PlannedActivityManager;
pub use recording::{RecordingService, SessionId};
pub use search::{SearchCriteria, SearchQuery};
