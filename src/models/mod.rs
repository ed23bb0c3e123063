// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod planned;
pub mod stats;
pub mod track;

pub use activity::{
    Activity, ActivityId, ActivityType, ActivityUpdate, NewActivity, Segments, TrackActivityInput,
    UserId,
};
pub use planned::{NewPlannedActivity, PlannedActivity, PlannedActivityId};
pub use stats::{monthly_activities, MonthlyEntry, UserStats};
pub use track::{TrackPoint, TrackSegment, TrackSummary};
