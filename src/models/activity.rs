// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity model and its input/update types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::models::track::{TrackSegment, TrackSummary};

pub type UserId = u64;
pub type ActivityId = u64;

/// Kind of activity being logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    Running,
    Biking,
    Walking,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Running => "Running",
            ActivityType::Biking => "Biking",
            ActivityType::Walking => "Walking",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("type must be one of Running, Biking, Walking")]
pub struct ParseActivityTypeError;

impl FromStr for ActivityType {
    type Err = ParseActivityTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Running" => Ok(ActivityType::Running),
            "Biking" => Ok(ActivityType::Biking),
            "Walking" => Ok(ActivityType::Walking),
            _ => Err(ParseActivityTypeError),
        }
    }
}

/// Where an activity's geometry came from.
///
/// Manually logged activities carry no geometry; activities ingested from a
/// GPX file or a live recording carry their full segment data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Segments {
    #[default]
    Empty,
    Track(Vec<TrackSegment>),
}

impl Segments {
    /// Track-derived activities keep their date/duration/distance immutable
    /// through the generic update path.
    pub fn is_track_derived(&self) -> bool {
        matches!(self, Segments::Track(_))
    }

    pub fn summary(&self) -> TrackSummary {
        match self {
            Segments::Empty => TrackSummary::default(),
            Segments::Track(segments) => TrackSummary::of_segments(segments),
        }
    }
}

/// A logged activity owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub user_id: UserId,
    pub name: String,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub date: DateTime<Utc>,
    /// Total duration in seconds
    pub duration_total: f64,
    /// Total distance in meters
    pub distance_total: f64,
    pub comment: Option<String>,
    pub segments: Segments,
}

/// Input for manually logged activities.
///
/// Optional scalars default at creation: date to now, totals to 0.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    #[validate(length(min = 3, max = 256, message = "name must be between 3 and 256 characters"))]
    pub name: String,
    #[validate(length(max = 100, message = "city must be at most 100 characters"))]
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub date: Option<DateTime<Utc>>,
    #[validate(range(min = 0.0, message = "duration must be a non-negative number"))]
    pub duration_total: Option<f64>,
    #[validate(range(min = 0.0, message = "distance must be a non-negative number"))]
    pub distance_total: Option<f64>,
    pub comment: Option<String>,
}

/// Input for track-derived activities (GPX upload or finished recording).
/// Date and totals come from the track itself.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TrackActivityInput {
    #[validate(length(min = 3, max = 256, message = "name must be between 3 and 256 characters"))]
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub comment: Option<String>,
}

/// Partial update for an activity.
///
/// Each supplied field is applied only if it passes validation; invalid
/// fields are skipped. Track-derived activities never accept updates to
/// date, duration, or distance.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: Option<ActivityType>,
    pub date: Option<DateTime<Utc>>,
    pub duration_total: Option<f64>,
    pub distance_total: Option<f64>,
    pub comment: Option<String>,
}

impl ActivityUpdate {
    pub fn apply_to(&self, activity: &mut Activity, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            if (3..=256).contains(&name.chars().count()) {
                activity.name = name.clone();
            }
        }
        if let Some(city) = &self.city {
            if !city.is_empty() && city.chars().count() <= 100 {
                activity.city = Some(city.clone());
            }
        }
        if let Some(activity_type) = self.activity_type {
            activity.activity_type = activity_type;
        }
        if let Some(comment) = &self.comment {
            activity.comment = Some(comment.clone());
        }
        if activity.segments.is_track_derived() {
            return;
        }
        if let Some(date) = self.date {
            if date <= now {
                activity.date = date;
            }
        }
        if let Some(duration) = self.duration_total {
            if duration.is_finite() && duration >= 0.0 {
                activity.duration_total = duration;
            }
        }
        if let Some(distance) = self.distance_total {
            if distance.is_finite() && distance >= 0.0 {
                activity.distance_total = distance;
            }
        }
    }
}
