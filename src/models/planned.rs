// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Planned (scheduled) activities.
//!
//! A planned activity is a forward-looking entry: unlike a logged
//! activity its date may lie in the future, and it carries no track
//! data. Once the plan has been carried out it can be linked to the
//! resulting activity record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::activity::{ActivityId, ActivityType, UserId};

pub type PlannedActivityId = u64;

/// A scheduled activity owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedActivity {
    pub id: PlannedActivityId,
    pub user_id: UserId,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub date: DateTime<Utc>,
    /// Planned duration in seconds
    pub duration_secs: f64,
    pub comment: Option<String>,
    /// The logged activity this plan was fulfilled by, once linked
    pub activity_id: Option<ActivityId>,
}

/// Input for creating or replacing a planned activity.
///
/// A missing or blank name defaults to the activity type's own name.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPlannedActivity {
    #[validate(length(max = 256, message = "name must be at most 256 characters"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub date: DateTime<Utc>,
    #[validate(range(min = 0.0, message = "duration must be a non-negative number"))]
    pub duration_secs: f64,
    pub comment: Option<String>,
}

impl NewPlannedActivity {
    pub fn effective_name(&self) -> String {
        match self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => self.activity_type.as_str().to_string(),
        }
    }
}
