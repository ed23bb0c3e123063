// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Planned activity lifecycle.
//!
//! Planned activities are schedule entries: creation accepts future
//! dates, listing works over a one-week window, and a plan can be
//! linked to the logged activity that fulfilled it.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{
    ActivityId, ActivityType, NewPlannedActivity, PlannedActivity, PlannedActivityId, UserId,
};
use crate::store::{ActivityStore, PlannedActivityStore};

#[derive(Clone)]
pub struct PlannedActivityManager {
    store: Arc<PlannedActivityStore>,
    activities: Arc<ActivityStore>,
}

impl PlannedActivityManager {
    pub fn new(store: Arc<PlannedActivityStore>, activities: Arc<ActivityStore>) -> Self {
        Self { store, activities }
    }

    /// Schedule a new activity. Future dates are allowed here, unlike
    /// logged activities.
    pub fn create(&self, user_id: UserId, input: NewPlannedActivity) -> Result<PlannedActivity> {
        validate(&input)?;

        let planned = PlannedActivity {
            id: self.store.allocate_id(),
            user_id,
            name: input.effective_name(),
            activity_type: input.activity_type,
            date: input.date,
            duration_secs: input.duration_secs,
            comment: input.comment,
            activity_id: None,
        };
        self.store.insert(planned.clone());
        tracing::info!(user_id, planned_id = planned.id, "Planned activity created");
        Ok(planned)
    }

    pub fn get(&self, user_id: UserId, planned_id: PlannedActivityId) -> Result<PlannedActivity> {
        self.store
            .get(user_id, planned_id)
            .ok_or_else(|| AppError::not_found(format!("planned activity {planned_id}")))
    }

    /// Planned activities in the week starting at `from` (inclusive on
    /// both ends), optionally restricted to one type.
    pub fn list_week(
        &self,
        user_id: UserId,
        from: DateTime<Utc>,
        activity_type: Option<ActivityType>,
    ) -> Vec<PlannedActivity> {
        let end = from + Duration::days(7);
        self.store
            .list(user_id)
            .into_iter()
            .filter(|p| p.date >= from && p.date <= end)
            .filter(|p| activity_type.is_none_or(|t| p.activity_type == t))
            .collect()
    }

    /// Replace a plan's schedulable fields. The activity link, if any,
    /// is kept.
    pub fn update(
        &self,
        user_id: UserId,
        planned_id: PlannedActivityId,
        input: NewPlannedActivity,
    ) -> Result<PlannedActivity> {
        validate(&input)?;
        self.store
            .with_planned_mut(user_id, planned_id, |planned| {
                planned.name = input.effective_name();
                planned.activity_type = input.activity_type;
                planned.date = input.date;
                planned.duration_secs = input.duration_secs;
                planned.comment = input.comment.clone();
            })
            .ok_or_else(|| AppError::not_found(format!("planned activity {planned_id}")))
    }

    /// Link a plan to the logged activity that fulfilled it. Both records
    /// must exist for the same user.
    pub fn link_activity(
        &self,
        user_id: UserId,
        planned_id: PlannedActivityId,
        activity_id: ActivityId,
    ) -> Result<PlannedActivity> {
        if self.activities.get(user_id, activity_id).is_none() {
            return Err(AppError::not_found(format!("activity {activity_id}")));
        }
        let linked = self
            .store
            .with_planned_mut(user_id, planned_id, |planned| {
                planned.activity_id = Some(activity_id);
            })
            .ok_or_else(|| AppError::not_found(format!("planned activity {planned_id}")))?;
        tracing::info!(user_id, planned_id, activity_id, "Planned activity linked");
        Ok(linked)
    }

    pub fn delete(&self, user_id: UserId, planned_id: PlannedActivityId) -> Result<()> {
        if !self.store.delete(user_id, planned_id) {
            return Err(AppError::not_found(format!("planned activity {planned_id}")));
        }
        tracing::info!(user_id, planned_id, "Planned activity deleted");
        Ok(())
    }
}

fn validate(input: &NewPlannedActivity) -> Result<()> {
    input
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    if !input.duration_secs.is_finite() {
        return Err(AppError::validation("duration must be a non-negative number"));
    }
    Ok(())
}
