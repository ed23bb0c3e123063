// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity lifecycle orchestration.
//!
//! Handles the core workflow: validate input, derive defaults and totals,
//! and read/write the activity store. Track-derived activities get their
//! date and totals from the decoded track; manual activities get them from
//! the caller.

use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{
    monthly_activities, Activity, ActivityId, ActivityType, ActivityUpdate, MonthlyEntry,
    NewActivity, Segments, TrackActivityInput, UserId, UserStats,
};
use crate::services::gpx::{self, DecodedTrack};
use crate::services::search::{self, SearchCriteria, SearchQuery};
use crate::store::ActivityStore;

#[derive(Clone)]
pub struct ActivityManager {
    store: Arc<ActivityStore>,
    gpx_max_bytes: u64,
}

impl ActivityManager {
    pub fn new(store: Arc<ActivityStore>, gpx_max_bytes: u64) -> Self {
        Self {
            store,
            gpx_max_bytes,
        }
    }

    /// Create a manually logged activity.
    pub fn create_manual(&self, user_id: UserId, input: NewActivity) -> Result<Activity> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        ensure_finite("duration", input.duration_total)?;
        ensure_finite("distance", input.distance_total)?;

        let now = Utc::now();
        let date = input.date.unwrap_or(now);
        ensure_not_future(date, now)?;

        let activity = Activity {
            id: self.store.allocate_id(),
            user_id,
            name: input.name,
            city: input.city,
            activity_type: input.activity_type,
            date,
            duration_total: input.duration_total.unwrap_or(0.0),
            distance_total: input.distance_total.unwrap_or(0.0),
            comment: input.comment,
            segments: Segments::Empty,
        };
        self.store.insert(activity.clone());
        tracing::info!(user_id, activity_id = activity.id, "Manual activity created");
        Ok(activity)
    }

    /// Create an activity from an uploaded GPX file.
    ///
    /// The file is removed whether or not ingestion succeeds.
    pub fn create_from_gpx(
        &self,
        user_id: UserId,
        input: TrackActivityInput,
        path: &Path,
    ) -> Result<Activity> {
        let decoded = gpx::ingest_file(path, self.gpx_max_bytes)?;
        self.create_from_track(user_id, input, decoded)
    }

    /// Create an activity from an already-decoded track.
    pub fn create_from_track(
        &self,
        user_id: UserId,
        input: TrackActivityInput,
        decoded: DecodedTrack,
    ) -> Result<Activity> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let now = Utc::now();
        let date = decoded.date.unwrap_or(now);
        ensure_not_future(date, now)?;

        let activity = Activity {
            id: self.store.allocate_id(),
            user_id,
            name: input.name,
            city: None,
            activity_type: input.activity_type,
            date,
            duration_total: decoded.summary.duration_secs,
            distance_total: decoded.summary.distance_meters,
            comment: input.comment,
            segments: Segments::Track(decoded.segments),
        };
        self.store.insert(activity.clone());
        tracing::info!(
            user_id,
            activity_id = activity.id,
            distance_meters = activity.distance_total,
            duration_secs = activity.duration_total,
            "Track activity created"
        );
        Ok(activity)
    }

    /// All of a user's activities, in insertion order.
    pub fn list(&self, user_id: UserId) -> Vec<Activity> {
        self.store.list(user_id)
    }

    pub fn get(&self, user_id: UserId, activity_id: ActivityId) -> Result<Activity> {
        self.store
            .get(user_id, activity_id)
            .ok_or_else(|| AppError::not_found(format!("activity {activity_id}")))
    }

    /// Apply a partial update; invalid fields are skipped, and
    /// track-derived activities keep their date and totals.
    pub fn update(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
        update: &ActivityUpdate,
    ) -> Result<Activity> {
        self.store
            .update(user_id, activity_id, update, Utc::now())
            .ok_or_else(|| AppError::not_found(format!("activity {activity_id}")))
    }

    pub fn delete(&self, user_id: UserId, activity_id: ActivityId) -> Result<()> {
        if !self.store.delete(user_id, activity_id) {
            return Err(AppError::not_found(format!("activity {activity_id}")));
        }
        tracing::info!(user_id, activity_id, "Activity deleted");
        Ok(())
    }

    /// Multi-criteria search over a user's activities.
    ///
    /// Zero supplied criteria yields an empty result by contract.
    pub fn search(&self, user_id: UserId, query: &SearchQuery) -> Result<Vec<Activity>> {
        let criteria = SearchCriteria::parse(query, Utc::now())?;
        Ok(search::filter(&self.store.list(user_id), &criteria))
    }

    pub fn user_stats(&self, user_id: UserId) -> UserStats {
        UserStats::from_activities(&self.store.list(user_id))
    }

    pub fn monthly(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
        activity_type: Option<ActivityType>,
    ) -> Vec<MonthlyEntry> {
        monthly_activities(&self.store.list(user_id), year, month, activity_type)
    }
}

fn ensure_not_future(date: DateTime<Utc>, now: DateTime<Utc>) -> Result<()> {
    if date > now {
        return Err(AppError::validation("date must not be in the future"));
    }
    Ok(())
}

fn ensure_finite(what: &str, value: Option<f64>) -> Result<()> {
    if value.is_some_and(|v| !v.is_finite()) {
        return Err(AppError::validation(format!(
            "{what} must be a non-negative number"
        )));
    }
    Ok(())
}
