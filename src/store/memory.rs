// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory activity store.
//!
//! A flat collection of activity records per owning user. Insertion order
//! is preserved per user; search and listing rely on it.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::{
    Activity, ActivityId, ActivityUpdate, PlannedActivity, PlannedActivityId, UserId,
};

pub struct ActivityStore {
    activities: DashMap<UserId, Vec<Activity>>,
    next_id: AtomicU64,
}

impl Default for ActivityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityStore {
    pub fn new() -> Self {
        Self {
            activities: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Hand out the next activity id.
    pub fn allocate_id(&self) -> ActivityId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn insert(&self, activity: Activity) {
        self.activities
            .entry(activity.user_id)
            .or_default()
            .push(activity);
    }

    /// All of a user's activities, in insertion order.
    pub fn list(&self, user_id: UserId) -> Vec<Activity> {
        self.activities
            .get(&user_id)
            .map(|list| list.clone())
            .unwrap_or_default()
    }

    pub fn get(&self, user_id: UserId, activity_id: ActivityId) -> Option<Activity> {
        self.activities
            .get(&user_id)?
            .iter()
            .find(|a| a.id == activity_id)
            .cloned()
    }

    /// Run a closure against one activity and return the updated record.
    pub fn with_activity_mut<F>(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
        f: F,
    ) -> Option<Activity>
    where
        F: FnOnce(&mut Activity),
    {
        let mut list = self.activities.get_mut(&user_id)?;
        let activity = list.iter_mut().find(|a| a.id == activity_id)?;
        f(activity);
        Some(activity.clone())
    }

    /// Apply a partial update. Returns the updated record, or `None` when
    /// the activity does not exist for that user.
    pub fn update(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
        update: &ActivityUpdate,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Option<Activity> {
        self.with_activity_mut(user_id, activity_id, |activity| {
            update.apply_to(activity, now);
        })
    }

    /// Remove an activity. Returns whether a record was removed.
    pub fn delete(&self, user_id: UserId, activity_id: ActivityId) -> bool {
        let Some(mut list) = self.activities.get_mut(&user_id) else {
            return false;
        };
        let before = list.len();
        list.retain(|a| a.id != activity_id);
        before != list.len()
    }
}

/// In-memory store for planned (scheduled) activities, per owning user.
pub struct PlannedActivityStore {
    planned: DashMap<UserId, Vec<PlannedActivity>>,
    next_id: AtomicU64,
}

impl Default for PlannedActivityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlannedActivityStore {
    pub fn new() -> Self {
        Self {
            planned: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn allocate_id(&self) -> PlannedActivityId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn insert(&self, planned: PlannedActivity) {
        self.planned
            .entry(planned.user_id)
            .or_default()
            .push(planned);
    }

    /// All of a user's planned activities, in insertion order.
    pub fn list(&self, user_id: UserId) -> Vec<PlannedActivity> {
        self.planned
            .get(&user_id)
            .map(|list| list.clone())
            .unwrap_or_default()
    }

    pub fn get(&self, user_id: UserId, planned_id: PlannedActivityId) -> Option<PlannedActivity> {
        self.planned
            .get(&user_id)?
            .iter()
            .find(|p| p.id == planned_id)
            .cloned()
    }

    /// Run a closure against one planned activity and return the updated
    /// record.
    pub fn with_planned_mut<F>(
        &self,
        user_id: UserId,
        planned_id: PlannedActivityId,
        f: F,
    ) -> Option<PlannedActivity>
    where
        F: FnOnce(&mut PlannedActivity),
    {
        let mut list = self.planned.get_mut(&user_id)?;
        let planned = list.iter_mut().find(|p| p.id == planned_id)?;
        f(planned);
        Some(planned.clone())
    }

    /// Remove a planned activity. Returns whether a record was removed.
    pub fn delete(&self, user_id: UserId, planned_id: PlannedActivityId) -> bool {
        let Some(mut list) = self.planned.get_mut(&user_id) else {
            return false;
        };
        let before = list.len();
        list.retain(|p| p.id != planned_id);
        before != list.len()
    }
}
