// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tracklog: activity logging for a fitness tracker.
//!
//! This crate provides the activity core of a fitness-tracking
//! application: GPX ingestion, manually logged and live-recorded
//! activities, multi-criteria search, and per-user statistics. It has no
//! network surface; an embedding application supplies routing, auth, and
//! durable storage.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use config::Config;
use services::{ActivityManager, PlannedActivityManager, RecordingService};
use store::{ActivityStore, PlannedActivityStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<ActivityStore>,
    pub activities: ActivityManager,
    pub planned: PlannedActivityManager,
    pub recording: RecordingService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = Arc::new(ActivityStore::new());
        let activities = ActivityManager::new(Arc::clone(&store), config.gpx_max_bytes);
        let planned = PlannedActivityManager::new(
            Arc::new(PlannedActivityStore::new()),
            Arc::clone(&store),
        );
        let recording = RecordingService::new(
            Arc::clone(&store),
            Duration::from_secs(config.recording_timeout_secs),
        );
        Self {
            config,
            store,
            activities,
            planned,
            recording,
        }
    }
}
