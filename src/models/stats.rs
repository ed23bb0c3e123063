// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User statistics aggregates for dashboard-style queries.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Activity, ActivityType};

/// Aggregated statistics over a user's activities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    /// Total activities logged
    pub total_activities: u32,
    /// Total distance across all activities (meters)
    pub total_distance_meters: f64,
    /// Total duration across all activities (seconds)
    pub total_duration_secs: f64,

    /// Activity count per type (for pie charts)
    pub activities_by_type: HashMap<String, u32>,
    /// Total distance per type (meters)
    pub distance_by_type: HashMap<String, f64>,

    /// Activity count per month ("YYYY-MM" format)
    pub activities_by_month: HashMap<String, u32>,
    /// Activity count per year ("YYYY" format)
    pub activities_by_year: HashMap<String, u32>,
}

impl UserStats {
    pub fn from_activities(activities: &[Activity]) -> Self {
        let mut stats = Self::default();
        for activity in activities {
            stats.record(activity);
        }
        stats
    }

    fn record(&mut self, activity: &Activity) {
        self.total_activities += 1;
        self.total_distance_meters += activity.distance_total;
        self.total_duration_secs += activity.duration_total;

        let type_key = activity.activity_type.to_string();
        *self.activities_by_type.entry(type_key.clone()).or_insert(0) += 1;
        *self.distance_by_type.entry(type_key).or_insert(0.0) += activity.distance_total;

        let month_key = activity.date.format("%Y-%m").to_string();
        *self.activities_by_month.entry(month_key).or_insert(0) += 1;
        let year_key = activity.date.format("%Y").to_string();
        *self.activities_by_year.entry(year_key).or_insert(0) += 1;
    }
}

/// One activity's contribution to a monthly report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyEntry {
    pub date: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub duration_total: f64,
    pub distance_total: f64,
}

/// Activities in a given month, optionally restricted to one type.
pub fn monthly_activities(
    activities: &[Activity],
    year: i32,
    month: u32,
    activity_type: Option<ActivityType>,
) -> Vec<MonthlyEntry> {
    activities
        .iter()
        .filter(|a| a.date.year() == year && a.date.month() == month)
        .filter(|a| activity_type.is_none_or(|t| a.activity_type == t))
        .map(|a| MonthlyEntry {
            date: a.date,
            activity_type: a.activity_type,
            duration_total: a.duration_total,
            distance_total: a.distance_total,
        })
        .collect()
}
