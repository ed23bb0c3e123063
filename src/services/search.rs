// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Multi-criteria activity search.
//!
//! Raw string-typed query parameters are validated into typed criteria
//! first; matching never starts until every supplied criterion has passed.
//! Each active criterion produces a set of matching activity ids and the
//! result is the intersection of those sets, in the source list's order.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;

use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityId};

/// Raw search parameters, as they arrive from the outside world.
///
/// Every value is a string and must be parsed before use. Blank strings
/// count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQuery {
    pub search: Option<String>,
    pub specific_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub specific_distance: Option<String>,
    pub start_distance: Option<String>,
    pub end_distance: Option<String>,
    pub specific_duration: Option<String>,
    pub start_duration: Option<String>,
    pub end_duration: Option<String>,
}

/// Numeric criterion: exact value or inclusive range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueCriterion {
    Exact(f64),
    Range { start: f64, end: f64 },
}

/// Date criterion at day granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCriterion {
    Exact(NaiveDate),
    Range { start: NaiveDate, end: NaiveDate },
}

/// Validated, typed search criteria.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub text: Option<String>,
    pub date: Option<DateCriterion>,
    pub distance: Option<ValueCriterion>,
    pub duration: Option<ValueCriterion>,
}

impl SearchCriteria {
    /// Parse and validate a raw query.
    ///
    /// The exact form of a criterion takes priority over its range form
    /// when both are supplied; a range with only one bound fails
    /// validation.
    pub fn parse(query: &SearchQuery, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            text: non_blank(&query.search).map(str::to_owned),
            date: parse_date_criterion(
                non_blank(&query.specific_date),
                non_blank(&query.start_date),
                non_blank(&query.end_date),
                now,
            )?,
            distance: parse_value_criterion(
                non_blank(&query.specific_distance),
                non_blank(&query.start_distance),
                non_blank(&query.end_distance),
                "distance",
            )?,
            duration: parse_value_criterion(
                non_blank(&query.specific_duration),
                non_blank(&query.start_duration),
                non_blank(&query.end_duration),
                "duration",
            )?,
        })
    }

    /// No criteria were supplied at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.date.is_none()
            && self.distance.is_none()
            && self.duration.is_none()
    }
}

/// Filter activities by the intersection of all supplied criteria.
///
/// Zero supplied criteria yields an empty result by contract. Output
/// preserves the relative order of `activities`.
pub fn filter(activities: &[Activity], criteria: &SearchCriteria) -> Vec<Activity> {
    let mut match_sets: Vec<HashSet<ActivityId>> = Vec::new();

    if let Some(text) = &criteria.text {
        match_sets.push(collect_ids(activities, |a| matches_text(a, text)));
    }
    if let Some(date) = &criteria.date {
        match_sets.push(collect_ids(activities, |a| matches_date(a, date)));
    }
    if let Some(distance) = &criteria.distance {
        match_sets.push(collect_ids(activities, |a| {
            matches_value(a.distance_total, distance)
        }));
    }
    if let Some(duration) = &criteria.duration {
        match_sets.push(collect_ids(activities, |a| {
            matches_value(a.duration_total, duration)
        }));
    }

    let Some((first, rest)) = match_sets.split_first() else {
        return Vec::new();
    };
    let selected: HashSet<ActivityId> = first
        .iter()
        .copied()
        .filter(|id| rest.iter().all(|set| set.contains(id)))
        .collect();

    activities
        .iter()
        .filter(|a| selected.contains(&a.id))
        .cloned()
        .collect()
}

fn collect_ids<F>(activities: &[Activity], predicate: F) -> HashSet<ActivityId>
where
    F: Fn(&Activity) -> bool,
{
    activities
        .iter()
        .filter(|a| predicate(a))
        .map(|a| a.id)
        .collect()
}

/// Case-insensitive substring match across name, type, comment, and city.
fn matches_text(activity: &Activity, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&needle);
    contains(&activity.name)
        || contains(activity.activity_type.as_str())
        || activity.comment.as_deref().is_some_and(|c| contains(c))
        || activity.city.as_deref().is_some_and(|c| contains(c))
}

/// Day-granularity comparison: time-of-day is dropped before comparing.
fn matches_date(activity: &Activity, criterion: &DateCriterion) -> bool {
    let day = activity.date.date_naive();
    match criterion {
        DateCriterion::Exact(date) => day == *date,
        DateCriterion::Range { start, end } => day >= *start && day <= *end,
    }
}

fn matches_value(value: f64, criterion: &ValueCriterion) -> bool {
    match criterion {
        // Exact numeric comparison, in the stored field's own unit
        ValueCriterion::Exact(expected) => value == *expected,
        ValueCriterion::Range { start, end } => value >= *start && value <= *end,
    }
}

fn non_blank(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_value_criterion(
    specific: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    what: &str,
) -> Result<Option<ValueCriterion>> {
    if let Some(raw) = specific {
        return Ok(Some(ValueCriterion::Exact(parse_number(raw, what)?)));
    }
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(ValueCriterion::Range {
            start: parse_number(start, what)?,
            end: parse_number(end, what)?,
        })),
        (None, None) => Ok(None),
        _ => Err(AppError::validation(format!(
            "both start and end {what} bounds must be provided"
        ))),
    }
}

fn parse_number(raw: &str, what: &str) -> Result<f64> {
    let invalid =
        || AppError::validation(format!("{what} must be a finite non-negative number"));
    let value: f64 = raw.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

fn parse_date_criterion(
    specific: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<DateCriterion>> {
    if let Some(raw) = specific {
        return Ok(Some(DateCriterion::Exact(parse_past_date(raw, now)?)));
    }
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(DateCriterion::Range {
            start: parse_past_date(start, now)?,
            end: parse_past_date(end, now)?,
        })),
        (None, None) => Ok(None),
        _ => Err(AppError::validation(
            "both start and end dates must be provided",
        )),
    }
}

fn parse_past_date(raw: &str, now: DateTime<Utc>) -> Result<NaiveDate> {
    let parsed = parse_date(raw)
        .ok_or_else(|| AppError::validation(format!("could not parse date: {raw}")))?;
    if parsed > now {
        return Err(AppError::validation("date must not be in the future"));
    }
    Ok(parsed.date_naive())
}

/// Accepts RFC3339 timestamps or bare `YYYY-MM-DD` dates (taken as
/// midnight UTC).
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}
