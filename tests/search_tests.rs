// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use chrono::{DateTime, Utc};
use common::make_activity;
use tracklog::error::AppError;
use tracklog::models::{Activity, ActivityType};
use tracklog::services::search::{filter, SearchCriteria, SearchQuery};

fn now() -> DateTime<Utc> {
    "2024-06-01T12:00:00Z".parse().unwrap()
}

fn criteria(query: &SearchQuery) -> SearchCriteria {
    SearchCriteria::parse(query, now()).expect("criteria should validate")
}

fn sample_activities() -> Vec<Activity> {
    let mut a = make_activity(1, "Morning Run", 7500.0, 1800.0, "2022-04-13T08:00:00Z");
    a.city = Some("Montreal".to_string());
    let mut b = make_activity(2, "Evening Run", 7500.0, 2400.0, "2022-04-20T19:00:00Z");
    b.comment = Some("felt good".to_string());
    let mut c = make_activity(3, "Lunch Ride", 20000.0, 3600.0, "2022-05-02T12:00:00Z");
    c.activity_type = ActivityType::Biking;
    vec![a, b, c]
}

#[test]
fn test_and_semantics_across_criteria() {
    let activities = sample_activities();
    let query = SearchQuery {
        search: Some("Morning".to_string()),
        specific_distance: Some("7500".to_string()),
        ..Default::default()
    };
    let result = filter(&activities, &criteria(&query));
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 1);
}

#[test]
fn test_zero_criteria_yields_empty_result() {
    let activities = sample_activities();
    let query = SearchQuery::default();
    let parsed = criteria(&query);
    assert!(parsed.is_empty());
    assert!(filter(&activities, &parsed).is_empty());
}

#[test]
fn test_single_criterion_is_its_own_result() {
    let activities = sample_activities();
    let query = SearchQuery {
        specific_distance: Some("7500".to_string()),
        ..Default::default()
    };
    let result = filter(&activities, &criteria(&query));
    assert_eq!(result.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_text_matches_all_fields_case_insensitively() {
    let activities = sample_activities();
    for (needle, expected) in [
        ("morning", vec![1]),  // name
        ("biking", vec![3]),   // type
        ("FELT", vec![2]),     // comment
        ("montre", vec![1]),   // city
        ("run", vec![1, 2]),   // two names match
    ] {
        let query = SearchQuery {
            search: Some(needle.to_string()),
            ..Default::default()
        };
        let ids: Vec<u64> = filter(&activities, &criteria(&query))
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, expected, "needle {needle}");
    }
}

#[test]
fn test_date_range_inclusion_and_exclusion() {
    let activities = sample_activities();

    let query = SearchQuery {
        start_date: Some("2022-03-13".to_string()),
        end_date: Some("2022-05-13".to_string()),
        ..Default::default()
    };
    let ids: Vec<u64> = filter(&activities, &criteria(&query))
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let query = SearchQuery {
        start_date: Some("2022-05-14".to_string()),
        end_date: Some("2022-05-20".to_string()),
        ..Default::default()
    };
    // Empty result is a valid outcome when both bounds are present
    assert!(filter(&activities, &criteria(&query)).is_empty());
}

#[test]
fn test_specific_date_matches_at_day_granularity() {
    let activities = sample_activities();
    let query = SearchQuery {
        specific_date: Some("2022-04-13".to_string()),
        ..Default::default()
    };
    let result = filter(&activities, &criteria(&query));
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 1);
}

#[test]
fn test_duration_range_is_inclusive() {
    let activities = sample_activities();
    let query = SearchQuery {
        start_duration: Some("1800".to_string()),
        end_duration: Some("2400".to_string()),
        ..Default::default()
    };
    let ids: Vec<u64> = filter(&activities, &criteria(&query))
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_lone_distance_bound_is_validation_error() {
    let query = SearchQuery {
        start_distance: Some("5".to_string()),
        ..Default::default()
    };
    let err = SearchCriteria::parse(&query, now()).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_future_specific_date_is_validation_error() {
    let query = SearchQuery {
        specific_date: Some("2999-01-01".to_string()),
        ..Default::default()
    };
    let err = SearchCriteria::parse(&query, now()).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_output_preserves_source_order() {
    // Reverse the list: output should follow the reversed order
    let mut activities = sample_activities();
    activities.reverse();
    let query = SearchQuery {
        specific_distance: Some("7500".to_string()),
        ..Default::default()
    };
    let ids: Vec<u64> = filter(&activities, &criteria(&query))
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn test_validation_error_stops_the_whole_search() {
    // A valid criterion alongside an invalid one must not yield partial results
    let query = SearchQuery {
        search: Some("Morning".to_string()),
        specific_duration: Some("-1".to_string()),
        ..Default::default()
    };
    assert!(SearchCriteria::parse(&query, now()).is_err());
}
