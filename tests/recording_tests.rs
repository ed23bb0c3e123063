// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use std::sync::Arc;
use std::time::Duration;
use tracklog::error::AppError;
use tracklog::models::{ActivityType, TrackActivityInput, TrackPoint};
use tracklog::services::RecordingService;
use tracklog::store::ActivityStore;

const USER: u64 = 1;

fn service(timeout: Duration) -> (RecordingService, Arc<ActivityStore>) {
    let store = Arc::new(ActivityStore::new());
    (RecordingService::new(Arc::clone(&store), timeout), store)
}

fn timed_point(latitude: f64, time: &str) -> TrackPoint {
    TrackPoint {
        latitude,
        longitude: 7.0,
        elevation: None,
        time: Some(time.parse().expect("valid RFC3339 timestamp")),
    }
}

fn finish_input(name: &str) -> TrackActivityInput {
    TrackActivityInput {
        name: name.to_string(),
        activity_type: ActivityType::Walking,
        comment: None,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_start_append_finish_computes_totals() {
    let (recording, store) = service(Duration::from_secs(60));

    let session = recording.start(USER, vec![timed_point(45.0, "2022-04-13T10:00:00Z")]);
    recording
        .append(session, vec![timed_point(45.001, "2022-04-13T10:00:10Z")])
        .unwrap();
    let activity = recording
        .finish(
            session,
            vec![timed_point(45.002, "2022-04-13T10:00:30Z")],
            finish_input("Walk home"),
        )
        .unwrap();

    assert_eq!(activity.name, "Walk home");
    assert_eq!(activity.activity_type, ActivityType::Walking);
    assert_eq!(activity.duration_total, 30.0);
    assert!((activity.distance_total - 222.39).abs() < 1.0);
    assert!(activity.segments.is_track_derived());
    assert_eq!(recording.active_sessions(), 0);
    assert_eq!(store.list(USER).len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_sessions_are_independent() {
    let (recording, store) = service(Duration::from_secs(60));

    let first = recording.start(USER, vec![timed_point(45.0, "2022-04-13T10:00:00Z")]);
    let second = recording.start(2, vec![timed_point(46.0, "2022-04-13T11:00:00Z")]);
    assert_eq!(recording.active_sessions(), 2);

    recording.cancel(first).unwrap();
    assert_eq!(recording.active_sessions(), 1);
    assert!(store.list(USER).is_empty());

    let activity = recording
        .finish(second, Vec::new(), finish_input("Other walk"))
        .unwrap();
    assert_eq!(activity.user_id, 2);
    assert_eq!(store.list(2).len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_invalid_finish_discards_draft() {
    let (recording, store) = service(Duration::from_secs(60));

    let session = recording.start(USER, vec![timed_point(45.0, "2022-04-13T10:00:00Z")]);
    let err = recording
        .finish(session, Vec::new(), finish_input("ab"))
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(recording.active_sessions(), 0);
    assert!(store.list(USER).is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_idle_session_expires_and_discards_draft() {
    let (recording, store) = service(Duration::from_millis(50));

    let session = recording.start(USER, vec![timed_point(45.0, "2022-04-13T10:00:00Z")]);
    assert_eq!(store.list(USER).len(), 1);

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(recording.active_sessions(), 0);
    assert!(store.list(USER).is_empty());
    assert!(matches!(
        recording.append(session, Vec::new()),
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_append_rearms_expiry() {
    let (recording, store) = service(Duration::from_millis(150));

    let session = recording.start(USER, vec![timed_point(45.0, "2022-04-13T10:00:00Z")]);
    // Keep the session alive past its original deadline
    for _ in 0..3 {
        tokio::time::sleep(Duration::from_millis(80)).await;
        recording
            .append(session, vec![timed_point(45.001, "2022-04-13T10:00:10Z")])
            .unwrap();
    }
    assert_eq!(recording.active_sessions(), 1);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(recording.active_sessions(), 0);
    assert!(store.list(USER).is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unknown_session_is_not_found() {
    let (recording, _) = service(Duration::from_secs(60));
    assert!(matches!(
        recording.append(999, Vec::new()),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        recording.cancel(999),
        Err(AppError::NotFound(_))
    ));
}
