// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use tracklog::config::Config;
use tracklog::models::{Activity, ActivityType, Segments};
use tracklog::AppState;

/// A well-formed two-segment GPX document: 10s + 20s of elapsed time,
/// two 0.001-degree latitude hops of distance.
#[allow(dead_code)]
pub const TWO_SEGMENT_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="tracklog" xmlns="http://www.topografix.com/GPX/1/1">
  <metadata><time>2022-04-13T10:00:00Z</time></metadata>
  <trk>
    <name>Morning loop</name>
    <trkseg>
      <trkpt lat="45.0" lon="7.0"><ele>100</ele><time>2022-04-13T10:00:00Z</time></trkpt>
      <trkpt lat="45.001" lon="7.0"><ele>101</ele><time>2022-04-13T10:00:10Z</time></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="45.001" lon="7.0"><time>2022-04-13T10:01:00Z</time></trkpt>
      <trkpt lat="45.002" lon="7.0"><time>2022-04-13T10:01:20Z</time></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

/// Create a test app with default config.
#[allow(dead_code)]
pub fn test_state() -> AppState {
    AppState::new(Config::default())
}

/// Build an activity owned by user 1.
#[allow(dead_code)]
pub fn make_activity(id: u64, name: &str, distance: f64, duration: f64, date: &str) -> Activity {
    Activity {
        id,
        user_id: 1,
        name: name.to_string(),
        city: None,
        activity_type: ActivityType::Running,
        date: date.parse().expect("valid RFC3339 date"),
        duration_total: duration,
        distance_total: distance,
        comment: None,
        segments: Segments::Empty,
    }
}
