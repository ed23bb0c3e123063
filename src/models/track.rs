// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Track geometry: points, segments, and derived summaries.

use chrono::{DateTime, Utc};
use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// A single recorded position sample. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Elevation in meters, when the source provides it
    pub elevation: Option<f64>,
    /// Sample timestamp, when the source provides it
    pub time: Option<DateTime<Utc>>,
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
            time: None,
        }
    }

    fn as_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// An ordered run of track points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub points: Vec<TrackPoint>,
}

impl TrackSegment {
    pub fn new(points: Vec<TrackPoint>) -> Self {
        Self { points }
    }

    /// Elapsed seconds between the first and last timestamped points.
    ///
    /// A segment without usable timestamps contributes 0 rather than
    /// failing the whole summary.
    fn duration_secs(&self) -> f64 {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return 0.0;
        };
        match (first.time, last.time) {
            (Some(start), Some(end)) => ((end - start).num_milliseconds() as f64 / 1000.0).abs(),
            _ => {
                tracing::warn!(
                    points = self.points.len(),
                    "Track segment has no usable timestamps, contributing 0s"
                );
                0.0
            }
        }
    }

    /// Great-circle distance accumulated over consecutive point pairs.
    ///
    /// Surface distance only: elevation is available per point but is not
    /// factored in.
    fn distance_meters(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| Haversine::distance(pair[0].as_point(), pair[1].as_point()))
            .sum()
    }
}

/// Totals derived from a set of track segments.
///
/// Never stored independently of its source points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    /// Total elapsed time in seconds, summed per segment
    pub duration_secs: f64,
    /// Total surface distance in meters
    pub distance_meters: f64,
}

impl TrackSummary {
    pub fn of_segments(segments: &[TrackSegment]) -> Self {
        let mut summary = Self::default();
        for segment in segments {
            summary.duration_secs += segment.duration_secs();
            summary.distance_meters += segment.distance_meters();
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed_point(latitude: f64, longitude: f64, time: &str) -> TrackPoint {
        TrackPoint {
            latitude,
            longitude,
            elevation: None,
            time: Some(time.parse().expect("valid RFC3339 timestamp")),
        }
    }

    #[test]
    fn test_zero_distance_for_coincident_points() {
        let segment = TrackSegment::new(vec![
            TrackPoint::new(45.0, 7.0),
            TrackPoint::new(45.0, 7.0),
        ]);
        let summary = TrackSummary::of_segments(&[segment]);
        assert_eq!(summary.distance_meters, 0.0);
    }

    #[test]
    fn test_reference_distance_one_millidegree_latitude() {
        // 0.001 degrees of latitude is ~111.195m on the mean-radius sphere
        let segment = TrackSegment::new(vec![
            TrackPoint::new(45.0, 7.0),
            TrackPoint::new(45.001, 7.0),
        ]);
        let summary = TrackSummary::of_segments(&[segment]);
        assert!((summary.distance_meters - 111.195).abs() < 0.5);
    }

    #[test]
    fn test_duration_sums_across_segments() {
        let first = TrackSegment::new(vec![
            timed_point(45.0, 7.0, "2022-04-13T10:00:00Z"),
            timed_point(45.001, 7.0, "2022-04-13T10:00:10Z"),
        ]);
        let second = TrackSegment::new(vec![
            timed_point(45.001, 7.0, "2022-04-13T10:01:00Z"),
            timed_point(45.002, 7.0, "2022-04-13T10:01:20Z"),
        ]);
        let summary = TrackSummary::of_segments(&[first, second]);
        assert_eq!(summary.duration_secs, 30.0);
    }

    #[test]
    fn test_untimed_segment_contributes_zero_duration() {
        let timed = TrackSegment::new(vec![
            timed_point(45.0, 7.0, "2022-04-13T10:00:00Z"),
            timed_point(45.001, 7.0, "2022-04-13T10:00:10Z"),
        ]);
        let untimed = TrackSegment::new(vec![
            TrackPoint::new(45.001, 7.0),
            TrackPoint::new(45.002, 7.0),
        ]);
        let summary = TrackSummary::of_segments(&[timed, untimed]);
        assert_eq!(summary.duration_secs, 10.0);
        // Untimed segments still count toward distance
        assert!(summary.distance_meters > 200.0);
    }

    #[test]
    fn test_reversed_timestamps_use_absolute_value() {
        let segment = TrackSegment::new(vec![
            timed_point(45.0, 7.0, "2022-04-13T10:00:30Z"),
            timed_point(45.001, 7.0, "2022-04-13T10:00:00Z"),
        ]);
        let summary = TrackSummary::of_segments(&[segment]);
        assert_eq!(summary.duration_secs, 30.0);
    }

    #[test]
    fn test_empty_segment_list() {
        let summary = TrackSummary::of_segments(&[]);
        assert_eq!(summary.duration_secs, 0.0);
        assert_eq!(summary.distance_meters, 0.0);
    }
}
