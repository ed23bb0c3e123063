// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GPX decoding and upload ingestion.
//!
//! Decodes a point-sequence track document into segments plus two derived
//! scalars (total surface distance, total elapsed time). Structurally
//! incomplete documents are rejected outright; there is no partial
//! recovery.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

use crate::models::{TrackPoint, TrackSegment, TrackSummary};

/// Result of decoding one GPX document.
#[derive(Debug, Clone)]
pub struct DecodedTrack {
    /// Raw point data, first track only
    pub segments: Vec<TrackSegment>,
    /// Derived totals
    pub summary: TrackSummary,
    /// Document-level `<metadata><time>`, when present and parseable
    pub date: Option<DateTime<Utc>>,
}

/// Errors from GPX decoding.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Failed to read GPX file: {0}")]
    Io(String),

    #[error("GPX file too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },

    #[error("Malformed GPX document: {0}")]
    Malformed(String),

    #[error("GPX document has no metadata section")]
    MissingMetadata,

    #[error("GPX document has no track")]
    MissingTrack,

    #[error("GPX track has no segments")]
    MissingSegments,
}

/// Decode a GPX document.
///
/// Only the first `<trk>` element is used. The document must carry a
/// `<metadata>` section and at least one segment in that track.
pub fn decode(content: &str) -> Result<DecodedTrack, DecodeError> {
    let document =
        gpx::read(content.as_bytes()).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let metadata = document.metadata.ok_or(DecodeError::MissingMetadata)?;
    let track = document
        .tracks
        .into_iter()
        .next()
        .ok_or(DecodeError::MissingTrack)?;
    if track.segments.is_empty() {
        return Err(DecodeError::MissingSegments);
    }

    let date = metadata.time.and_then(parse_time);
    let segments: Vec<TrackSegment> = track.segments.into_iter().map(convert_segment).collect();
    let summary = TrackSummary::of_segments(&segments);

    tracing::debug!(
        segments = segments.len(),
        distance_meters = summary.distance_meters,
        duration_secs = summary.duration_secs,
        "Decoded GPX track"
    );

    Ok(DecodedTrack {
        segments,
        summary,
        date,
    })
}

/// Decode an uploaded GPX file, removing it afterwards.
///
/// The file is removed on both success and failure so that rejected
/// uploads never linger on disk.
pub fn ingest_file(path: &Path, max_bytes: u64) -> Result<DecodedTrack, DecodeError> {
    let result = decode_upload(path, max_bytes);
    if let Err(err) = fs::remove_file(path) {
        tracing::warn!(
            path = %path.display(),
            error = %err,
            "Failed to remove uploaded GPX file"
        );
    }
    result
}

fn decode_upload(path: &Path, max_bytes: u64) -> Result<DecodedTrack, DecodeError> {
    let size = fs::metadata(path)
        .map_err(|e| DecodeError::Io(e.to_string()))?
        .len();
    if size > max_bytes {
        return Err(DecodeError::TooLarge {
            size,
            limit: max_bytes,
        });
    }
    let content = fs::read_to_string(path).map_err(|e| DecodeError::Io(e.to_string()))?;
    decode(&content)
}

fn parse_time(time: gpx::Time) -> Option<DateTime<Utc>> {
    let formatted = time.format().ok()?;
    formatted
        .parse::<DateTime<Utc>>()
        .map_err(|err| {
            tracing::warn!(raw = %formatted, error = %err, "Unparseable GPX timestamp");
            err
        })
        .ok()
}

fn convert_segment(segment: gpx::TrackSegment) -> TrackSegment {
    let points = segment
        .points
        .into_iter()
        .map(|waypoint| {
            let point = waypoint.point();
            TrackPoint {
                latitude: point.y(),
                longitude: point.x(),
                elevation: waypoint.elevation,
                time: waypoint.time.and_then(parse_time),
            }
        })
        .collect();
    TrackSegment::new(points)
}
