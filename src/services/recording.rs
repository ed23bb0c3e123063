// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live recording sessions.
//!
//! A session owns a draft activity that accumulates position samples as
//! they stream in. Each session carries its own cancellable expiry task,
//! so any number of recordings can be in flight at once. An idle session
//! that outlives its timeout is discarded along with its draft.

use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{
    Activity, ActivityId, ActivityType, Segments, TrackActivityInput, TrackPoint, TrackSegment,
    UserId,
};
use crate::store::ActivityStore;

pub type SessionId = u64;

/// Name carried by a draft until the recording is finished.
const DRAFT_NAME: &str = "Recording in progress";

#[derive(Clone)]
pub struct RecordingService {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<ActivityStore>,
    sessions: DashMap<SessionId, RecordingSession>,
    next_session_id: AtomicU64,
    timeout: Duration,
}

struct RecordingSession {
    user_id: UserId,
    activity_id: ActivityId,
    expiry: JoinHandle<()>,
}

impl RecordingService {
    pub fn new(store: Arc<ActivityStore>, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                sessions: DashMap::new(),
                next_session_id: AtomicU64::new(1),
                timeout,
            }),
        }
    }

    /// Start a recording: creates a draft activity holding the initial
    /// points and arms the session's expiry.
    pub fn start(&self, user_id: UserId, points: Vec<TrackPoint>) -> SessionId {
        let activity = Activity {
            id: self.inner.store.allocate_id(),
            user_id,
            name: DRAFT_NAME.to_string(),
            city: None,
            activity_type: ActivityType::Running,
            date: Utc::now(),
            duration_total: 0.0,
            distance_total: 0.0,
            comment: None,
            segments: Segments::Track(vec![TrackSegment::new(points)]),
        };
        let activity_id = activity.id;
        self.inner.store.insert(activity);

        let session_id = self.inner.next_session_id.fetch_add(1, Ordering::Relaxed);
        let expiry = self.arm_expiry(session_id);
        self.inner.sessions.insert(
            session_id,
            RecordingSession {
                user_id,
                activity_id,
                expiry,
            },
        );
        tracing::info!(user_id, session_id, activity_id, "Recording started");
        session_id
    }

    /// Append points to the session's draft and re-arm its expiry.
    pub fn append(&self, session_id: SessionId, points: Vec<TrackPoint>) -> Result<()> {
        let mut session = self
            .inner
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| AppError::not_found(format!("recording session {session_id}")))?;

        extend_draft(&self.inner.store, session.user_id, session.activity_id, points)?;

        session.expiry.abort();
        session.expiry = self.arm_expiry(session_id);
        Ok(())
    }

    /// Finish the recording: append the final points, validate the
    /// caller's input, and finalize the draft with totals derived from
    /// the recorded track.
    ///
    /// Invalid input discards the draft; the recording cannot be
    /// recovered afterwards.
    pub fn finish(
        &self,
        session_id: SessionId,
        points: Vec<TrackPoint>,
        input: TrackActivityInput,
    ) -> Result<Activity> {
        let (_, session) = self
            .inner
            .sessions
            .remove(&session_id)
            .ok_or_else(|| AppError::not_found(format!("recording session {session_id}")))?;
        session.expiry.abort();

        if let Err(err) = input.validate() {
            self.inner.store.delete(session.user_id, session.activity_id);
            tracing::warn!(
                session_id,
                activity_id = session.activity_id,
                "Recording finished with invalid input, draft discarded"
            );
            return Err(AppError::Validation(err.to_string()));
        }

        extend_draft(&self.inner.store, session.user_id, session.activity_id, points)?;

        let finalized = self
            .inner
            .store
            .with_activity_mut(session.user_id, session.activity_id, |activity| {
                activity.name = input.name.clone();
                activity.activity_type = input.activity_type;
                activity.comment = input.comment.clone();
                let summary = activity.segments.summary();
                activity.duration_total = summary.duration_secs;
                activity.distance_total = summary.distance_meters;
            })
            .ok_or_else(|| AppError::not_found(format!("activity {}", session.activity_id)))?;

        tracing::info!(
            session_id,
            activity_id = finalized.id,
            distance_meters = finalized.distance_total,
            "Recording finished"
        );
        Ok(finalized)
    }

    /// Abandon the recording and delete its draft.
    pub fn cancel(&self, session_id: SessionId) -> Result<()> {
        let (_, session) = self
            .inner
            .sessions
            .remove(&session_id)
            .ok_or_else(|| AppError::not_found(format!("recording session {session_id}")))?;
        session.expiry.abort();
        self.inner.store.delete(session.user_id, session.activity_id);
        tracing::info!(
            session_id,
            activity_id = session.activity_id,
            "Recording cancelled"
        );
        Ok(())
    }

    /// Number of recordings currently in flight.
    pub fn active_sessions(&self) -> usize {
        self.inner.sessions.len()
    }

    fn arm_expiry(&self, session_id: SessionId) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let timeout = self.inner.timeout;
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if let Some((_, session)) = inner.sessions.remove(&session_id) {
                tracing::warn!(
                    session_id,
                    activity_id = session.activity_id,
                    "Recording session expired, discarding draft"
                );
                inner.store.delete(session.user_id, session.activity_id);
            }
        })
    }
}

fn extend_draft(
    store: &ActivityStore,
    user_id: UserId,
    activity_id: ActivityId,
    points: Vec<TrackPoint>,
) -> Result<()> {
    if points.is_empty() {
        return Ok(());
    }
    store
        .with_activity_mut(user_id, activity_id, |activity| {
            if let Segments::Track(segments) = &mut activity.segments {
                match segments.last_mut() {
                    Some(segment) => segment.points.extend(points),
                    None => segments.push(TrackSegment::new(points)),
                }
            }
        })
        .map(drop)
        .ok_or_else(|| AppError::not_found(format!("activity {activity_id}")))
}
