//! Per-session exercise state
//!
//! One [`ExerciseState`] per session id, guarded by a single store-level
//! mutex. Stale sessions are evicted lazily: a sweep runs only when a new
//! session is about to be added to a store that is already above its
//! cleanup watermark. There is no background timer.
//!
//! Callers must not run two frames for the same session id concurrently;
//! the lock serializes store access but each frame is one read-modify-write
//! of that session's counters.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, TimeDelta, Utc};
use fitrep_common::config::SessionConfig;
use fitrep_common::{time, Error, Result};
use serde::Serialize;
use tracing::debug;

use crate::classifier::ExerciseState;

/// Session id used when a caller supplies none
pub const DEFAULT_SESSION_ID: &str = "default";

#[derive(Debug, Clone)]
struct SessionEntry {
    state: ExerciseState,
    last_seen: DateTime<Utc>,
}

impl SessionEntry {
    fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            state: ExerciseState::default(),
            last_seen: now,
        }
    }
}

/// Read-only view of a live session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    #[serde(flatten)]
    pub state: ExerciseState,
    pub last_seen: DateTime<Utc>,
}

/// Session id → exercise state map with idle eviction
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    idle_timeout: TimeDelta,
    cleanup_watermark: usize,
}

impl SessionStore {
    /// Create an empty store
    ///
    /// Fails on a zero or unrepresentable timeout or a zero watermark.
    pub fn new(config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        let idle_timeout = time::secs_to_delta(config.idle_timeout_secs).ok_or_else(|| {
            Error::Config(format!(
                "sessions.idle_timeout_secs out of range: {}",
                config.idle_timeout_secs
            ))
        })?;

        Ok(Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
            cleanup_watermark: config.cleanup_watermark,
        })
    }

    pub fn idle_timeout(&self) -> TimeDelta {
        self.idle_timeout
    }

    pub fn cleanup_watermark(&self) -> usize {
        self.cleanup_watermark
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionEntry>> {
        // Entries are replaced whole, so a poisoned map is still consistent
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fetch a session's state, creating a zeroed one on first access
    pub fn get_or_create(&self, session_id: &str) -> ExerciseState {
        self.get_or_create_at(session_id, time::now())
    }

    /// [`get_or_create`](Self::get_or_create) with an explicit clock reading
    pub fn get_or_create_at(&self, session_id: &str, now: DateTime<Utc>) -> ExerciseState {
        let mut sessions = self.lock();
        self.entry(&mut sessions, session_id, now).state.clone()
    }

    /// Run one state transition for a session under the store lock
    ///
    /// Creates the session if needed, refreshes `last_seen`, and stores the
    /// state returned by `f`.
    pub fn transition<R>(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
        f: impl FnOnce(&ExerciseState) -> (ExerciseState, R),
    ) -> R {
        let mut sessions = self.lock();
        let entry = self.entry(&mut sessions, session_id, now);
        let (next, output) = f(&entry.state);
        entry.state = next;
        output
    }

    /// Read a session without creating it or refreshing its activity time
    pub fn peek(&self, session_id: &str) -> Option<ExerciseState> {
        self.lock().get(session_id).map(|entry| entry.state.clone())
    }

    /// Snapshot of a live session, if any
    pub fn snapshot(&self, session_id: &str) -> Option<SessionSnapshot> {
        self.lock().get(session_id).map(|entry| SessionSnapshot {
            session_id: session_id.to_string(),
            state: entry.state.clone(),
            last_seen: entry.last_seen,
        })
    }

    /// Remove a session, returning its final snapshot
    pub fn remove(&self, session_id: &str) -> Option<SessionSnapshot> {
        let removed = self.lock().remove(session_id);
        removed.map(|entry| {
            debug!("Session '{}' removed (count {})", session_id, entry.state.counter);
            SessionSnapshot {
                session_id: session_id.to_string(),
                state: entry.state,
                last_seen: entry.last_seen,
            }
        })
    }

    /// Remove every session idle for longer than `timeout`; returns how many
    pub fn evict_stale(&self, now: DateTime<Utc>, timeout: TimeDelta) -> usize {
        let mut sessions = self.lock();
        Self::sweep(&mut sessions, now, timeout)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn entry<'a>(
        &self,
        sessions: &'a mut HashMap<String, SessionEntry>,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> &'a mut SessionEntry {
        if !sessions.contains_key(session_id) {
            if sessions.len() > self.cleanup_watermark {
                Self::sweep(sessions, now, self.idle_timeout);
            }
            debug!("Creating session '{}'", session_id);
        }

        let entry = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry::fresh(now));
        entry.last_seen = now;
        entry
    }

    fn sweep(
        sessions: &mut HashMap<String, SessionEntry>,
        now: DateTime<Utc>,
        timeout: TimeDelta,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, entry| now.signed_duration_since(entry.last_seen) <= timeout);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("Evicted {} stale sessions ({} remain)", evicted, sessions.len());
        }
        evicted
    }
}
