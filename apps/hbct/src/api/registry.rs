//! # Session Registry
//!
//! In-memory map from session id to that session's assessment store.
//!
//! Sessions are independent: nothing is shared between two stores. A store
//! lives until its session is deleted or sits idle past the TTL; idle
//! sessions are reclaimed when a new session would otherwise be refused.

use hbct_core::{AssessmentState, HbctError};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Default cap on open sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Default idle time after which a session may be reclaimed (30 minutes).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// One session's store and when it was last used.
#[derive(Debug)]
struct Entry {
    state: AssessmentState,
    last_touched: Instant,
}

/// All open sessions.
///
/// Every lookup refreshes the session's idle timer. Sessions idle for longer
/// than the TTL are treated as gone and reclaimed when the registry is full.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: BTreeMap<Uuid, Entry>,
    max_sessions: usize,
    /// `None` disables expiry.
    ttl: Option<Duration>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_SESSIONS,
            Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        )
    }
}

impl SessionRegistry {
    /// Create a registry holding at most `max_sessions` sessions, each
    /// expiring after `ttl` without use. A zero `ttl` disables expiry.
    #[must_use]
    pub fn new(max_sessions: usize, ttl: Duration) -> Self {
        Self {
            sessions: BTreeMap::new(),
            max_sessions,
            ttl: (!ttl.is_zero()).then_some(ttl),
        }
    }

    /// Open a new empty session.
    pub fn create(&mut self) -> Result<Uuid, HbctError> {
        self.create_at(Instant::now())
    }

    /// Open a new empty session as of `now`.
    ///
    /// When the registry is full, expired sessions are evicted first.
    pub fn create_at(&mut self, now: Instant) -> Result<Uuid, HbctError> {
        if self.sessions.len() >= self.max_sessions {
            let evicted = self.evict_expired(now);
            if evicted > 0 {
                tracing::info!(evicted, "Reclaimed idle sessions");
            }
        }
        if self.sessions.len() >= self.max_sessions {
            return Err(HbctError::SessionLimit(self.sessions.len()));
        }

        let id = Uuid::new_v4();
        self.sessions.insert(
            id,
            Entry {
                state: AssessmentState::new(),
                last_touched: now,
            },
        );
        Ok(id)
    }

    /// Borrow a session's store, refreshing its idle timer.
    pub fn get(&mut self, id: &Uuid) -> Result<&AssessmentState, HbctError> {
        self.touch(id, Instant::now()).map(|entry| &entry.state)
    }

    /// Mutably borrow a session's store, refreshing its idle timer.
    pub fn get_mut(&mut self, id: &Uuid) -> Result<&mut AssessmentState, HbctError> {
        self.get_mut_at(id, Instant::now())
    }

    /// Mutably borrow a session's store as of `now`.
    pub fn get_mut_at(&mut self, id: &Uuid, now: Instant) -> Result<&mut AssessmentState, HbctError> {
        self.touch(id, now).map(|entry| &mut entry.state)
    }

    /// Close a session, dropping its answers.
    pub fn remove(&mut self, id: &Uuid) -> Result<(), HbctError> {
        self.sessions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| HbctError::SessionNotFound(id.to_string()))
    }

    /// Drop every session idle for longer than the TTL. Returns how many went.
    pub fn evict_expired(&mut self, now: Instant) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| !idle_too_long(entry, now, ttl));
        before.saturating_sub(self.sessions.len())
    }

    /// Number of open sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Look up a live session and mark it used. An expired session is
    /// removed and reported as not found.
    fn touch(&mut self, id: &Uuid, now: Instant) -> Result<&mut Entry, HbctError> {
        let expired = match (self.sessions.get(id), self.ttl) {
            (None, _) => return Err(HbctError::SessionNotFound(id.to_string())),
            (Some(entry), Some(ttl)) => idle_too_long(entry, now, ttl),
            (Some(_), None) => false,
        };
        if expired {
            self.sessions.remove(id);
            tracing::debug!(session = %id, "Session expired");
            return Err(HbctError::SessionNotFound(id.to_string()));
        }

        let entry = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| HbctError::SessionNotFound(id.to_string()))?;
        entry.last_touched = now;
        Ok(entry)
    }
}

fn idle_too_long(entry: &Entry, now: Instant, ttl: Duration) -> bool {
    now.saturating_duration_since(entry.last_touched) > ttl
}

// =============================================================================
// TESTS
// =============================================================================
