//! The session authenticator: owns the table of live logins.
//!
//! This is the central piece of the session layer. It's responsible for:
//! - Creating sessions when a user logs in
//! - Resolving a session ID back to its user, honouring expiration
//! - Destroying sessions on logout
//! - Purging expired entries when asked to
//!
//! # Concurrency note
//!
//! Unlike a single-owner registry, the authenticator is shared by every
//! request handler at once (`Arc<SessionAuthenticator>`). One
//! `parking_lot::RwLock` guards the table: lookups take the read lock,
//! create/destroy/purge take the write lock. The clock is read and IDs
//! are drawn before the lock is taken, and every log event is emitted
//! after the guard is dropped, so a slow subscriber never holds up other
//! callers.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use parking_lot::RwLock;

use crate::{
    Clock, IdGenerator, RandomIdGenerator, Session, SessionConfig,
    SessionError, SystemClock,
};

/// How many fresh IDs to draw before giving up on a colliding generator.
const MAX_ID_ATTEMPTS: usize = 8;

/// Maps session IDs to the users they authenticate.
///
/// ## Lifecycle
///
/// ```text
/// create_session() ──→ [Live] ──(clock passes expiry)──→ [Expired]
///                        │                                   │
///                        ▼                                   ▼
///               destroy_session()                   purge_expired() /
///                        │                          destroy_session()
///                        ▼                                   │
///                   [Destroyed] ◀────────────────────────────┘
/// ```
///
/// Expired sessions stay in the table until destroyed or purged, but they
/// never resolve to a user again.
pub struct SessionAuthenticator {
    /// All stored sessions, keyed by session ID.
    sessions: RwLock<HashMap<String, Session>>,

    /// Lifetime applied to new sessions.
    config: SessionConfig,

    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl SessionAuthenticator {
    /// Creates an empty authenticator using the system clock and the
    /// default random ID generator.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_parts(config, SystemClock, RandomIdGenerator)
    }

    /// Creates an empty authenticator with an explicit clock and ID
    /// generator. Tests use this with a [`ManualClock`](crate::ManualClock).
    pub fn with_parts(
        config: SessionConfig,
        clock: impl Clock,
        ids: impl IdGenerator,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            clock: Box::new(clock),
            ids: Box::new(ids),
        }
    }

    /// Returns the config this authenticator was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Creates a session for `user_id` and returns its ID.
    ///
    /// The ID resolves via [`user_id_for_session_id`](Self::user_id_for_session_id)
    /// as soon as this returns, until it expires or is destroyed.
    ///
    /// # Errors
    /// - [`SessionError::InvalidInput`] if `user_id` is empty (nothing is
    ///   stored).
    /// - [`SessionError::IdCollision`] if the ID generator keeps returning
    ///   IDs that are already taken.
    pub fn create_session(&self, user_id: &str) -> Result<String, SessionError> {
        if user_id.is_empty() {
            return Err(SessionError::InvalidInput("user_id must not be empty"));
        }

        let created_at = self.clock.now();

        for _ in 0..MAX_ID_ATTEMPTS {
            // Drawn before locking; the guard only covers check-and-insert.
            let session_id = self.ids.generate();
            let inserted = match self.sessions.write().entry(session_id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(Session {
                        user_id: user_id.to_owned(),
                        created_at,
                        duration: self.config.duration,
                    });
                    true
                }
                Entry::Occupied(_) => false,
            };

            if inserted {
                tracing::info!(
                    user_id,
                    session = short_id(&session_id),
                    "session created"
                );
                return Ok(session_id);
            }
            tracing::warn!(
                session = short_id(&session_id),
                "generated session ID already in use, retrying"
            );
        }

        Err(SessionError::IdCollision(MAX_ID_ATTEMPTS))
    }

    /// Returns the user a session authenticates, if it is still live.
    ///
    /// `None` covers every "no session" case alike: empty ID, unknown ID,
    /// destroyed session, expired session. This never mutates the table and
    /// never extends a session's lifetime.
    pub fn user_id_for_session_id(&self, session_id: &str) -> Option<String> {
        if session_id.is_empty() {
            return None;
        }

        let now = self.clock.now();
        let found = self
            .sessions
            .read()
            .get(session_id)
            .map(|session| session.is_live_at(now).then(|| session.user_id.clone()));

        match found {
            Some(Some(user_id)) => Some(user_id),
            Some(None) => {
                tracing::debug!(
                    session = short_id(session_id),
                    "session expired"
                );
                None
            }
            None => None,
        }
    }

    /// Removes a session. Returns `true` if one was stored under this ID.
    ///
    /// Expired-but-unpurged sessions are removed too. An unknown ID is not
    /// an error; it just returns `false`.
    pub fn destroy_session(&self, session_id: &str) -> bool {
        if session_id.is_empty() {
            return false;
        }

        let removed = self.sessions.write().remove(session_id);
        match removed {
            Some(session) => {
                tracing::info!(
                    user_id = %session.user_id,
                    session = short_id(session_id),
                    "session destroyed"
                );
                true
            }
            None => false,
        }
    }

    /// Returns a copy of the stored record, live or expired.
    pub fn session(&self, session_id: &str) -> Option<Session> {
        self.sessions.read().get(session_id).cloned()
    }

    /// Removes every session that is no longer live and returns how many
    /// were dropped.
    ///
    /// Purely a memory bound. Lookups already ignore expired sessions, so
    /// calling this (or not) never changes what a lookup returns.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let (purged, remaining) = {
            let mut sessions = self.sessions.write();
            let before = sessions.len();
            sessions.retain(|_, session| session.is_live_at(now));
            (before - sessions.len(), sessions.len())
        };

        if purged > 0 {
            tracing::debug!(purged, remaining, "purged expired sessions");
        }
        purged
    }

    /// Returns the number of stored sessions, including expired ones that
    /// have not been purged yet.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns `true` if no sessions are stored.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl std::fmt::Debug for SessionAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Session IDs are bearer secrets, so only the count is shown.
        f.debug_struct("SessionAuthenticator")
            .field("config", &self.config)
            .field("sessions", &self.len())
            .finish_non_exhaustive()
    }
}

/// First eight characters of a session ID, for log lines.
pub(crate) fn short_id(session_id: &str) -> &str {
    match session_id.char_indices().nth(8) {
        Some((end, _)) => &session_id[..end],
        None => session_id,
    }
}

// =========================================================================
// Tests
// =========================================================================
