//! Session types: the data structures that represent one login.
//!
//! A "session" is the server's record of an authenticated user. It tracks:
//! - WHO logged in (`user_id`)
//! - WHEN they logged in (`created_at`)
//! - HOW LONG the login is good for (`duration`)
//!
//! Sessions are immutable once created. Whether a session is still live is
//! a function of the clock, computed on every lookup, never stored.

use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

/// Environment variable holding the session lifetime in seconds.
pub const SESSION_DURATION_ENV: &str = "SESSION_DURATION";

// ---------------------------------------------------------------------------
// SessionDuration
// ---------------------------------------------------------------------------

/// How long a session stays live after it is created.
///
/// Serialized as a plain number of seconds, where `0` means [`Never`]
/// (the same encoding the `SESSION_DURATION` environment variable uses).
///
/// [`Never`]: SessionDuration::Never
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum SessionDuration {
    /// The session never expires. It lives until it is destroyed.
    #[default]
    Never,

    /// The session expires `span` after its creation time. Always non-zero.
    Finite(Duration),
}

impl SessionDuration {
    /// Builds a duration from a signed number of seconds.
    ///
    /// Zero and negative values mean "never expires".
    pub fn from_secs(secs: i64) -> Self {
        if secs <= 0 {
            Self::Never
        } else {
            Self::Finite(Duration::from_secs(secs as u64))
        }
    }

    /// Parses a raw configuration value.
    ///
    /// Missing or malformed input falls back to [`SessionDuration::Never`]
    /// with a warning; a bad value must never stop the process.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Never;
        };
        match raw.trim().parse::<i64>() {
            Ok(secs) => Self::from_secs(secs),
            Err(e) => {
                tracing::warn!(
                    value = raw,
                    error = %e,
                    "malformed session duration, sessions will not expire"
                );
                Self::Never
            }
        }
    }

    /// Returns the finite span, or `None` for sessions that never expire.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Never => None,
            Self::Finite(span) => Some(*span),
        }
    }

    /// Returns `true` if sessions with this duration never expire.
    pub fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }
}

impl From<i64> for SessionDuration {
    fn from(secs: i64) -> Self {
        Self::from_secs(secs)
    }
}

impl From<SessionDuration> for i64 {
    fn from(duration: SessionDuration) -> Self {
        match duration {
            SessionDuration::Never => 0,
            SessionDuration::Finite(span) => {
                i64::try_from(span.as_secs()).unwrap_or(i64::MAX)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for the session authenticator.
///
/// The default is a table whose sessions never expire, matching an unset
/// `SESSION_DURATION`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Lifetime applied to every session created by the authenticator.
    pub duration: SessionDuration,
}

impl SessionConfig {
    /// Creates a config with the given lifetime in seconds (`<= 0` = never).
    pub fn with_duration_secs(secs: i64) -> Self {
        Self {
            duration: SessionDuration::from_secs(secs),
        }
    }

    /// Reads the config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the config through an arbitrary key lookup.
    ///
    /// `from_env` is this with `std::env::var`; tests pass a closure over
    /// a fixed map instead of mutating the real environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup(SESSION_DURATION_ENV);
        Self {
            duration: SessionDuration::parse(raw.as_deref()),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A single authenticated login.
///
/// The lifecycle looks like this:
///
/// ```text
///   create ──→ LIVE ──(clock passes created_at + duration)──→ EXPIRED
///                │
///                └──────────────(destroy)──────────────────→ DESTROYED
/// ```
///
/// EXPIRED is never written anywhere. [`is_live_at`](Self::is_live_at)
/// re-evaluates it against whatever time the caller passes in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The principal this session authenticates.
    pub user_id: String,

    /// Wall-clock time the session was created.
    pub created_at: SystemTime,

    /// Lifetime captured from the config at creation time.
    pub duration: SessionDuration,
}

impl Session {
    /// Returns the instant the session stops being live, or `None` if it
    /// never expires.
    ///
    /// A finite duration large enough to overflow `SystemTime` is treated
    /// as never expiring.
    pub fn expires_at(&self) -> Option<SystemTime> {
        self.duration
            .as_duration()
            .and_then(|span| self.created_at.checked_add(span))
    }

    /// Returns `true` if the session is live at `now`.
    ///
    /// Expired at exact equality: a 5-second session created at `t` is
    /// live at `t + 4.999s` and dead at `t + 5s`.
    pub fn is_live_at(&self, now: SystemTime) -> bool {
        match self.expires_at() {
            None => true,
            Some(expires_at) => now < expires_at,
        }
    }
}
