//! Authentication configuration, read from the environment.
//!
//! | Variable           | Meaning                                   | Default          |
//! |--------------------|-------------------------------------------|------------------|
//! | `AUTH_TYPE`        | `basic_auth`, `session_auth`, `session_exp_auth` | unset (no auth) |
//! | `SESSION_NAME`     | session cookie name                       | `_my_session_id` |
//! | `SESSION_DURATION` | session lifetime in seconds, `0` = never  | `0`              |
//!
//! Bad values never abort startup. They are logged and replaced by the
//! default.

use serde::{Deserialize, Serialize};
use warden_session::SessionConfig;

pub const AUTH_TYPE_ENV: &str = "AUTH_TYPE";
pub const SESSION_NAME_ENV: &str = "SESSION_NAME";

/// Cookie name used when `SESSION_NAME` is unset.
pub const DEFAULT_SESSION_NAME: &str = "_my_session_id";

/// Which strategy authenticates requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    /// `Authorization: Basic` on every request.
    BasicAuth,
    /// Session cookie; sessions never expire.
    SessionAuth,
    /// Session cookie; sessions expire after the configured duration.
    SessionExpAuth,
}

impl AuthType {
    /// Parses the `AUTH_TYPE` spelling. Unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "basic_auth" => Some(Self::BasicAuth),
            "session_auth" => Some(Self::SessionAuth),
            "session_exp_auth" => Some(Self::SessionExpAuth),
            _ => None,
        }
    }
}

/// Everything needed to build an [`AuthStrategy`](crate::AuthStrategy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// `None` means requests are not authenticated at all.
    pub auth_type: Option<AuthType>,

    /// Name of the session cookie.
    pub session_name: String,

    /// Session lifetime. Ignored by [`AuthType::SessionAuth`], whose
    /// sessions never expire.
    pub session: SessionConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            auth_type: None,
            session_name: DEFAULT_SESSION_NAME.to_string(),
            session: SessionConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Reads the config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the config through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_type = lookup(AUTH_TYPE_ENV).and_then(|raw| {
            let parsed = AuthType::parse(&raw);
            if parsed.is_none() {
                tracing::warn!(
                    value = %raw,
                    "unknown AUTH_TYPE, requests will not be authenticated"
                );
            }
            parsed
        });

        let session_name = lookup(SESSION_NAME_ENV)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_NAME.to_string());

        Self {
            auth_type,
            session_name,
            session: SessionConfig::from_lookup(&lookup),
        }
    }
}
