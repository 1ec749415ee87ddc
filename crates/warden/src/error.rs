//! Unified error type for the Warden facade.

use warden_auth::AuthError;
use warden_session::SessionError;

/// Top-level error that wraps the per-crate errors.
///
/// The `#[from]` attributes let `?` convert sub-crate errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum WardenError {
    /// A session-level error (invalid input, ID collision).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// An authentication error (bad header, wrong password, no session).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The operation needs a strategy that isn't configured, e.g. `login`
    /// while running Basic auth.
    #[error("{0} requires session authentication to be configured")]
    NotConfigured(&'static str),
}

impl WardenError {
    /// Status code the HTTP layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Auth(e) => e.http_status(),
            Self::Session(SessionError::InvalidInput(_)) => 400,
            Self::Session(SessionError::NotFound) => 403,
            Self::Session(SessionError::IdCollision(_)) | Self::NotConfigured(_) => 500,
        }
    }
}
