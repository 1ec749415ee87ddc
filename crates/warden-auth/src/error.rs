//! Error types for the authentication layer.

use warden_session::SessionError;

/// Why a request could not be tied to a user.
///
/// The HTTP layer usually only needs [`http_status`](Self::http_status):
/// a request with no credentials at all is `401`, a request whose
/// credentials don't check out is `403`.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Neither an `Authorization` header nor a session cookie was sent.
    #[error("no credentials presented")]
    MissingCredentials,

    /// The strategy needs an `Authorization` header and there is none.
    #[error("missing Authorization header")]
    MissingHeader,

    /// The `Authorization` header is not of the form `Basic <token>`.
    #[error("Authorization header is not a Basic credential")]
    MalformedHeader,

    /// The Basic token is not valid base64, or not valid UTF-8 once decoded.
    #[error("Basic token is not valid base64 text")]
    InvalidBase64,

    /// The decoded Basic token has no `:` separating email and password.
    #[error("Basic credentials are not of the form email:password")]
    MalformedCredentials,

    /// No user matches the email or user ID.
    #[error("unknown user")]
    UnknownUser,

    /// The user exists but the password does not match.
    #[error("invalid password")]
    InvalidPassword,

    /// The strategy needs a session cookie and there is none.
    #[error("missing session cookie")]
    MissingCookie,

    /// Hashing a password failed (bad parameters, RNG failure).
    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    /// A session-layer failure (no live session, invalid input).
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AuthError {
    /// Maps the error to the status code the original API answered with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingCredentials => 401,
            Self::PasswordHash(_) | Self::Session(SessionError::IdCollision(_)) => 500,
            _ => 403,
        }
    }
}
