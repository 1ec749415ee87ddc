//! Error types for the session layer.

/// Errors that can occur while managing sessions.
///
/// Lookups and destruction deliberately do NOT return these: an unknown,
/// destroyed, or expired session all look the same to the caller
/// (`None` / `false`). Only session creation can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The caller passed an unusable argument (e.g. an empty user ID).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// No live session exists for the presented identifier.
    ///
    /// Not produced by [`SessionAuthenticator`](crate::SessionAuthenticator)
    /// itself; higher layers use it when they need an error value for the
    /// "no session" outcome.
    #[error("no live session for the given identifier")]
    NotFound,

    /// The identifier generator kept producing IDs that are already in
    /// use. Only a broken [`IdGenerator`](crate::IdGenerator) can cause this.
    #[error("identifier generator produced {0} colliding session IDs in a row")]
    IdCollision(usize),
}
