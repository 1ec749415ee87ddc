//! Cookie-based session authentication.
//!
//! The client logs in once with email and password, receives a session ID
//! in a cookie, and presents that cookie on every later request. The
//! session table (and its expiry rules) lives in
//! [`SessionAuthenticator`]; this strategy just connects it to requests
//! and to the user store.

use std::sync::Arc;

use warden_session::{SessionAuthenticator, SessionError};

use crate::{AuthError, AuthRequest, Authenticator, User, UserStore};

/// Authenticates requests by their session cookie.
pub struct SessionAuth<U> {
    sessions: Arc<SessionAuthenticator>,
    users: Arc<U>,
    session_name: String,
}

impl<U: UserStore> SessionAuth<U> {
    /// Creates the strategy over a shared session table, reading the
    /// session ID from the `session_name` cookie.
    pub fn new(
        sessions: Arc<SessionAuthenticator>,
        users: Arc<U>,
        session_name: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            users,
            session_name: session_name.into(),
        }
    }

    /// The underlying session table.
    pub fn sessions(&self) -> &Arc<SessionAuthenticator> {
        &self.sessions
    }

    /// Starts a session for `user_id`. See
    /// [`SessionAuthenticator::create_session`].
    pub fn create_session(&self, user_id: &str) -> Result<String, AuthError> {
        Ok(self.sessions.create_session(user_id)?)
    }

    /// Resolves a session ID to a user ID while the session is live.
    pub fn user_id_for_session_id(&self, session_id: &str) -> Option<String> {
        self.sessions.user_id_for_session_id(session_id)
    }

    /// Logs the request's session out. `false` if the request carries no
    /// session cookie or the session is unknown.
    pub fn destroy_session(&self, request: &AuthRequest) -> bool {
        match self.session_cookie(request) {
            Some(session_id) => self.sessions.destroy_session(session_id),
            None => false,
        }
    }

    /// Checks email and password and opens a session.
    ///
    /// Returns the user together with the new session ID, which the HTTP
    /// layer sets as the [`session_name`](Authenticator::session_name)
    /// cookie.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .ok_or(AuthError::UnknownUser)?;
        if !user.is_valid_password(password) {
            tracing::debug!(user_id = %user.id, "login password rejected");
            return Err(AuthError::InvalidPassword);
        }

        let session_id = self.create_session(&user.id)?;
        Ok((user, session_id))
    }
}

impl<U: UserStore> Authenticator for SessionAuth<U> {
    fn session_name(&self) -> &str {
        &self.session_name
    }

    async fn current_user(&self, request: &AuthRequest) -> Result<User, AuthError> {
        let session_id = self
            .session_cookie(request)
            .ok_or(AuthError::MissingCookie)?;
        let user_id = self
            .sessions
            .user_id_for_session_id(session_id)
            .ok_or(SessionError::NotFound)?;

        self.users.get(&user_id).await.ok_or(AuthError::UnknownUser)
    }
}
