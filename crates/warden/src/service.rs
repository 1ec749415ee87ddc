//! `Warden` builder and the per-request entry points.
//!
//! A `Warden` is built once at process start and handed to the HTTP layer
//! (usually behind an `Arc`). It owns the session table, the configured
//! strategy, and the optional reaper task; shutting it down stops the
//! reaper. There is no global state.

use std::sync::Arc;
use std::time::Duration;

use warden_auth::{
    AuthConfig, AuthRequest, AuthStrategy, Authenticator, SessionAuth, User,
    UserStore, session_config_for,
};
use warden_session::{ReaperHandle, SessionAuthenticator};

use crate::WardenError;

/// Builder for configuring a [`Warden`].
///
/// # Example
///
/// ```rust,ignore
/// use warden::prelude::*;
///
/// let warden = Warden::builder()
///     .config(AuthConfig::from_env())
///     .exclude("/api/v1/status/")
///     .reap_every(Duration::from_secs(60))
///     .build(Arc::new(my_user_store));
/// ```
#[derive(Debug, Default)]
pub struct WardenBuilder {
    config: AuthConfig,
    excluded_paths: Vec<String>,
    reap_interval: Option<Duration>,
    sessions: Option<Arc<SessionAuthenticator>>,
}

impl WardenBuilder {
    /// Creates a builder with default settings (no authentication).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the authentication config.
    pub fn config(mut self, config: AuthConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a path that is served without authentication. A trailing `*`
    /// makes it a prefix match.
    pub fn exclude(mut self, path: impl Into<String>) -> Self {
        self.excluded_paths.push(path.into());
        self
    }

    /// Purges expired sessions in the background every `interval`.
    pub fn reap_every(mut self, interval: Duration) -> Self {
        self.reap_interval = Some(interval);
        self
    }

    /// Uses an existing session table instead of building one from the
    /// config (e.g. one with a manual clock in tests).
    pub fn session_table(mut self, sessions: Arc<SessionAuthenticator>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Builds the service.
    ///
    /// Must run inside a Tokio runtime when [`reap_every`](Self::reap_every)
    /// was set.
    pub fn build<U: UserStore>(self, users: Arc<U>) -> Warden<U> {
        let sessions = self.sessions.unwrap_or_else(|| {
            let session_config = match self.config.auth_type {
                Some(auth_type) => session_config_for(auth_type, &self.config),
                None => self.config.session.clone(),
            };
            Arc::new(SessionAuthenticator::new(session_config))
        });

        let strategy = match self.config.auth_type {
            Some(auth_type) => Some(AuthStrategy::build(
                auth_type,
                &self.config.session_name,
                users,
                Arc::clone(&sessions),
            )),
            None => {
                tracing::warn!("no AUTH_TYPE configured, requests are not authenticated");
                None
            }
        };

        let reaper = self
            .reap_interval
            .map(|interval| sessions.spawn_reaper(interval));

        Warden {
            strategy,
            sessions,
            excluded_paths: self.excluded_paths,
            reaper,
        }
    }
}

/// The authentication service the HTTP layer talks to.
pub struct Warden<U> {
    strategy: Option<AuthStrategy<U>>,
    sessions: Arc<SessionAuthenticator>,
    excluded_paths: Vec<String>,
    reaper: Option<ReaperHandle>,
}

impl Warden<()> {
    /// Creates a new builder.
    ///
    /// Lives outside the generic impl: the user store type is only known
    /// once [`WardenBuilder::build`] is called, so `Warden::builder()`
    /// must not depend on it.
    pub fn builder() -> WardenBuilder {
        WardenBuilder::new()
    }
}

impl<U: UserStore> Warden<U> {
    /// The configured strategy, or `None` when authentication is off.
    pub fn strategy(&self) -> Option<&AuthStrategy<U>> {
        self.strategy.as_ref()
    }

    /// The session table.
    pub fn sessions(&self) -> &Arc<SessionAuthenticator> {
        &self.sessions
    }

    /// The session cookie name the HTTP layer should read and set.
    pub fn session_name(&self) -> Option<&str> {
        self.strategy.as_ref().map(|s| s.session_name())
    }

    /// Checks a request before it reaches a handler.
    ///
    /// `Ok(None)` means the request may proceed anonymously (authentication
    /// is off or the path is excluded).
    pub async fn authorize(
        &self,
        request: &AuthRequest,
    ) -> Result<Option<User>, WardenError> {
        let Some(strategy) = &self.strategy else {
            return Ok(None);
        };
        let excluded: Vec<&str> =
            self.excluded_paths.iter().map(String::as_str).collect();

        match strategy.authorize(request, &excluded).await {
            Ok(user) => Ok(user),
            Err(e) => {
                tracing::debug!(path = %request.path, error = %e, "request rejected");
                Err(e.into())
            }
        }
    }

    /// Checks email and password and opens a session.
    ///
    /// Returns the user and the session ID to set as the cookie.
    ///
    /// # Errors
    /// [`WardenError::NotConfigured`] unless a session strategy is active.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(User, String), WardenError> {
        let session = self.session_strategy("login")?;
        Ok(session.login(email, password).await?)
    }

    /// Destroys the request's session. `false` if there was none to
    /// destroy (or session auth is not configured).
    pub fn logout(&self, request: &AuthRequest) -> bool {
        self.strategy
            .as_ref()
            .and_then(AuthStrategy::as_session)
            .is_some_and(|session| session.destroy_session(request))
    }

    /// Stops the background reaper, if one is running.
    pub async fn shutdown(mut self) {
        if let Some(reaper) = self.reaper.take() {
            reaper.shutdown().await;
        }
        tracing::info!(sessions = self.sessions.len(), "warden shut down");
    }

    fn session_strategy(
        &self,
        operation: &'static str,
    ) -> Result<&SessionAuth<U>, WardenError> {
        self.strategy
            .as_ref()
            .and_then(AuthStrategy::as_session)
            .ok_or(WardenError::NotConfigured(operation))
    }
}
