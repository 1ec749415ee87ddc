//! Strategy selection: one authenticator type chosen at startup.

use std::sync::Arc;

use warden_session::{SessionAuthenticator, SessionConfig};

use crate::{
    AuthConfig, AuthError, AuthRequest, AuthType, Authenticator, BasicAuth,
    SessionAuth, User, UserStore,
};

/// The configured authentication strategy.
///
/// An enum rather than `Box<dyn Authenticator>`: `Authenticator` returns
/// `impl Future`, which is not object safe, and there are only two
/// variants anyway.
pub enum AuthStrategy<U> {
    Basic(BasicAuth<U>),
    Session(SessionAuth<U>),
}

impl<U: UserStore> AuthStrategy<U> {
    /// Builds the strategy named by `config.auth_type`, with a fresh
    /// session table where one is needed.
    ///
    /// Returns `None` when no auth type is configured.
    pub fn from_config(config: &AuthConfig, users: Arc<U>) -> Option<Self> {
        let auth_type = config.auth_type?;
        let sessions = Arc::new(SessionAuthenticator::new(
            session_config_for(auth_type, config),
        ));
        Some(Self::build(auth_type, &config.session_name, users, sessions))
    }

    /// Builds a strategy around an existing session table.
    ///
    /// The table is only used by the session variants.
    pub fn build(
        auth_type: AuthType,
        session_name: &str,
        users: Arc<U>,
        sessions: Arc<SessionAuthenticator>,
    ) -> Self {
        tracing::info!(?auth_type, session_name, "authentication strategy selected");
        match auth_type {
            AuthType::BasicAuth => Self::Basic(BasicAuth::new(users, session_name)),
            AuthType::SessionAuth | AuthType::SessionExpAuth => {
                Self::Session(SessionAuth::new(sessions, users, session_name))
            }
        }
    }

    /// Returns the session strategy, if that is what is configured.
    pub fn as_session(&self) -> Option<&SessionAuth<U>> {
        match self {
            Self::Session(auth) => Some(auth),
            Self::Basic(_) => None,
        }
    }
}

/// The session lifetime a strategy should use.
///
/// Plain session auth never expires; only `session_exp_auth` honours
/// `SESSION_DURATION`.
pub fn session_config_for(auth_type: AuthType, config: &AuthConfig) -> SessionConfig {
    match auth_type {
        AuthType::SessionExpAuth => config.session.clone(),
        AuthType::BasicAuth | AuthType::SessionAuth => SessionConfig::default(),
    }
}

impl<U: UserStore> Authenticator for AuthStrategy<U> {
    fn session_name(&self) -> &str {
        match self {
            Self::Basic(auth) => auth.session_name(),
            Self::Session(auth) => auth.session_name(),
        }
    }

    async fn current_user(&self, request: &AuthRequest) -> Result<User, AuthError> {
        match self {
            Self::Basic(auth) => auth.current_user(request).await,
            Self::Session(auth) => auth.current_user(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryUserStore;

    fn config(auth_type: Option<AuthType>) -> AuthConfig {
        AuthConfig {
            auth_type,
            session: SessionConfig::with_duration_secs(30),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_from_config_without_auth_type_returns_none() {
        let users = Arc::new(MemoryUserStore::new());
        assert!(AuthStrategy::from_config(&config(None), users).is_none());
    }

    #[test]
    fn test_from_config_basic_auth_selects_basic() {
        let users = Arc::new(MemoryUserStore::new());
        let strategy =
            AuthStrategy::from_config(&config(Some(AuthType::BasicAuth)), users).unwrap();

        assert!(matches!(strategy, AuthStrategy::Basic(_)));
        assert!(strategy.as_session().is_none());
    }

    #[test]
    fn test_from_config_session_auth_never_expires() {
        let users = Arc::new(MemoryUserStore::new());
        let strategy =
            AuthStrategy::from_config(&config(Some(AuthType::SessionAuth)), users).unwrap();

        let session = strategy.as_session().expect("session strategy");
        assert!(session.sessions().config().duration.is_never());
    }

    #[test]
    fn test_from_config_session_exp_auth_uses_duration() {
        let users = Arc::new(MemoryUserStore::new());
        let strategy =
            AuthStrategy::from_config(&config(Some(AuthType::SessionExpAuth)), users)
                .unwrap();

        let session = strategy.as_session().expect("session strategy");
        assert_eq!(
            session.sessions().config(),
            &SessionConfig::with_duration_secs(30)
        );
    }

    #[test]
    fn test_session_name_delegates_to_variant() {
        let users = Arc::new(MemoryUserStore::new());
        let mut cfg = config(Some(AuthType::BasicAuth));
        cfg.session_name = "sid".into();

        let strategy = AuthStrategy::from_config(&cfg, users).unwrap();

        assert_eq!(strategy.session_name(), "sid");
    }
}
