//! Integration tests for the `Warden` facade: the full request flow from
//! login through authorize to logout, with strategies picked by config.

use std::time::SystemTime;

use warden::prelude::*;
use warden_auth::hash_password_with_cost;
use warden_session::RandomIdGenerator;

// =========================================================================
// Fixtures
// =========================================================================

const COOKIE: &str = "_my_session_id";

fn users() -> Arc<MemoryUserStore> {
    let store = MemoryUserStore::new();
    let hash = hash_password_with_cost("H0lberton", 4).unwrap();
    store.insert(User::with_password_hash("u1", "bob@hbtn.io", hash));
    Arc::new(store)
}

fn env(auth_type: &str, duration: &str) -> AuthConfig {
    let pairs = [("AUTH_TYPE", auth_type), ("SESSION_DURATION", duration)];
    AuthConfig::from_lookup(|key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
}

fn manual_table(config: &AuthConfig) -> (Arc<SessionAuthenticator>, ManualClock) {
    let clock = ManualClock::new(SystemTime::UNIX_EPOCH + Duration::from_secs(5_000));
    let table = SessionAuthenticator::with_parts(
        config.session.clone(),
        clock.clone(),
        RandomIdGenerator,
    );
    (Arc::new(table), clock)
}

fn with_cookie(session_id: &str) -> AuthRequest {
    AuthRequest::new("/api/v1/users/me").with_cookie(COOKIE, session_id)
}

// =========================================================================
// Session expiration flow
// =========================================================================

#[tokio::test]
async fn test_login_authorize_expire() {
    let config = env("session_exp_auth", "5");
    let (table, clock) = manual_table(&config);
    let warden = Warden::builder()
        .config(config)
        .session_table(table)
        .build(users());

    let (_, session_id) = warden.login("bob@hbtn.io", "H0lberton").await.unwrap();

    clock.advance(Duration::from_secs(4));
    let user = warden.authorize(&with_cookie(&session_id)).await.unwrap();
    assert_eq!(user.map(|u| u.id).as_deref(), Some("u1"));

    clock.advance(Duration::from_secs(1));
    let err = warden.authorize(&with_cookie(&session_id)).await.unwrap_err();
    assert_eq!(err.http_status(), 403);
}

#[tokio::test]
async fn test_logout_then_authorize_is_rejected() {
    let warden = Warden::builder()
        .config(env("session_auth", "0"))
        .build(users());
    let (_, session_id) = warden.login("bob@hbtn.io", "H0lberton").await.unwrap();
    let request = with_cookie(&session_id);

    assert!(warden.logout(&request));

    assert!(warden.authorize(&request).await.is_err());
    assert!(!warden.logout(&request));
}

#[tokio::test]
async fn test_session_auth_ignores_duration() {
    // Plain session auth never expires, whatever SESSION_DURATION says.
    let warden = Warden::builder()
        .config(env("session_auth", "5"))
        .build(users());

    assert!(warden.sessions().config().duration.is_never());
}

// =========================================================================
// Strategy selection
// =========================================================================

#[tokio::test]
async fn test_no_auth_type_lets_everything_through() {
    let warden = Warden::builder().build(users());

    let outcome = warden.authorize(&AuthRequest::new("/api/v1/users")).await.unwrap();

    assert!(outcome.is_none());
    assert!(warden.strategy().is_none());
    assert!(warden.session_name().is_none());
}

#[tokio::test]
async fn test_basic_auth_login_is_not_configured() {
    let warden = Warden::builder()
        .config(env("basic_auth", "0"))
        .build(users());

    let err = warden.login("bob@hbtn.io", "H0lberton").await.unwrap_err();

    assert!(matches!(err, WardenError::NotConfigured("login")));
    assert!(!warden.logout(&with_cookie("anything")));
}

#[tokio::test]
async fn test_excluded_path_needs_no_credentials() {
    let warden = Warden::builder()
        .config(env("basic_auth", "0"))
        .exclude("/api/v1/status/")
        .build(users());

    let open = warden.authorize(&AuthRequest::new("/api/v1/status")).await;
    let closed = warden.authorize(&AuthRequest::new("/api/v1/users")).await;

    assert!(matches!(open, Ok(None)));
    assert_eq!(closed.unwrap_err().http_status(), 401);
}

// =========================================================================
// Lifecycle
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_reaper_runs_until_shutdown() {
    let config = env("session_exp_auth", "5");
    let (table, clock) = manual_table(&config);
    let warden = Warden::builder()
        .config(config)
        .session_table(Arc::clone(&table))
        .reap_every(Duration::from_secs(1))
        .build(users());

    warden.login("bob@hbtn.io", "H0lberton").await.unwrap();
    clock.advance(Duration::from_secs(6));
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(table.is_empty(), "expired session should have been reaped");

    warden.shutdown().await;
}

// =========================================================================
// Builder entry points
// =========================================================================

#[tokio::test]
async fn test_builder_store_type_comes_from_build() {
    let config = env("session_auth", "0");
    let (table, _clock) = manual_table(&config);

    let warden: Warden<MemoryUserStore> = Warden::builder()
        .config(config)
        .session_table(table)
        .build(users());
    let same = WardenBuilder::new().build(users());

    let (_, session_id) = warden.login("bob@hbtn.io", "H0lberton").await.unwrap();
    assert!(warden.authorize(&with_cookie(&session_id)).await.unwrap().is_some());
    assert!(same.strategy().is_none());
}
