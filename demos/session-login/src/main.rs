use warden::prelude::*;

// ---------------------------------------------------------------------------
// Demo: one user logs in, makes a request, logs out, tries again.
//
//   AUTH_TYPE=session_exp_auth SESSION_DURATION=60 cargo run -p session-login
// ---------------------------------------------------------------------------

const EMAIL: &str = "bob@hbtn.io";
const PASSWORD: &str = "H0lberton";

#[tokio::main]
async fn main() -> Result<(), WardenError> {
    init_tracing();

    let mut config = AuthConfig::from_env();
    // The demo logs in, so it needs one of the session strategies.
    if !matches!(
        config.auth_type,
        Some(AuthType::SessionAuth | AuthType::SessionExpAuth)
    ) {
        config.auth_type = Some(AuthType::SessionExpAuth);
    }

    let users = MemoryUserStore::new();
    users.insert(User::new("u1", EMAIL, PASSWORD)?);

    let warden = Warden::builder()
        .config(config)
        .exclude("/api/v1/status/")
        .reap_every(Duration::from_secs(60))
        .build(Arc::new(users));

    let Some(cookie) = warden.session_name().map(str::to_owned) else {
        return Ok(());
    };

    let (user, session_id) = warden.login(EMAIL, PASSWORD).await?;
    tracing::info!(user_id = %user.id, "logged in");

    let request = AuthRequest::new("/api/v1/users/me").with_cookie(&cookie, &session_id);
    match warden.authorize(&request).await {
        Ok(Some(user)) => tracing::info!(email = %user.email, "request authenticated"),
        Ok(None) => tracing::info!("request allowed anonymously"),
        Err(e) => tracing::warn!(status = e.http_status(), error = %e, "request rejected"),
    }

    warden.logout(&request);
    if let Err(e) = warden.authorize(&request).await {
        tracing::info!(status = e.http_status(), "request after logout rejected");
    }

    warden.shutdown().await;
    Ok(())
}
