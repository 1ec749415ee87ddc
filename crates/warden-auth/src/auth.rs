//! The authentication contract every strategy implements.
//!
//! Warden doesn't decide how your HTTP layer works. It defines the
//! [`Authenticator`] trait: given the credentials found on a request, who
//! is the current user? The HTTP layer calls
//! [`authorize`](Authenticator::authorize) before each request and turns
//! the error into a `401`/`403`.
//!
//! Two strategies ship with the crate ([`BasicAuth`](crate::BasicAuth) and
//! [`SessionAuth`](crate::SessionAuth)); [`AuthStrategy`](crate::AuthStrategy)
//! picks one of them from configuration.

use std::future::Future;

use crate::{AuthError, AuthRequest, User};

/// Decides whether a path needs authentication at all.
///
/// Returns `false` when `path` matches one of `excluded_paths`, `true`
/// otherwise (including for an empty path or an empty exclusion list).
///
/// Matching ignores a trailing slash on either side, so `/api/v1/status`
/// matches `/api/v1/status/`. An excluded path ending in `*` matches every
/// path that starts with the part before the `*`: `/api/v1/stat*` covers
/// `/api/v1/status` and `/api/v1/stats`.
pub fn require_auth(path: &str, excluded_paths: &[&str]) -> bool {
    if path.is_empty() || excluded_paths.is_empty() {
        return true;
    }

    let path = path.trim_end_matches('/');
    let excluded = excluded_paths.iter().any(|pattern| {
        match pattern.strip_suffix('*') {
            Some(prefix) => path.starts_with(prefix),
            None => path == pattern.trim_end_matches('/'),
        }
    });
    !excluded
}

/// Establishes the current user for a request.
///
/// # Trait bounds
///
/// - `Send + Sync` → one authenticator is shared by every request handler.
/// - `'static` → it lives as long as the server.
///
/// Only [`current_user`](Self::current_user) and
/// [`session_name`](Self::session_name) need implementing; the rest have
/// defaults.
pub trait Authenticator: Send + Sync + 'static {
    /// Name of the cookie that carries the session ID.
    fn session_name(&self) -> &str;

    /// Returns the user the request's credentials identify.
    fn current_user(
        &self,
        request: &AuthRequest,
    ) -> impl Future<Output = Result<User, AuthError>> + Send;

    /// See the free function [`require_auth`].
    fn require_auth(&self, path: &str, excluded_paths: &[&str]) -> bool {
        require_auth(path, excluded_paths)
    }

    /// Returns the raw `Authorization` header.
    fn authorization_header<'r>(&self, request: &'r AuthRequest) -> Option<&'r str> {
        request.authorization.as_deref()
    }

    /// Returns the session cookie's value.
    fn session_cookie<'r>(&self, request: &'r AuthRequest) -> Option<&'r str> {
        request.cookie(self.session_name())
    }

    /// Runs the full per-request check.
    ///
    /// - `Ok(None)` → the path is excluded, let the request through.
    /// - `Ok(Some(user))` → authenticated.
    /// - `Err(AuthError::MissingCredentials)` → no header and no cookie (401).
    /// - any other `Err` → credentials present but rejected (403).
    fn authorize(
        &self,
        request: &AuthRequest,
        excluded_paths: &[&str],
    ) -> impl Future<Output = Result<Option<User>, AuthError>> + Send {
        async move {
            if !self.require_auth(&request.path, excluded_paths) {
                return Ok(None);
            }
            if self.authorization_header(request).is_none()
                && self.session_cookie(request).is_none()
            {
                return Err(AuthError::MissingCredentials);
            }
            let user = self.current_user(request).await?;
            Ok(Some(user))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXCLUDED: &[&str] = &["/api/v1/status/", "/api/v1/unauthorized/", "/api/v1/auth_session/login/"];

    #[test]
    fn test_require_auth_empty_inputs_require_auth() {
        assert!(require_auth("", EXCLUDED));
        assert!(require_auth("/api/v1/status/", &[]));
    }

    #[test]
    fn test_require_auth_excluded_path_is_open() {
        assert!(!require_auth("/api/v1/status/", EXCLUDED));
    }

    #[test]
    fn test_require_auth_ignores_trailing_slash() {
        assert!(!require_auth("/api/v1/status", EXCLUDED));
        assert!(!require_auth("/api/v1/status/", &["/api/v1/status"]));
    }

    #[test]
    fn test_require_auth_other_path_is_protected() {
        assert!(require_auth("/api/v1/users", EXCLUDED));
        assert!(require_auth("/api/v1/statuses", EXCLUDED));
    }

    #[test]
    fn test_require_auth_wildcard_matches_prefix() {
        let excluded = ["/api/v1/stat*"];
        assert!(!require_auth("/api/v1/status", &excluded));
        assert!(!require_auth("/api/v1/stats/", &excluded));
        assert!(require_auth("/api/v1/users", &excluded));
    }
}
