//! The slice of an HTTP request that authentication looks at.

use std::collections::HashMap;

/// What the HTTP layer hands to an [`Authenticator`](crate::Authenticator).
///
/// Parsing headers and cookies is the web framework's job; this type just
/// carries the results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthRequest {
    /// Request path, e.g. `/api/v1/users/me`.
    pub path: String,

    /// Raw value of the `Authorization` header, if any.
    pub authorization: Option<String>,

    /// Cookies sent with the request, by name.
    pub cookies: HashMap<String, String>,
}

impl AuthRequest {
    /// Creates a request for `path` with no credentials.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Sets the `Authorization` header.
    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    /// Adds a cookie.
    pub fn with_cookie(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Returns the value of the named cookie.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}
