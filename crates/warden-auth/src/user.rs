//! Users and the store they are looked up in.
//!
//! The user database is not part of Warden. [`UserStore`] is the seam the
//! strategies call through; [`MemoryUserStore`] backs tests and demos.

use std::collections::HashMap;
use std::future::Future;

use parking_lot::RwLock;

use crate::password::{hash_password, verify_password};
use crate::AuthError;

/// An account that can be authenticated.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identifier; this is what sessions point at.
    pub id: String,
    /// Login name for both strategies.
    pub email: String,
    /// PHC-format scrypt hash, see [`hash_password`].
    pub password_hash: String,
}

impl User {
    /// Creates a user, hashing `password` at the default cost.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        password: &str,
    ) -> Result<Self, AuthError> {
        Ok(Self::with_password_hash(id, email, hash_password(password)?))
    }

    /// Creates a user from an already computed hash.
    pub fn with_password_hash(
        id: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Returns `true` if `password` matches the stored hash.
    pub fn is_valid_password(&self, password: &str) -> bool {
        verify_password(&self.password_hash, password)
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Where users are looked up.
///
/// Async because real stores hit a database. Implementations must be
/// shareable across request handlers, hence `Send + Sync + 'static`.
pub trait UserStore: Send + Sync + 'static {
    /// Looks a user up by ID.
    fn get(&self, user_id: &str) -> impl Future<Output = Option<User>> + Send;

    /// Looks a user up by email address.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Option<User>> + Send;
}

/// In-memory [`UserStore`] keyed by user ID.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user.
    pub fn insert(&self, user: User) {
        self.users.write().insert(user.id.clone(), user);
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Returns `true` if no users are stored.
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl UserStore for MemoryUserStore {
    async fn get(&self, user_id: &str) -> Option<User> {
        self.users.read().get(user_id).cloned()
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .values()
            .find(|user| user.email == email)
            .cloned()
    }
}
