//! Authentication strategies for Warden.
//!
//! This crate answers "who is making this request?" in one of two ways:
//!
//! 1. **Basic** — an `Authorization: Basic` header checked against the
//!    user store on every request ([`BasicAuth`])
//! 2. **Session** — a session cookie resolved through the expiring session
//!    table from `warden-session` ([`SessionAuth`])
//!
//! [`AuthStrategy`] holds whichever one [`AuthConfig`] selects. Users come
//! from a [`UserStore`], which the application provides.

#![allow(async_fn_in_trait)]

mod auth;
mod basic;
mod config;
mod error;
mod password;
mod request;
mod session;
mod strategy;
mod user;

pub use auth::{Authenticator, require_auth};
pub use basic::{
    BasicAuth, decode_basic_token, extract_basic_token, split_credentials,
};
pub use config::{
    AUTH_TYPE_ENV, AuthConfig, AuthType, DEFAULT_SESSION_NAME,
    SESSION_NAME_ENV,
};
pub use error::AuthError;
pub use password::{
    DEFAULT_LOG_N, hash_password, hash_password_with_cost, verify_password,
};
pub use request::AuthRequest;
pub use session::SessionAuth;
pub use strategy::{AuthStrategy, session_config_for};
pub use user::{MemoryUserStore, User, UserStore};
