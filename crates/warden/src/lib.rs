//! # Warden
//!
//! Session and Basic authentication for web APIs.
//!
//! Warden sits between your HTTP framework and your user database. The
//! framework turns each request into an [`AuthRequest`](prelude::AuthRequest)
//! and asks [`Warden::authorize`] who is calling; Warden answers from the
//! `Authorization` header or from an expiring server-side session.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use warden::prelude::*;
//!
//! // let warden = Warden::builder()
//! //     .config(AuthConfig::from_env())
//! //     .exclude("/api/v1/status/")
//! //     .build(Arc::new(my_user_store));
//! // match warden.authorize(&request).await { ... }
//! ```

mod error;
mod service;
mod telemetry;

pub use error::WardenError;
pub use service::{Warden, WardenBuilder};
pub use telemetry::init_tracing;

pub mod prelude {
    pub use std::sync::Arc;
    pub use std::time::Duration;

    pub use warden_auth::{
        AuthConfig, AuthError, AuthRequest, AuthStrategy, AuthType,
        Authenticator, BasicAuth, MemoryUserStore, SessionAuth, User,
        UserStore, hash_password, verify_password,
    };
    pub use warden_session::{
        Clock, IdGenerator, ManualClock, SessionAuthenticator, SessionConfig,
        SessionDuration, SystemClock,
    };

    pub use crate::{Warden, WardenBuilder, WardenError, init_tracing};
}
