//! Session authentication with expiration for Warden.
//!
//! This crate owns the server-side session table:
//!
//! 1. **Creation** — binding a fresh opaque ID to a user
//!    ([`SessionAuthenticator::create_session`])
//! 2. **Resolution** — turning an ID back into a user while the session is
//!    live ([`SessionAuthenticator::user_id_for_session_id`])
//! 3. **Destruction** — logging out ([`SessionAuthenticator::destroy_session`])
//!
//! Expiration is never stored. Each lookup compares the session's creation
//! time and lifetime against an injectable [`Clock`].
//!
//! # How it fits in the stack
//!
//! ```text
//! HTTP layer (outside)   ← reads/writes the session cookie
//!     ↕
//! Auth layer (warden-auth)   ← Basic / Session strategies, user lookup
//!     ↕
//! Session layer (this crate)  ← session table, expiry, ID generation
//! ```

mod clock;
mod error;
mod id;
mod manager;
mod reaper;
mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::SessionError;
pub use id::{IdGenerator, RandomIdGenerator};
pub use manager::SessionAuthenticator;
pub use reaper::ReaperHandle;
pub use session::{
    SESSION_DURATION_ENV, Session, SessionConfig, SessionDuration,
};
