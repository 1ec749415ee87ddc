//! Time source for session expiration.
//!
//! Expiration is evaluated against wall-clock time on every lookup, so the
//! authenticator never reads the system clock directly. It asks a [`Clock`].
//! Production code uses [`SystemClock`]; tests use [`ManualClock`] to step
//! time across expiry boundaries without sleeping.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;

/// A source of the current wall-clock time.
///
/// `Send + Sync + 'static` because the clock lives inside the shared
/// authenticator and is read from many request handlers at once.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current time.
    fn now(&self) -> SystemTime;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock that only moves when told to.
///
/// Cloning is cheap and every clone shares the same reading, so a test can
/// hand one clone to the authenticator and keep another to advance time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<SystemTime>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: SystemTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }

    /// Jumps the clock to an absolute time (may go backwards).
    pub fn set(&self, to: SystemTime) {
        *self.now.lock() = to;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(SystemTime::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_reading() {
        let clock = ManualClock::default();
        let handle = clock.clone();

        handle.advance(Duration::from_secs(3));

        assert_eq!(clock.now(), SystemTime::UNIX_EPOCH + Duration::from_secs(3));
    }

    #[test]
    fn test_manual_clock_set_can_go_backwards() {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let clock = ManualClock::new(start);

        clock.set(SystemTime::UNIX_EPOCH);

        assert_eq!(clock.now(), SystemTime::UNIX_EPOCH);
    }

    #[test]
    fn test_system_clock_is_after_epoch() {
        assert!(SystemClock.now() > SystemTime::UNIX_EPOCH);
    }
}
