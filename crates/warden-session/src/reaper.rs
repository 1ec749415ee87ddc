//! Optional background purge of expired sessions.
//!
//! Expired sessions never authenticate, but they keep occupying memory
//! until someone destroys them. A long-running service can spawn a reaper
//! that calls [`SessionAuthenticator::purge_expired`] on a fixed interval.
//! Nothing is spawned unless asked for.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::SessionAuthenticator;

/// `tokio::time::interval` panics on a zero period.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Owns a running reaper task. Dropping the handle stops the task.
#[derive(Debug)]
pub struct ReaperHandle {
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Stops the reaper and waits for the task to finish.
    pub async fn shutdown(mut self) {
        self.task.abort();
        // The task was just aborted, so a cancellation error is expected.
        let _ = (&mut self.task).await;
    }

    /// Returns `true` once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ReaperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl SessionAuthenticator {
    /// Spawns a Tokio task that purges expired sessions every `interval`.
    ///
    /// The task only holds a weak reference, so it also exits by itself
    /// once the last `Arc<SessionAuthenticator>` is dropped.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_reaper(self: &Arc<Self>, interval: Duration) -> ReaperHandle {
        let weak = Arc::downgrade(self);
        let task = tokio::spawn(reap_loop(weak, interval));
        tracing::debug!(?interval, "session reaper started");
        ReaperHandle { task }
    }
}

async fn reap_loop(auth: Weak<SessionAuthenticator>, interval: Duration) {
    let mut ticker = time::interval(interval.max(MIN_INTERVAL));
    // A slow tick should not trigger a burst of catch-up purges.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let Some(auth) = auth.upgrade() else {
            tracing::debug!("session table dropped, reaper exiting");
            return;
        };
        auth.purge_expired();
    }
}
