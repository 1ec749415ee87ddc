//! Log events must never be emitted while the session table is locked.
//!
//! A `tracing` layer stands in for a slow log sink: for every event it
//! asks another thread to take the table's write lock and waits a bounded
//! time. If the lock is still held by the emitting call, that thread stalls
//! and the event is counted.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};
use std::time::{Duration, SystemTime};

use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use warden_session::{
    IdGenerator, ManualClock, SessionAuthenticator, SessionConfig,
};

// =========================================================================
// Helpers
// =========================================================================

/// Counts events during which another thread could not take the lock.
struct ContendedEvents {
    auth: Arc<SessionAuthenticator>,
    contended: Arc<AtomicUsize>,
}

impl<S: Subscriber> Layer<S> for ContendedEvents {
    fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {
        let auth = Arc::clone(&self.auth);
        let (done_tx, done_rx) = mpsc::channel();
        std::thread::spawn(move || {
            // Unknown ID: takes the write lock, emits nothing.
            auth.destroy_session("no-such-session");
            let _ = done_tx.send(());
        });
        if done_rx.recv_timeout(Duration::from_millis(200)).is_err() {
            self.contended.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Returns "dup" twice, then "fresh", to force one collision retry.
struct OneCollision(AtomicUsize);

impl IdGenerator for OneCollision {
    fn generate(&self) -> String {
        match self.0.fetch_add(1, Ordering::SeqCst) {
            0 | 1 => "dup".to_string(),
            _ => "fresh".to_string(),
        }
    }
}

/// Runs `f` with the counting layer installed on this thread only and
/// returns how many events were emitted under the lock.
fn contended_events(auth: &Arc<SessionAuthenticator>, f: impl FnOnce()) -> usize {
    let contended = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ContendedEvents {
        auth: Arc::clone(auth),
        contended: Arc::clone(&contended),
    });
    tracing::subscriber::with_default(subscriber, f);
    contended.load(Ordering::SeqCst)
}

fn table(secs: i64) -> (Arc<SessionAuthenticator>, ManualClock) {
    let clock = ManualClock::new(SystemTime::UNIX_EPOCH + Duration::from_secs(1_000));
    let auth = SessionAuthenticator::with_parts(
        SessionConfig::with_duration_secs(secs),
        clock.clone(),
        OneCollision(AtomicUsize::new(0)),
    );
    (Arc::new(auth), clock)
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn test_create_session_logs_after_releasing_lock() {
    let (auth, _clock) = table(5);

    // First create takes "dup"; second collides once, then gets "fresh".
    let count = contended_events(&auth, || {
        assert_eq!(auth.create_session("u1").unwrap(), "dup");
        assert_eq!(auth.create_session("u2").unwrap(), "fresh");
    });

    assert_eq!(count, 0, "create_session logged under the write lock");
}

#[test]
fn test_expired_lookup_logs_after_releasing_lock() {
    let (auth, clock) = table(5);
    let id = auth.create_session("u1").unwrap();
    clock.advance(Duration::from_secs(5));

    let count = contended_events(&auth, || {
        assert_eq!(auth.user_id_for_session_id(&id), None);
    });

    assert_eq!(count, 0, "lookup logged under the read lock");
}

#[test]
fn test_purge_and_destroy_log_after_releasing_lock() {
    let (auth, clock) = table(5);
    auth.create_session("u1").unwrap();
    auth.create_session("u2").unwrap();
    clock.advance(Duration::from_secs(10));

    let count = contended_events(&auth, || {
        assert_eq!(auth.purge_expired(), 2);
        // "fresh" was purged, so it is free again for the next create.
        let id = auth.create_session("u3").unwrap();
        assert!(auth.destroy_session(&id));
    });

    assert_eq!(count, 0, "purge or destroy logged under the write lock");
}
