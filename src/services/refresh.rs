//! Refresh signaling and polling
//!
//! Cross-component refresh uses an explicit subscription interface instead of
//! a process-wide emitter: components subscribe on mount and drop (or
//! explicitly unsubscribe) their handle on teardown. The snapshot poller is a
//! periodic read-only refresh; it never triggers transitions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, warn};

use crate::api::EventRepository;
use crate::models::EventId;

/// Signal published when local knowledge of an event may be stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshSignal {
    /// A participation transition was acknowledged by the repository
    ParticipationChanged { event_id: EventId },
    /// A read-only refresh produced a new snapshot
    SnapshotUpdated { event_id: EventId },
}

/// Receiver side of the refresh interface
pub trait RefreshListener: Send + Sync {
    fn on_signal(&self, signal: &RefreshSignal);
}

type ListenerMap = HashMap<u64, Arc<dyn RefreshListener>>;

/// Fan-out hub for refresh signals with explicit subscription lifecycle
pub struct RefreshHub {
    listeners: Arc<Mutex<ListenerMap>>,
    next_id: AtomicU64,
}

fn lock_listeners(listeners: &Mutex<ListenerMap>) -> MutexGuard<'_, ListenerMap> {
    match listeners.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl RefreshHub {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a listener; the returned handle unsubscribes on drop
    pub fn subscribe(&self, listener: Arc<dyn RefreshListener>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock_listeners(&self.listeners).insert(id, listener);
        debug!(subscription_id = id, "Refresh listener subscribed");

        Subscription {
            listeners: Arc::clone(&self.listeners),
            id,
        }
    }

    /// Deliver a signal to every current subscriber
    pub fn publish(&self, signal: RefreshSignal) {
        let listeners: Vec<Arc<dyn RefreshListener>> =
            lock_listeners(&self.listeners).values().cloned().collect();
        for listener in listeners {
            listener.on_signal(&signal);
        }
    }

    pub fn listener_count(&self) -> usize {
        lock_listeners(&self.listeners).len()
    }
}

impl Default for RefreshHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscription handle; dropping it tears the subscription down
pub struct Subscription {
    listeners: Arc<Mutex<ListenerMap>>,
    id: u64,
}

impl Subscription {
    /// Explicitly end the subscription
    pub fn unsubscribe(self) {
        // Drop does the removal
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if lock_listeners(&self.listeners).remove(&self.id).is_some() {
            debug!(subscription_id = self.id, "Refresh listener unsubscribed");
        }
    }
}

/// Periodic read-only refresh of one event's snapshot.
///
/// Re-reads the event through the repository port on a fixed interval and
/// publishes `SnapshotUpdated`; read failures are logged and the poll
/// continues. Stopping (or dropping) the poller aborts the task.
pub struct SnapshotPoller {
    handle: tokio::task::JoinHandle<()>,
}

impl SnapshotPoller {
    pub fn start(
        repository: Arc<dyn EventRepository>,
        hub: Arc<RefreshHub>,
        event_id: EventId,
        interval: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match repository.get_event(event_id).await {
                    Ok(event) => {
                        debug!(
                            event_id = %event_id,
                            participant_count = event.participants.len(),
                            "Poll refresh completed"
                        );
                        hub.publish(RefreshSignal::SnapshotUpdated { event_id });
                    }
                    Err(e) => {
                        warn!(event_id = %event_id, error = %e, "Poll refresh failed");
                    }
                }
            }
        });

        Self { handle }
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for SnapshotPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
