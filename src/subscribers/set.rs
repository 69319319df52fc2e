//! # Ordered, awaited fan-out over a mutable list of subscribers.
//!
//! Provides [`SubscriberSet`], the observer list held by a
//! [`ShutdownSequence`](crate::ShutdownSequence).
//!
//! ## Architecture
//! ```text
//! emit(event).await
//!     │  (snapshot of the list taken under a read lock)
//!     ├──► sub1.on_event().await ──► panic → SubscriberPanicked (bus)
//!     ├──► sub2.on_event().await
//!     └──► subN.on_event().await
//! ```
//!
//! ## Rules
//! - **Ordered**: subscribers see events in subscription order, one at a time.
//! - **Snapshot**: subscribing or unsubscribing during `emit` affects the next event only.
//! - **Isolation**: a panicking subscriber is reported and skipped; the others still run.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a subscriber uses `Arc<Mutex<T>>` and panics while holding the lock.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, PoisonError, RwLock};

use futures::FutureExt;

use crate::events::{Bus, Event};
use crate::subscribers::Subscribe;

/// Opaque handle returned by [`ShutdownSequence::subscribe`](crate::ShutdownSequence::subscribe); pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Registered subscriber with its handle.
struct Entry {
    id: SubscriptionId,
    sub: Arc<dyn Subscribe>,
}

/// Observer list with awaited, panic-isolated delivery.
pub struct SubscriberSet {
    entries: RwLock<Vec<Entry>>,
    next_id: AtomicU64,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates a set pre-populated with `subs` (in order).
    #[must_use]
    pub(crate) fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let set = Self {
            entries: RwLock::new(Vec::with_capacity(subs.len())),
            next_id: AtomicU64::new(0),
            bus,
        };
        for sub in subs {
            set.subscribe(sub);
        }
        set
    }

    /// Appends a subscriber; it receives every event emitted from now on.
    pub fn subscribe(&self, sub: Arc<dyn Subscribe>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, AtomicOrdering::Relaxed));
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Entry { id, sub });
        id
    }

    /// Removes a subscriber. Returns `false` if the handle was unknown (or already removed).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|e| e.id != id);
        entries.len() != before
    }

    /// Delivers one event to every subscriber, awaiting each in turn.
    ///
    /// A subscriber panic is logged, published on the bus as
    /// [`EventKind::SubscriberPanicked`](crate::EventKind::SubscriberPanicked),
    /// and delivery continues with the next subscriber.
    pub async fn emit(&self, event: &Event) {
        let subs: Vec<Arc<dyn Subscribe>> = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            entries.iter().map(|e| Arc::clone(&e.sub)).collect()
        };

        for sub in subs {
            let fut = sub.on_event(event);
            if let Err(panic_err) = AssertUnwindSafe(fut).catch_unwind().await {
                let info = panic_message(panic_err.as_ref());
                tracing::warn!(
                    subscriber = sub.name(),
                    event = event.kind.as_label(),
                    "subscriber panicked: {info}"
                );
                self.bus.publish(Event::subscriber_panicked(sub.name(), info));
            }
        }
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Renders a panic payload as text.
pub(crate) fn panic_message(any: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
