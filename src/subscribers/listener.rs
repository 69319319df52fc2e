//! # Closure-backed subscriber.
//!
//! [`Listener`] adapts a plain synchronous closure to [`Subscribe`], optionally
//! filtered to a single [`EventKind`]. It backs the `on_started`, `on_error` and
//! `on_finished` helpers of [`ShutdownSequence`](crate::ShutdownSequence).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use shutdown_sequence::{EventKind, Listener, Subscribe};
//!
//! let l: Arc<dyn Subscribe> = Arc::new(Listener::for_kind(EventKind::ActionFailed, |ev| {
//!     eprintln!("cleanup {:?} failed", ev.action);
//! }));
//! assert_eq!(l.name(), "listener");
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Subscriber that runs a closure for matching events.
pub struct Listener<F> {
    kind: Option<EventKind>,
    f: F,
}

impl<F> Listener<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    /// Listens to every event.
    pub fn all(f: F) -> Self {
        Self { kind: None, f }
    }

    /// Listens to events of one kind only.
    pub fn for_kind(kind: EventKind, f: F) -> Self {
        Self {
            kind: Some(kind),
            f,
        }
    }
}

#[async_trait]
impl<F> Subscribe for Listener<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    async fn on_event(&self, event: &Event) {
        if self.kind.is_none_or(|k| k == event.kind) {
            (self.f)(event);
        }
    }

    fn name(&self) -> &'static str {
        "listener"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn filters_by_kind() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let l = Listener::for_kind(EventKind::ActionFailed, move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        l.on_event(&Event::new(EventKind::ActionCompleted)).await;
        l.on_event(&Event::new(EventKind::ActionFailed)).await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn all_sees_everything() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let l = Listener::all(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        l.on_event(&Event::new(EventKind::ShutdownStarted)).await;
        l.on_event(&Event::new(EventKind::ShutdownFinished)).await;

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
