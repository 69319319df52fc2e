//! # Execute a resolved shutdown order.
//!
//! Runs every action of a resolved order strictly one at a time and publishes
//! lifecycle events to the [`SubscriberSet`] (awaited) and the [`Bus`].
//!
//! ## Event flow
//!
//! ```text
//! ShutdownStarted
//!   for each action:
//!     ActionStarting → action.run().await ─┬─ Ok  → ActionCompleted
//!                                          ├─ Err → ActionFailed (error, name)
//!                                          └─ panic (caught) → ActionFailed (Panicked)
//! ShutdownFinished
//! ```
//!
//! ## Rules
//! - Action `i + 1` is invoked only after action `i` settled and its events were delivered.
//! - A failure never stops the loop.
//! - Always publishes **exactly one** `ShutdownStarted` and **exactly one** `ShutdownFinished`.

use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::FutureExt;

use crate::core::registry::Entry;
use crate::error::ActionError;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::{SubscriberSet, panic_message};

/// Where events go during a run.
pub(crate) struct Emitter<'a> {
    pub(crate) subs: &'a SubscriberSet,
    pub(crate) bus: &'a Bus,
}

impl Emitter<'_> {
    async fn emit(&self, ev: Event) {
        self.subs.emit(&ev).await;
        self.bus.publish(ev);
    }
}

/// Runs `order` to completion and returns the number of failed actions.
pub(crate) async fn run_all(order: Vec<Entry>, out: &Emitter<'_>, catch_panics: bool) -> usize {
    let total = order.len();
    let started = Instant::now();
    let mut failures = 0;

    out.emit(Event::new(EventKind::ShutdownStarted).with_total(total))
        .await;

    for (position, entry) in order.into_iter().enumerate() {
        out.emit(
            Event::new(EventKind::ActionStarting)
                .with_action(entry.name.clone())
                .with_index(entry.index)
                .with_position(position),
        )
        .await;

        let t0 = Instant::now();
        let res = run_one(&entry, catch_panics).await;
        let elapsed = t0.elapsed();

        let ev = match res {
            Ok(()) => {
                tracing::debug!(action = &*entry.name, index = entry.index, "action completed");
                Event::new(EventKind::ActionCompleted)
            }
            Err(err) => {
                failures += 1;
                tracing::warn!(
                    action = &*entry.name,
                    index = entry.index,
                    label = err.as_label(),
                    "action failed: {err}"
                );
                Event::new(EventKind::ActionFailed).with_error(err)
            }
        };
        out.emit(
            ev.with_action(entry.name)
                .with_index(entry.index)
                .with_position(position)
                .with_elapsed(elapsed),
        )
        .await;
    }

    out.emit(
        Event::new(EventKind::ShutdownFinished)
            .with_total(total)
            .with_failures(failures)
            .with_elapsed(started.elapsed()),
    )
    .await;

    failures
}

/// Invokes one action and awaits its completion.
async fn run_one(entry: &Entry, catch_panics: bool) -> Result<(), ActionError> {
    let fut = entry.action.run();
    if !catch_panics {
        return fut.await;
    }
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(res) => res,
        Err(panic_err) => Err(ActionError::Panicked {
            info: panic_message(panic_err.as_ref()),
        }),
    }
}
