//! # shutdown-sequence
//!
//! **shutdown-sequence** runs a process's cleanup actions (closing servers, flushing
//! caches, releasing resources) as one deterministic, ordered, fail-and-continue run.
//!
//! Actions are registered at any point of the process lifetime. At shutdown time the
//! crate computes a total order honoring caller-declared "run first" (head) and
//! "run last" (tail) name groups, then executes the actions strictly one at a time,
//! awaiting each before starting the next. A failing action is reported to observers
//! and never aborts the run.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   add_named / add_anonymous / add_fn       set_head_order / set_tail_order
//!            │                                          │
//!            ▼                                          ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  ShutdownSequence (one per process / subsystem)                   │
//! │  - Registry (actions in registration order, name + index)         │
//! │  - NameOrder (head / tail name lists)                             │
//! │  - SubscriberSet (awaited observers, subscription order)          │
//! │  - Bus (broadcast channel, fire-and-forget)                       │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        │ run() / shutdown() / run_on_signal()
//!        ▼
//!   order::resolve ──► [head...] [middle... newest first] [tail...]
//!        │
//!        ▼
//!   runner::run_all (one action at a time)
//!        ├─► ShutdownStarted
//!        ├─► ActionStarting ─► action.run().await ─► ActionCompleted | ActionFailed
//!        └─► ShutdownFinished
//! ```
//!
//! ### Ordering
//! ```text
//! section:   head (in head order) < middle (in neither) < tail (in tail order)
//! in head:   position in head order, same name → newest registration first
//! in middle: newest registration first
//! in tail:   position in tail order, same name → newest registration first
//! ```
//! With no head/tail declared the run order is exactly the reverse of registration
//! order: last acquired, first released.
//!
//! ### Lifecycle
//! ```text
//! Idle ──run()──► Running ──(last action settled)──► Finished
//!                    └─ run() again ─► SequenceError::AlreadyStarted
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                          |
//! |-------------------|---------------------------------------------------------------|---------------------------------------------|
//! | **Actions**       | Async or sync cleanup steps, closures or custom types.        | [`Action`], [`ActionFn`], [`SyncActionFn`]  |
//! | **Sequencing**    | Registration, head/tail ordering, single-shot run.            | [`ShutdownSequence`], [`RunState`]          |
//! | **Subscriber API**| Observe start, per-action failures, finish.                   | [`Subscribe`], [`Listener`], [`Event`]      |
//! | **Errors**        | Typed errors for actions and the coordinator.                 | [`ActionError`], [`SequenceError`]          |
//! | **Configuration** | Bus capacity, anonymous naming, panic handling.               | [`SequenceConfig`]                          |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogWriter`] subscriber that renders events through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use shutdown_sequence::{ActionError, ShutdownSequence, SyncActionFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let seq = Arc::new(ShutdownSequence::new());
//!
//!     seq.add_named_fn("http", || async {
//!         // stop accepting connections, drain...
//!         Ok::<_, ActionError>(())
//!     });
//!     seq.add_named("cache", SyncActionFn::arc(|| Err(ActionError::fail("disk full"))));
//!     seq.add_named_fn("db", || async { Ok(()) });
//!
//!     // http stops first, db closes last.
//!     seq.set_head_order(["http"]);
//!     seq.set_tail_order(["db"]);
//!
//!     seq.on_error(|err, name| eprintln!("cleanup {name} failed: {err}"));
//!
//!     // Failures are reported through `on_error`; the run itself still succeeds.
//!     seq.shutdown().await?;
//!     Ok(())
//! }
//! ```
mod actions;
mod core;
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use actions::{Action, ActionFn, ActionRef, SyncActionFn};
pub use crate::core::{
    ActionInfo, DEFAULT_ANONYMOUS_PREFIX, RunState, SequenceBuilder, SequenceConfig,
    ShutdownSequence, wait_for_shutdown_signal,
};
pub use error::{ActionError, SequenceError};
pub use events::{Event, EventKind};
pub use subscribers::{Listener, Subscribe, SubscriptionId};

// Optional: expose a simple built-in logger subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
