//! # Events emitted by a shutdown run.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Run events**: start and finish of the whole sequence
//! - **Action events**: one action starting, completing, or failing
//! - **Subscriber events**: observer misbehaviour (panics)
//!
//! The [`Event`] struct carries additional metadata such as timestamps, action name,
//! registration index, the failure value, and elapsed time.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Within one run, events are produced by a single sequential loop, so `seq` order is
//! also the execution order.
//!
//! ## Example
//! ```rust
//! use shutdown_sequence::{ActionError, Event, EventKind};
//!
//! let ev = Event::new(EventKind::ActionFailed)
//!     .with_action("flush-cache")
//!     .with_index(3)
//!     .with_error(ActionError::fail("disk full"));
//!
//! assert_eq!(ev.kind, EventKind::ActionFailed);
//! assert_eq!(ev.action.as_deref(), Some("flush-cache"));
//! assert_eq!(ev.error.as_deref(), Some(&ActionError::fail("disk full")));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::error::ActionError;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of shutdown events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    // === Run events ===
    /// The run started; emitted once, before the first action.
    ///
    /// Sets:
    /// - `total`: number of actions in the resolved order
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShutdownStarted,

    /// The run finished; emitted once, after the last action settled.
    ///
    /// Sets:
    /// - `total`: number of actions executed
    /// - `failures`: number of actions that reported `ActionFailed`
    /// - `elapsed_ms`: duration of the whole run (ms)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShutdownFinished,

    // === Action events ===
    /// An action is about to be invoked.
    ///
    /// Sets:
    /// - `action`: action name
    /// - `index`: registration index
    /// - `position`: 0-based position in the resolved order
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ActionStarting,

    /// An action completed successfully.
    ///
    /// Sets:
    /// - `action`, `index`, `position`
    /// - `elapsed_ms`: time spent in the action (ms)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ActionCompleted,

    /// An action failed (returned an error or panicked). The run continues.
    ///
    /// Sets:
    /// - `action`, `index`, `position`
    /// - `error`: the failure value
    /// - `elapsed_ms`: time spent in the action (ms)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ActionFailed,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Published on the bus only, never re-delivered to subscribers.
    ///
    /// Sets:
    /// - `action`: subscriber name
    /// - `reason`: panic info/message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberPanicked,
}

impl EventKind {
    /// Returns a short stable label (kebab-case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::ShutdownStarted => "shutdown-started",
            EventKind::ShutdownFinished => "shutdown-finished",
            EventKind::ActionStarting => "action-starting",
            EventKind::ActionCompleted => "action-completed",
            EventKind::ActionFailed => "action-failed",
            EventKind::SubscriberPanicked => "subscriber-panicked",
        }
    }
}

/// Shutdown event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the action (or subscriber), if applicable.
    pub action: Option<Arc<str>>,
    /// Registration index of the action.
    pub index: Option<usize>,
    /// Position of the action within the resolved run order.
    pub position: Option<usize>,
    /// Failure value reported by the action.
    pub error: Option<Arc<ActionError>>,
    /// Human-readable reason (subscriber panics).
    pub reason: Option<Arc<str>>,
    /// Elapsed time in milliseconds (compact).
    pub elapsed_ms: Option<u32>,
    /// Number of actions in the run.
    pub total: Option<usize>,
    /// Number of failed actions in the run.
    pub failures: Option<usize>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            action: None,
            index: None,
            position: None,
            error: None,
            reason: None,
            elapsed_ms: None,
            total: None,
            failures: None,
        }
    }

    /// Attaches an action name.
    #[inline]
    pub fn with_action(mut self, action: impl Into<Arc<str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Attaches a registration index.
    #[inline]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Attaches a position within the resolved order.
    #[inline]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Attaches the failure value.
    #[inline]
    pub fn with_error(mut self, error: impl Into<Arc<ActionError>>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches an elapsed duration (stored as milliseconds).
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.elapsed_ms = Some(ms);
        self
    }

    /// Attaches the number of actions in the run.
    #[inline]
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    /// Attaches the number of failed actions.
    #[inline]
    pub fn with_failures(mut self, failures: usize) -> Self {
        self.failures = Some(failures);
        self
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_action(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_action_failure(&self) -> bool {
        matches!(self.kind, EventKind::ActionFailed)
    }

    #[inline]
    pub fn is_subscriber_panic(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberPanicked)
    }
}
