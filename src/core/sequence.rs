//! # ShutdownSequence: registry, ordering, observers, and the run itself.
//!
//! The [`ShutdownSequence`] owns the action registry, the head/tail name orders,
//! the [`SubscriberSet`] and the event [`Bus`]. It is created once per process (or per
//! shutdown-capable subsystem) and triggered once.
//!
//! ## High-level architecture
//! ```text
//! add_named / add_anonymous / add_fn ──► Registry (registration order)
//! set_head_order / set_tail_order    ──► NameOrder (replaced wholesale)
//! subscribe / on_error / ...         ──► SubscriberSet
//!
//! run():
//!   state: Idle ──► Running            (any other state → SequenceError::AlreadyStarted)
//!   snapshot Registry + NameOrder
//!   order::resolve(snapshot)           (head < middle < tail)
//!   runner::run_all(order)
//!       └─► ShutdownStarted, per action Starting/Completed|Failed, ShutdownFinished
//!   state: Running ──► Finished
//! ```
//!
//! ## Rules
//! - Actions run one at a time; a failed action never stops the run.
//! - Failures are observable only through events (`ActionFailed`).
//! - The registry and orders are snapshotted when the run starts: actions added during
//!   the run are registered but do not execute in it.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use shutdown_sequence::{ActionError, ShutdownSequence};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let seq = ShutdownSequence::new();
//!     let log = Arc::new(Mutex::new(Vec::new()));
//!
//!     for name in ["db", "http", "metrics"] {
//!         let log = Arc::clone(&log);
//!         seq.add_named_fn(name, move || {
//!             let log = Arc::clone(&log);
//!             async move {
//!                 log.lock().unwrap().push(name);
//!                 Ok::<_, ActionError>(())
//!             }
//!         });
//!     }
//!     seq.set_head_order(["http"]);
//!     seq.set_tail_order(["db"]);
//!
//!     seq.on_error(|err, name| eprintln!("{name} failed: {err}"));
//!     seq.run().await?;
//!
//!     assert_eq!(*log.lock().unwrap(), ["http", "metrics", "db"]);
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering as AtomicOrdering};
use std::sync::{Arc, PoisonError, RwLock};

use futures::future::BoxFuture;
use tokio::sync::broadcast;

use crate::actions::{ActionFn, ActionRef};
use crate::core::builder::SequenceBuilder;
use crate::core::config::SequenceConfig;
use crate::core::order::{self, NameOrder};
use crate::core::registry::{ActionInfo, Registry};
use crate::core::runner::{self, Emitter};
use crate::core::shutdown;
use crate::error::{ActionError, SequenceError};
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::{Listener, Subscribe, SubscriberSet, SubscriptionId};

/// Lifecycle of a [`ShutdownSequence`]. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RunState {
    /// Accepting registrations; not triggered yet.
    Idle = 0,
    /// A run is executing actions.
    Running = 1,
    /// The run emitted `ShutdownFinished`.
    Finished = 2,
}

impl RunState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => RunState::Idle,
            1 => RunState::Running,
            _ => RunState::Finished,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Finished => "finished",
        })
    }
}

/// Coordinates registration, ordering, and the single shutdown run.
pub struct ShutdownSequence {
    cfg: SequenceConfig,
    registry: RwLock<Registry>,
    order: RwLock<NameOrder>,
    subs: SubscriberSet,
    bus: Bus,
    state: AtomicU8,
}

impl Default for ShutdownSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSequence {
    /// Creates a sequence with [`SequenceConfig::default`].
    pub fn new() -> Self {
        Self::with_config(SequenceConfig::default())
    }

    /// Creates a sequence with the given configuration.
    pub fn with_config(cfg: SequenceConfig) -> Self {
        Self::new_internal(cfg, Vec::new())
    }

    /// Returns a builder for attaching subscribers up front.
    pub fn builder(cfg: SequenceConfig) -> SequenceBuilder {
        SequenceBuilder::new(cfg)
    }

    pub(crate) fn new_internal(cfg: SequenceConfig, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let subs = SubscriberSet::new(subscribers, bus.clone());
        Self {
            cfg,
            registry: RwLock::new(Registry::default()),
            order: RwLock::new(NameOrder::default()),
            subs,
            bus,
            state: AtomicU8::new(RunState::Idle as u8),
        }
    }

    /// Returns the configuration this sequence was built with.
    pub fn config(&self) -> &SequenceConfig {
        &self.cfg
    }

    // ---------------------------
    // Registration
    // ---------------------------

    /// Registers an action under an explicit name. Names need not be unique.
    pub fn add_named(&self, name: impl Into<String>, action: ActionRef) {
        self.push(Some(name.into()), action);
    }

    /// Registers an action without an explicit name.
    ///
    /// The name is the action's declared [`name`](crate::Action::name) if it has one,
    /// otherwise `"<anonymous_prefix>-<index>"` (`unnamed-shutdown-function-<index>` by default).
    pub fn add_anonymous(&self, action: ActionRef) {
        self.push(None, action);
    }

    /// Registers an async closure anonymously.
    pub fn add_fn<F, Fut>(&self, f: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
    {
        self.add_anonymous(ActionFn::arc(f));
    }

    /// Registers an async closure under an explicit name.
    pub fn add_named_fn<F, Fut>(&self, name: impl Into<String>, f: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
    {
        self.add_named(name, ActionFn::arc(f));
    }

    fn push(&self, name: Option<String>, action: ActionRef) {
        let index = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add(name, action, &self.cfg);
        if self.state() != RunState::Idle {
            tracing::debug!(index, "action registered after shutdown started; it will not run");
        }
    }

    /// Replaces the head order: these names run first, in this order.
    ///
    /// Accepts any ordered collection of names (`["a", "b"]`, `vec![..]`, an iterator, ...).
    pub fn set_head_order<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.order
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .head = names;
    }

    /// Replaces the tail order: these names run last, in this order.
    pub fn set_tail_order<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.order
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .tail = names;
    }

    /// Current head order.
    pub fn head_order(&self) -> Vec<String> {
        self.order
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .head
            .clone()
    }

    /// Current tail order.
    pub fn tail_order(&self) -> Vec<String> {
        self.order
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tail
            .clone()
    }

    /// Registered actions, in registration order.
    pub fn actions(&self) -> Vec<ActionInfo> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .infos()
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if no action is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ---------------------------
    // Observers
    // ---------------------------

    /// Attaches a subscriber; it receives every event emitted from now on.
    pub fn subscribe(&self, sub: Arc<dyn Subscribe>) -> SubscriptionId {
        self.subs.subscribe(sub)
    }

    /// Number of attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subs.len()
    }

    /// Detaches a subscriber. Returns `false` if the handle is unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subs.unsubscribe(id)
    }

    /// Calls `f` once when the run starts, before the first action.
    pub fn on_started<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(Listener::for_kind(
            EventKind::ShutdownStarted,
            move |_| f(),
        )))
    }

    /// Calls `f(error, action_name)` for every failed action, before the next one starts.
    pub fn on_error<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&ActionError, &str) + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(Listener::for_kind(
            EventKind::ActionFailed,
            move |ev: &Event| {
                if let (Some(err), Some(name)) = (ev.error.as_deref(), ev.action.as_deref()) {
                    f(err, name);
                }
            },
        )))
    }

    /// Calls `f` once after the last action settled.
    pub fn on_finished<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(Listener::for_kind(
            EventKind::ShutdownFinished,
            move |_| f(),
        )))
    }

    /// Channel view of every event (including `SubscriberPanicked`), fire-and-forget.
    ///
    /// Only events published after this call are received.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    // ---------------------------
    // Ordering and execution
    // ---------------------------

    /// Computes the run order for the current registry and head/tail orders.
    ///
    /// Pure: calling it twice over unchanged inputs returns identical sequences.
    pub fn resolve_order(&self) -> Vec<ActionInfo> {
        let (entries, order) = self.snapshot();
        order::resolve(entries, &order)
            .iter()
            .map(|e| e.info())
            .collect()
    }

    fn snapshot(&self) -> (Vec<crate::core::registry::Entry>, NameOrder) {
        let entries = self
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot();
        let order = self
            .order
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        (entries, order)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        RunState::from_u8(self.state.load(AtomicOrdering::Acquire))
    }

    /// Runs the shutdown sequence once.
    ///
    /// Completes after `ShutdownFinished` was delivered, regardless of how many actions
    /// failed. Fails only when the sequence was already started.
    ///
    /// Dropping the returned future mid-run leaves the sequence in [`RunState::Running`].
    /// So does a panicking action when [`SequenceConfig::catch_panics`] is `false`: the
    /// panic unwinds through this future and `ShutdownFinished` is never emitted.
    pub async fn run(&self) -> Result<(), SequenceError> {
        if let Err(prev) = self.state.compare_exchange(
            RunState::Idle as u8,
            RunState::Running as u8,
            AtomicOrdering::AcqRel,
            AtomicOrdering::Acquire,
        ) {
            return Err(SequenceError::AlreadyStarted {
                state: RunState::from_u8(prev),
            });
        }

        let (entries, order) = self.snapshot();
        let resolved = order::resolve(entries, &order);
        tracing::debug!(actions = resolved.len(), "shutdown sequence started");

        let out = Emitter {
            subs: &self.subs,
            bus: &self.bus,
        };
        let failures = runner::run_all(resolved, &out, self.cfg.catch_panics).await;

        self.state
            .store(RunState::Finished as u8, AtomicOrdering::Release);
        tracing::debug!(failures, "shutdown sequence finished");
        Ok(())
    }

    /// Bound shutdown entry point: an owned future suitable as a completion callback.
    ///
    /// ```rust
    /// # use std::sync::Arc;
    /// # use shutdown_sequence::ShutdownSequence;
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let seq = Arc::new(ShutdownSequence::new());
    /// let server = async { /* serve until done */ };
    /// let handle = tokio::spawn({
    ///     let seq = Arc::clone(&seq);
    ///     async move {
    ///         server.await;
    ///         seq.shutdown().await
    ///     }
    /// });
    /// handle.await.unwrap().unwrap();
    /// # }
    /// ```
    pub fn shutdown(self: &Arc<Self>) -> BoxFuture<'static, Result<(), SequenceError>> {
        let me = Arc::clone(self);
        Box::pin(async move { me.run().await })
    }

    /// Waits for an OS termination signal, then runs the sequence.
    pub async fn run_on_signal(&self) -> Result<(), SequenceError> {
        let signal = shutdown::wait_for_shutdown_signal().await?;
        tracing::info!(signal, "shutdown signal received");
        self.run().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::SyncActionFn;
    use std::sync::Mutex;
    use std::time::Duration;

    type Log = Arc<Mutex<Vec<i32>>>;

    fn push(seq: &ShutdownSequence, name: Option<&str>, log: &Log, value: i32) {
        let log = Arc::clone(log);
        let action: ActionRef = SyncActionFn::arc(move || {
            log.lock().unwrap().push(value);
            Ok(())
        });
        match name {
            Some(n) => seq.add_named(n, action),
            None => seq.add_anonymous(action),
        }
    }

    fn new_log() -> Log {
        Arc::new(Mutex::new(Vec::new()))
    }

    #[tokio::test]
    async fn runs_in_reverse_registration_order() {
        let seq = ShutdownSequence::new();
        let log = new_log();
        push(&seq, None, &log, 3);
        push(&seq, None, &log, 2);
        push(&seq, None, &log, 1);

        seq.run().await.unwrap();
        assert_eq!(*log.lock().unwrap(), [1, 2, 3]);
        assert_eq!(seq.state(), RunState::Finished);
    }

    #[tokio::test]
    async fn honors_head_and_tail_orders() {
        let seq = ShutdownSequence::new();
        let log = new_log();
        push(&seq, None, &log, 6);
        push(&seq, None, &log, 5);
        push(&seq, None, &log, 4);
        push(&seq, Some("a"), &log, 1);
        push(&seq, Some("b"), &log, 3);
        push(&seq, Some("b"), &log, 2);
        push(&seq, Some("y"), &log, 9);
        push(&seq, Some("x"), &log, 7);
        push(&seq, Some("y"), &log, 8);
        seq.set_head_order(["a", "b"]);
        seq.set_tail_order(vec!["x".to_string(), "y".to_string()]);

        seq.run().await.unwrap();
        assert_eq!(*log.lock().unwrap(), [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[tokio::test]
    async fn later_order_declaration_replaces_earlier_one() {
        let seq = ShutdownSequence::new();
        let log = new_log();
        push(&seq, Some("a"), &log, 1);
        push(&seq, Some("b"), &log, 2);
        seq.set_head_order(["a"]);
        seq.set_head_order(Vec::<String>::new());
        seq.set_tail_order(["b"]);

        assert!(seq.head_order().is_empty());
        assert_eq!(seq.tail_order(), ["b"]);
        seq.run().await.unwrap();
        assert_eq!(*log.lock().unwrap(), [1, 2]);
    }

    #[tokio::test]
    async fn waits_for_async_completion() {
        let seq = ShutdownSequence::new();
        let log = new_log();
        push(&seq, None, &log, 2);
        let slow = Arc::clone(&log);
        seq.add_fn(move || {
            let slow = Arc::clone(&slow);
            async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                slow.lock().unwrap().push(1);
                Ok(())
            }
        });

        seq.run().await.unwrap();
        assert_eq!(*log.lock().unwrap(), [1, 2]);
    }

    #[tokio::test]
    async fn reports_errors_and_proceeds() {
        let seq = ShutdownSequence::new();
        let log = new_log();
        push(&seq, None, &log, 3);
        seq.add_named(
            "func2",
            SyncActionFn::arc(|| -> Result<(), ActionError> { panic!("2") }),
        );
        seq.add_named_fn("func1", || async { Err(ActionError::fail("1")) });

        let seen = Arc::clone(&log);
        seq.on_error(move |err, name| {
            let value: i32 = match err {
                ActionError::Fail { error } => error.parse().unwrap(),
                ActionError::Panicked { info } => info.parse().unwrap(),
            };
            assert_eq!(name, format!("func{value}"));
            seen.lock().unwrap().push(value);
        });

        seq.run().await.unwrap();
        assert_eq!(*log.lock().unwrap(), [1, 2, 3]);
    }

    #[tokio::test]
    async fn lifecycle_signals_bracket_the_actions() {
        let seq = ShutdownSequence::new();
        let trace = Arc::new(Mutex::new(Vec::<String>::new()));

        let t = Arc::clone(&trace);
        seq.on_started(move || t.lock().unwrap().push("started".into()));
        let t = Arc::clone(&trace);
        seq.on_finished(move || t.lock().unwrap().push("finished".into()));
        let t = Arc::clone(&trace);
        seq.on_error(move |_, name| t.lock().unwrap().push(format!("error:{name}")));

        let t = Arc::clone(&trace);
        seq.add_named(
            "ok",
            SyncActionFn::arc(move || {
                t.lock().unwrap().push("ok".into());
                Ok(())
            }),
        );
        seq.add_named_fn("last", || async { Err(ActionError::fail("late")) });

        seq.run().await.unwrap();
        assert_eq!(
            *trace.lock().unwrap(),
            ["started", "error:last", "ok", "finished"]
        );
    }

    #[tokio::test]
    async fn second_run_is_rejected() {
        let seq = ShutdownSequence::new();
        let log = new_log();
        push(&seq, None, &log, 1);

        seq.run().await.unwrap();
        let err = seq.run().await.unwrap_err();
        assert!(matches!(
            err,
            SequenceError::AlreadyStarted {
                state: RunState::Finished
            }
        ));
        assert_eq!(*log.lock().unwrap(), [1]);
    }

    #[tokio::test]
    async fn concurrent_run_is_rejected_while_running() {
        let seq = Arc::new(ShutdownSequence::new());
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let rx = Arc::new(Mutex::new(Some(rx)));
        seq.add_fn(move || {
            let rx = rx.lock().unwrap().take();
            async move {
                if let Some(rx) = rx {
                    let _ = rx.await;
                }
                Ok(())
            }
        });

        let running = tokio::spawn(seq.shutdown());
        while seq.state() != RunState::Running {
            tokio::task::yield_now().await;
        }
        let err = seq.run().await.unwrap_err();
        assert!(matches!(
            err,
            SequenceError::AlreadyStarted {
                state: RunState::Running
            }
        ));

        tx.send(()).unwrap();
        running.await.unwrap().unwrap();
        assert_eq!(seq.state(), RunState::Finished);
    }

    #[tokio::test]
    async fn resolve_order_is_stable() {
        let seq = ShutdownSequence::new();
        let log = new_log();
        for name in ["m", "y", "a", "x", "b", "a"] {
            push(&seq, Some(name), &log, 0);
        }
        push(&seq, None, &log, 0);
        seq.set_head_order(["a", "b"]);
        seq.set_tail_order(["x", "y"]);

        let first = seq.resolve_order();
        let second = seq.resolve_order();
        assert_eq!(first, second);

        let names: Vec<&str> = first.iter().map(|i| &*i.name).collect();
        assert_eq!(
            names,
            ["a", "a", "b", "unnamed-shutdown-function-6", "m", "x", "y"]
        );
        assert_eq!(first[0].index, 5);
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn actions_added_during_run_do_not_execute() {
        let seq = Arc::new(ShutdownSequence::new());
        let log = new_log();
        let inner_seq = Arc::downgrade(&seq);
        let inner_log = Arc::clone(&log);
        seq.add_named(
            "adder",
            SyncActionFn::arc(move || {
                if let Some(seq) = inner_seq.upgrade() {
                    push(&seq, Some("late"), &inner_log, 99);
                }
                inner_log.lock().unwrap().push(1);
                Ok(())
            }),
        );

        seq.run().await.unwrap();
        assert_eq!(*log.lock().unwrap(), [1]);
        assert_eq!(seq.len(), 2);
    }

    #[tokio::test]
    async fn unsubscribed_listener_sees_nothing() {
        let seq = ShutdownSequence::new();
        let hits = Arc::new(Mutex::new(0));
        let h = Arc::clone(&hits);
        let id = seq.on_started(move || *h.lock().unwrap() += 1);
        assert_eq!(seq.subscriber_count(), 1);
        assert!(seq.unsubscribe(id));
        assert_eq!(seq.subscriber_count(), 0);

        seq.run().await.unwrap();
        assert_eq!(*hits.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn events_channel_sees_the_whole_run() {
        let seq = ShutdownSequence::new();
        let mut rx = seq.events();
        seq.add_named_fn("only", || async { Ok(()) });

        seq.run().await.unwrap();

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert_eq!(
            kinds,
            [
                EventKind::ShutdownStarted,
                EventKind::ActionStarting,
                EventKind::ActionCompleted,
                EventKind::ShutdownFinished,
            ]
        );
    }

    #[tokio::test]
    #[should_panic(expected = "not caught")]
    async fn panics_propagate_when_not_caught() {
        let seq = ShutdownSequence::with_config(SequenceConfig {
            catch_panics: false,
            ..SequenceConfig::default()
        });
        seq.add_anonymous(SyncActionFn::arc(|| -> Result<(), ActionError> {
            panic!("not caught")
        }));
        let _ = seq.run().await;
    }

    #[tokio::test]
    async fn uncaught_panic_leaves_the_run_unfinished() {
        let seq = Arc::new(ShutdownSequence::with_config(SequenceConfig {
            catch_panics: false,
            ..SequenceConfig::default()
        }));
        let mut rx = seq.events();
        seq.add_anonymous(SyncActionFn::arc(|| -> Result<(), ActionError> {
            panic!("not caught")
        }));

        let err = tokio::spawn(seq.shutdown()).await.unwrap_err();
        assert!(err.is_panic());
        assert_eq!(seq.state(), RunState::Running);

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert_eq!(kinds, [EventKind::ShutdownStarted, EventKind::ActionStarting]);
    }

    #[tokio::test]
    async fn finish_follows_a_failing_last_action() {
        let seq = ShutdownSequence::new();
        let mut rx = seq.events();
        let trace = Arc::new(Mutex::new(Vec::<String>::new()));

        let t = Arc::clone(&trace);
        seq.on_started(move || t.lock().unwrap().push("started".into()));
        let t = Arc::clone(&trace);
        seq.on_finished(move || t.lock().unwrap().push("finished".into()));
        let t = Arc::clone(&trace);
        seq.on_error(move |_, name| t.lock().unwrap().push(format!("error:{name}")));

        seq.add_named_fn("last", || async { Err(ActionError::fail("late")) });
        let t = Arc::clone(&trace);
        seq.add_named(
            "ok",
            SyncActionFn::arc(move || {
                t.lock().unwrap().push("ok".into());
                Ok(())
            }),
        );

        seq.run().await.unwrap();
        assert_eq!(
            *trace.lock().unwrap(),
            ["started", "ok", "error:last", "finished"]
        );

        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            events.push(ev);
        }
        let finished = events.last().unwrap();
        assert_eq!(finished.kind, EventKind::ShutdownFinished);
        assert_eq!(finished.failures, Some(1));
        let failed = &events[events.len() - 2];
        assert!(failed.is_action_failure());
        assert_eq!(failed.action.as_deref(), Some("last"));
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn sigterm_triggers_the_run() {
        use tokio::signal::unix::{SignalKind, signal};

        // Installs tokio's handler so SIGTERM never reaches the default disposition.
        let _guard = signal(SignalKind::terminate()).unwrap();

        let seq = Arc::new(ShutdownSequence::new());
        let log = new_log();
        push(&seq, Some("db"), &log, 1);

        let runner = tokio::spawn({
            let seq = Arc::clone(&seq);
            async move { seq.run_on_signal().await }
        });
        tokio::time::timeout(Duration::from_secs(5), shutdown::sigterm_until(runner))
            .await
            .expect("run triggered in time")
            .unwrap()
            .unwrap();

        assert_eq!(seq.state(), RunState::Finished);
        assert_eq!(*log.lock().unwrap(), [1]);
    }
}
