//! # Closure-backed actions (`ActionFn`, `SyncActionFn`)
//!
//! [`ActionFn`] wraps a closure `F: Fn() -> Fut`, producing a fresh future per run.
//! [`SyncActionFn`] wraps a closure `F: Fn() -> Result<(), ActionError>`; its return
//! counts as immediate completion.
//!
//! ## Example
//! ```rust
//! use shutdown_sequence::{Action, ActionError, ActionFn, ActionRef, SyncActionFn};
//!
//! let flush: ActionRef = ActionFn::arc(|| async {
//!     // flush buffers...
//!     Ok::<_, ActionError>(())
//! });
//! assert_eq!(flush.name(), None);
//!
//! let log: ActionRef = SyncActionFn::named_arc("log-bye", || {
//!     println!("bye");
//!     Ok::<_, ActionError>(())
//! });
//! assert_eq!(log.name(), Some("log-bye"));
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::actions::action::Action;
use crate::error::ActionError;

/// Async-closure-backed action.
#[derive(Debug)]
pub struct ActionFn<F> {
    name: Option<Cow<'static, str>>,
    f: F,
}

impl<F, Fut> ActionFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
{
    /// Creates an action without a declared name.
    pub fn new(f: F) -> Self {
        Self { name: None, f }
    }

    /// Creates an action with a declared name.
    pub fn named(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: Some(name.into()),
            f,
        }
    }

    /// Creates an unnamed action and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }

    /// Creates a named action and returns it as a shared handle.
    pub fn named_arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::named(name, f))
    }
}

#[async_trait]
impl<F, Fut> Action for ActionFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
{
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    async fn run(&self) -> Result<(), ActionError> {
        (self.f)().await
    }
}

/// Synchronous-closure-backed action.
#[derive(Debug)]
pub struct SyncActionFn<F> {
    name: Option<Cow<'static, str>>,
    f: F,
}

impl<F> SyncActionFn<F>
where
    F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
{
    /// Creates an action without a declared name.
    pub fn new(f: F) -> Self {
        Self { name: None, f }
    }

    /// Creates an action with a declared name.
    pub fn named(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: Some(name.into()),
            f,
        }
    }

    /// Creates an unnamed action and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }

    /// Creates a named action and returns it as a shared handle.
    pub fn named_arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::named(name, f))
    }
}

#[async_trait]
impl<F> Action for SyncActionFn<F>
where
    F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
{
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    async fn run(&self) -> Result<(), ActionError> {
        (self.f)()
    }
}
