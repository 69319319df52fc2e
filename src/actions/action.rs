//! # Action abstraction.
//!
//! This module defines the [`Action`] trait (async, zero-argument) and the shared
//! handle type [`ActionRef`], an `Arc<dyn Action>` suitable for storing in the registry.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ActionError;

/// Shared handle to an action.
pub type ActionRef = Arc<dyn Action>;

/// # One cleanup step.
///
/// An `Action` performs its cleanup in [`run`](Action::run) and reports the outcome.
/// Returning `Err` does not stop the shutdown run; the error is delivered to
/// subscribers and the next action starts.
///
/// [`name`](Action::name) is the action's *declared* name. It is consulted only when
/// the action is registered without an explicit name.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use shutdown_sequence::{Action, ActionError};
///
/// struct CloseDb;
///
/// #[async_trait]
/// impl Action for CloseDb {
///     fn name(&self) -> Option<&str> { Some("close-db") }
///
///     async fn run(&self) -> Result<(), ActionError> {
///         // pool.close().await ...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Action: Send + Sync + 'static {
    /// Returns the declared name of this action, if it has one.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Performs the cleanup.
    async fn run(&self) -> Result<(), ActionError>;
}
