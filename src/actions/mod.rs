//! # Cleanup actions.
//!
//! This module provides the action-related types:
//! - [`Action`] - trait for implementing one async cleanup step
//! - [`ActionFn`] - async-closure-backed action
//! - [`SyncActionFn`] - synchronous-closure-backed action (completes immediately)
//! - [`ActionRef`] - shared reference to an action (`Arc<dyn Action>`)

mod action;
mod action_fn;

pub use action::{Action, ActionRef};
pub use action_fn::{ActionFn, SyncActionFn};
