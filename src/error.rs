//! Error types used by the shutdown sequence and its actions.
//!
//! This module defines two main error enums:
//!
//! - [`SequenceError`]: errors raised by the coordinator itself (a run that cannot start).
//! - [`ActionError`]: errors raised by individual cleanup actions.
//!
//! Action errors never abort a run: the sequencer reports them through
//! [`EventKind::ActionFailed`](crate::EventKind::ActionFailed) and moves on.
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::io;

use thiserror::Error;

use crate::core::RunState;

/// # Errors produced by the shutdown coordinator.
///
/// A run can only fail to *start*; once started it always completes.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SequenceError {
    /// `run()` was called on a sequence that already left the idle state.
    #[error("shutdown sequence already started (state: {state})")]
    AlreadyStarted {
        /// State observed when the second run was attempted.
        state: RunState,
    },

    /// Registering OS signal listeners failed.
    #[error("failed to listen for shutdown signal: {0}")]
    Signal(#[from] io::Error),
}

impl SequenceError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use shutdown_sequence::{RunState, SequenceError};
    ///
    /// let err = SequenceError::AlreadyStarted { state: RunState::Finished };
    /// assert_eq!(err.as_label(), "sequence_already_started");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SequenceError::AlreadyStarted { .. } => "sequence_already_started",
            SequenceError::Signal(_) => "sequence_signal",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SequenceError::AlreadyStarted { state } => format!("already started: {state}"),
            SequenceError::Signal(e) => format!("signal: {e}"),
        }
    }
}

/// # Errors produced by cleanup actions.
///
/// The value travels unchanged to every subscriber of
/// [`EventKind::ActionFailed`](crate::EventKind::ActionFailed).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The action reported a failure.
    #[error("action failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The action panicked while running (only when panics are caught).
    #[error("action panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl ActionError {
    /// Builds an [`ActionError::Fail`] from anything printable.
    ///
    /// # Example
    /// ```
    /// use shutdown_sequence::ActionError;
    ///
    /// let io = std::io::Error::other("disk gone");
    /// let err = ActionError::fail(io);
    /// assert_eq!(err.as_message(), "error: disk gone");
    /// ```
    pub fn fail(error: impl std::fmt::Display) -> Self {
        ActionError::Fail {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ActionError::Fail { .. } => "action_failed",
            ActionError::Panicked { .. } => "action_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ActionError::Fail { error } => format!("error: {error}"),
            ActionError::Panicked { info } => format!("panic: {info}"),
        }
    }

    /// True if the failure came from a caught panic rather than a returned error.
    pub fn is_panic(&self) -> bool {
        matches!(self, ActionError::Panicked { .. })
    }
}

impl From<String> for ActionError {
    fn from(error: String) -> Self {
        ActionError::Fail { error }
    }
}

impl From<&str> for ActionError {
    fn from(error: &str) -> Self {
        ActionError::Fail {
            error: error.to_owned(),
        }
    }
}
