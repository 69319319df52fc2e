//! # Event subscribers for a shutdown run.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] observer list
//! and built-in implementations.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Sequencer ── emit(&Event).await ──► SubscriberSet
//!                                         │
//!                            ┌────────────┼────────────┐
//!                            ▼            ▼            ▼
//!                        LogWriter     Listener      Custom ...
//! ```
//!
//! ## Subscriber types
//! - **Closure listeners** - [`Listener`], used by `on_started` / `on_error` / `on_finished`
//! - **Passive subscribers** - observe and react to events (logging, metrics, alerts)

mod listener;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
mod embedded;

pub use listener::Listener;
pub(crate) use set::panic_message;
pub(crate) use set::SubscriberSet;
pub use set::SubscriptionId;
pub use subscriber::Subscribe;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
