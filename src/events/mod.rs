//! Shutdown events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! observe a shutdown run without registering a subscriber.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publisher**: the sequencer loop (`core::runner`) and the subscriber set (panics).
//! - **Consumers**: `SubscriberSet` (awaited, ordered) and
//!   [`ShutdownSequence::events`](crate::ShutdownSequence::events) receivers.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
