//! # Event subscriber trait.
//!
//! Provides [`Subscribe`] an extension point for plugging observers into a shutdown run.
//!
//! ## Delivery model
//! ```text
//! Sequencer ──► SubscriberSet::emit(&Event).await
//!                  ├─► sub1.on_event(&Event).await
//!                  ├─► sub2.on_event(&Event).await   (subscription order)
//!                  └─► subN.on_event(&Event).await
//!                         └─► panic caught → EventKind::SubscriberPanicked (bus only)
//! ```
//!
//! ## Rules
//! - Delivery is **awaited**: the run does not proceed until every subscriber handled the event.
//!   An `ActionFailed` observer therefore runs before the next action starts.
//! - A slow subscriber slows the whole run; keep handlers short.
//! - Panics are caught and never abort the run.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use shutdown_sequence::{Event, EventKind, Subscribe};
//!
//! struct Alerts;
//!
//! #[async_trait]
//! impl Subscribe for Alerts {
//!     async fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::ActionFailed) {
//!             // page someone
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "alerts" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Event subscriber for shutdown observability.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called inline by the sequencer; events arrive in emission order.
    async fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in logs and panic events.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
