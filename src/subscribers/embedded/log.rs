//! # LogWriter: event renderer on top of `tracing`
//!
//! A minimal subscriber that writes incoming [`Event`]s through `tracing`.
//! Failures are logged at `warn`, everything else at `info`.
//!
//! ## Example output
//! ```text
//! INFO [shutdown-started] total=3
//! INFO [starting] action="http-server" index=2 position=0
//! INFO [completed] action="http-server" elapsed_ms=12
//! WARN [failed] action="cache" err="action failed: disk full"
//! INFO [shutdown-finished] total=3 failures=1
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let action = e.action.as_deref().unwrap_or("unknown");
        match e.kind {
            EventKind::ShutdownStarted => {
                tracing::info!("[shutdown-started] total={}", e.total.unwrap_or(0));
            }
            EventKind::ActionStarting => {
                tracing::info!(
                    "[starting] action={action:?} index={:?} position={:?}",
                    e.index,
                    e.position
                );
            }
            EventKind::ActionCompleted => {
                tracing::info!(
                    "[completed] action={action:?} elapsed_ms={}",
                    e.elapsed_ms.unwrap_or(0)
                );
            }
            EventKind::ActionFailed => {
                let err = e.error.as_deref().map(ToString::to_string);
                tracing::warn!("[failed] action={action:?} err={:?}", err.unwrap_or_default());
            }
            EventKind::ShutdownFinished => {
                tracing::info!(
                    "[shutdown-finished] total={} failures={}",
                    e.total.unwrap_or(0),
                    e.failures.unwrap_or(0)
                );
            }
            EventKind::SubscriberPanicked => {
                tracing::warn!(
                    "[subscriber-panicked] subscriber={action} info={}",
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
