//! Sequence core: registry, ordering, and execution.
//!
//! The public API from this module is [`ShutdownSequence`] with its
//! [`SequenceConfig`], [`SequenceBuilder`] and [`RunState`].
//!
//! Internal modules:
//! - [`registry`]: registered actions and their naming;
//! - [`order`]: head/middle/tail resolution into one total order;
//! - [`runner`]: the sequential, fail-and-continue execution loop;
//! - [`sequence`]: the coordinator tying it together;
//! - [`shutdown`]: cross-platform shutdown signal handling.

mod builder;
mod config;
mod order;
mod registry;
mod runner;
mod sequence;
mod shutdown;

pub use builder::SequenceBuilder;
pub use config::{DEFAULT_ANONYMOUS_PREFIX, SequenceConfig};
pub use registry::ActionInfo;
pub use sequence::{RunState, ShutdownSequence};
pub use shutdown::wait_for_shutdown_signal;
