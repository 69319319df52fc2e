//! # Sequence configuration.
//!
//! Provides [`SequenceConfig`] centralized settings for a [`ShutdownSequence`](crate::ShutdownSequence).
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1
//! - `anonymous_prefix = ""` → anonymous names become `-<index>`

use std::borrow::Cow;

/// Default prefix for actions registered without any name.
pub const DEFAULT_ANONYMOUS_PREFIX: &str = "unnamed-shutdown-function";

/// Configuration for a shutdown sequence.
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
/// - `anonymous_prefix`: Prefix of synthesized names (`<prefix>-<index>`)
/// - `catch_panics`: Convert a panicking action into `ActionError::Panicked`
#[derive(Clone, Debug)]
pub struct SequenceConfig {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers obtained from `ShutdownSequence::events()` that lag behind more than
    /// `bus_capacity` events receive `Lagged` and skip older items.
    pub bus_capacity: usize,

    /// Prefix used to synthesize a name for actions registered anonymously
    /// that do not declare a name of their own.
    pub anonymous_prefix: Cow<'static, str>,

    /// Whether a panic inside an action is caught and reported as a failure.
    ///
    /// - `true`: the panic becomes an `ActionFailed` event and the run continues
    /// - `false`: the panic unwinds through `run()`
    pub catch_panics: bool,
}

impl SequenceConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Synthesized name for an anonymous action at `index`.
    #[inline]
    pub fn anonymous_name(&self, index: usize) -> String {
        format!("{}-{index}", self.anonymous_prefix)
    }
}

impl Default for SequenceConfig {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `anonymous_prefix = "unnamed-shutdown-function"`
    /// - `catch_panics = true`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            anonymous_prefix: Cow::Borrowed(DEFAULT_ANONYMOUS_PREFIX),
            catch_panics: true,
        }
    }
}
