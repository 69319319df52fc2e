use std::sync::Arc;

use crate::core::{config::SequenceConfig, sequence::ShutdownSequence};
use crate::subscribers::Subscribe;

/// Builder for constructing a [`ShutdownSequence`] with subscribers attached up front.
pub struct SequenceBuilder {
    cfg: SequenceConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SequenceBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: SequenceConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers, delivered to in this order.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Appends one subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Builds the sequence, ready for registrations.
    pub fn build(self) -> ShutdownSequence {
        ShutdownSequence::new_internal(self.cfg, self.subscribers)
    }
}
