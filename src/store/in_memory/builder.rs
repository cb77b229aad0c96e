use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::handler::EventHandler;
use crate::store::in_memory::{InMemoryStore, InnerInMemoryStore};
use crate::Aggregate;

/// Struct used to build a brand new [`InMemoryStore`].
pub struct InMemoryStoreBuilder<A>
where
    A: Aggregate,
{
    event_handlers: Vec<Box<dyn EventHandler<A> + Send>>,
}

impl<A> InMemoryStoreBuilder<A>
where
    A: Aggregate,
{
    /// Creates a new instance of an [`InMemoryStoreBuilder`].
    pub fn new() -> Self {
        Self { event_handlers: vec![] }
    }

    /// Set event handlers list
    pub fn with_event_handlers(mut self, event_handlers: Vec<Box<dyn EventHandler<A> + Send>>) -> Self {
        self.event_handlers = event_handlers;
        self
    }

    /// Add a single event handler
    pub fn add_event_handler(mut self, event_handler: impl EventHandler<A> + Send + 'static) -> Self {
        self.event_handlers.push(Box::new(event_handler));
        self
    }

    /// Builds an empty [`InMemoryStore`] running the configured event handlers.
    pub fn build(self) -> InMemoryStore<A> {
        InMemoryStore {
            inner: Arc::new(InnerInMemoryStore {
                streams: RwLock::new(HashMap::new()),
                event_handlers: self.event_handlers,
            }),
        }
    }
}

impl<A> Default for InMemoryStoreBuilder<A>
where
    A: Aggregate,
{
    fn default() -> Self {
        Self::new()
    }
}
