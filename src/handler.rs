use std::ops::Deref;

use async_trait::async_trait;

use crate::store::StoreEvent;
use crate::Aggregate;

/// This trait is used to implement an `EventHandler`. An event handler is intended to be an entity
/// which can create and update a read side (a projection) out of the events of an aggregate.
///
/// Event handlers run after the events have been appended, so they can never veto a command.
#[async_trait]
pub trait EventHandler<A>: Sync
where
    A: Aggregate,
{
    /// Handle an event and perform an action. This action could be over a read model or a side-effect.
    /// All the errors should be handled from within the `EventHandler` and shouldn't panic.
    async fn handle(&self, event: &StoreEvent<A::Event>);

    /// The name of the event handler. By default, this is the type name of the event handler,
    /// but it can be overridden to provide a custom name. This name is used as
    /// part of tracing spans, to identify the event handler being run.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[async_trait]
impl<A, Q, T> EventHandler<A> for T
where
    A: Aggregate,
    A::Event: Send + Sync,
    Q: EventHandler<A> + ?Sized,
    T: Deref<Target = Q> + Send + Sync,
{
    /// Deref call to [`EventHandler::handle`].
    async fn handle(&self, event: &StoreEvent<A::Event>) {
        self.deref().handle(event).await;
    }

    /// Deref call to [`EventHandler::name`].
    fn name(&self) -> &'static str {
        self.deref().name()
    }
}
