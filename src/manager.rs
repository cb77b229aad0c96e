use uuid::Uuid;

use crate::store::{EventStore, StoreEvent};
use crate::{Aggregate, AggregateState};

/// The AggregateManager is responsible for coupling the Aggregate with a Store, so that the events
/// can be persisted when handled, and the state can be reconstructed by loading and apply events sequentially.
///
/// The basic APIs are:
/// 1. handle_command
/// 2. load
/// 3. load_or_default
pub struct AggregateManager<E>
where
    E: EventStore,
{
    event_store: E,
}

impl<E> AggregateManager<E>
where
    E: EventStore,
{
    /// Creates a new instance of an [`AggregateManager`].
    pub fn new(event_store: E) -> Self {
        Self { event_store }
    }

    /// Validates and handles the command onto the given state, and then passes the events to the store.
    ///
    /// A rejected command reaches neither the store nor the state. Otherwise the events are
    /// appended first and only then applied to `aggregate_state`, so the in-memory state never
    /// runs ahead of the recorded history.
    ///
    /// # Errors
    ///
    /// Will return `Err` with the domain error if the aggregate refuses the command, or with the
    /// store error if the events could not be appended.
    #[tracing::instrument(
        skip_all,
        fields(aggregate = <E::Aggregate as Aggregate>::NAME, aggregate_id = %aggregate_state.id())
    )]
    pub async fn handle_command<Er>(
        &self,
        aggregate_state: &mut AggregateState<<E::Aggregate as Aggregate>::State>,
        command: <E::Aggregate as Aggregate>::Command,
    ) -> Result<(), Er>
    where
        Er: From<E::Error> + From<<E::Aggregate as Aggregate>::Error>,
    {
        let events: Vec<<E::Aggregate as Aggregate>::Event> =
            match <E::Aggregate as Aggregate>::handle_command(aggregate_state.inner(), command) {
                Ok(events) => events,
                Err(error) => {
                    tracing::debug!(%error, "command rejected");
                    return Err(error.into());
                }
            };

        if let Err(error) = <E::Aggregate as Aggregate>::check_events(aggregate_state.id(), &events) {
            tracing::debug!(%error, "events do not belong to the stream");
            return Err(error.into());
        }

        let store_events: Vec<StoreEvent<<E::Aggregate as Aggregate>::Event>> =
            self.event_store.persist(aggregate_state, events).await?;

        aggregate_state.apply_payloads(
            store_events.into_iter().map(|store_event| store_event.payload),
            <E::Aggregate as Aggregate>::apply_event,
        );

        Ok(())
    }

    /// Loads an aggregate instance from the event store, by applying previously persisted events onto
    /// the aggregate state by order of their sequence number.
    ///
    /// Returns `None` if the aggregate has no history.
    pub async fn load(
        &self,
        aggregate_id: impl Into<Uuid> + Send,
    ) -> Result<Option<AggregateState<<E::Aggregate as Aggregate>::State>>, E::Error> {
        let aggregate_id: Uuid = aggregate_id.into();

        let store_events: Vec<StoreEvent<<E::Aggregate as Aggregate>::Event>> =
            self.event_store.by_aggregate_id(aggregate_id).await?;

        Ok(if store_events.is_empty() {
            None
        } else {
            let aggregate_state = AggregateState::with_id(aggregate_id);
            Some(aggregate_state.apply_store_events(store_events, <E::Aggregate as Aggregate>::apply_event))
        })
    }

    /// Same as [`AggregateManager::load`], but returns a fresh state bound to `aggregate_id` when
    /// the aggregate has no history yet.
    pub async fn load_or_default(
        &self,
        aggregate_id: impl Into<Uuid> + Send,
    ) -> Result<AggregateState<<E::Aggregate as Aggregate>::State>, E::Error> {
        let aggregate_id: Uuid = aggregate_id.into();

        Ok(self
            .load(aggregate_id)
            .await?
            .unwrap_or_else(|| AggregateState::with_id(aggregate_id)))
    }

    /// Returns the internal event store
    pub fn event_store(&self) -> &E {
        &self.event_store
    }
}
