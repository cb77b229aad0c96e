use std::ops::Deref;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::state::AggregateState;
use crate::types::SequenceNumber;
use crate::Aggregate;

pub mod in_memory;

/// An EventStore is responsible for persisting events that an aggregate emits, and loading the
/// events that represent an aggregate's history.
///
/// Ordering and versioning of the events is the store's duty: the aggregate only produces new
/// events and applies the ones it gets back.
#[async_trait]
pub trait EventStore {
    type Aggregate: Aggregate;
    type Error: std::error::Error + Send;

    /// Loads the events that an aggregate instance has emitted in the past, ordered by their
    /// sequence number.
    async fn by_aggregate_id(
        &self,
        aggregate_id: Uuid,
    ) -> Result<Vec<StoreEvent<<Self::Aggregate as Aggregate>::Event>>, Self::Error>;

    /// Persists multiple events. This should be done atomically - either all the events are
    /// persisted correctly, or none are.
    ///
    /// The sequence number of the given `aggregate_state` is the version the caller expects the
    /// stream to be at. Implementations must fail if the stream moved in the meantime, and must
    /// advance the sequence number of `aggregate_state` on success.
    async fn persist(
        &self,
        aggregate_state: &mut AggregateState<<Self::Aggregate as Aggregate>::State>,
        events: Vec<<Self::Aggregate as Aggregate>::Event>,
    ) -> Result<Vec<StoreEvent<<Self::Aggregate as Aggregate>::Event>>, Self::Error>;
}

/// Blanket implementation making an [`EventStore`] every (smart) pointer to an [`EventStore`],
/// e.g. `&Store`, `Box<Store>`, `Arc<Store>`.
#[async_trait]
impl<A, E, T, S> EventStore for T
where
    A: Aggregate,
    A::Event: 'static,
    A::State: 'static,
    E: std::error::Error + Send,
    S: EventStore<Aggregate = A, Error = E> + ?Sized + Sync,
    T: Deref<Target = S> + Sync,
{
    type Aggregate = A;
    type Error = E;

    /// Deref call to [`EventStore::by_aggregate_id`].
    async fn by_aggregate_id(&self, aggregate_id: Uuid) -> Result<Vec<StoreEvent<A::Event>>, Self::Error> {
        self.deref().by_aggregate_id(aggregate_id).await
    }

    /// Deref call to [`EventStore::persist`].
    async fn persist(
        &self,
        aggregate_state: &mut AggregateState<A::State>,
        events: Vec<A::Event>,
    ) -> Result<Vec<StoreEvent<A::Event>>, Self::Error> {
        self.deref().persist(aggregate_state, events).await
    }
}

/// A `StoreEvent` contains the payload (the original event) alongside the event's metadata.
#[derive(Clone, Debug)]
pub struct StoreEvent<Event> {
    /// Uniquely identifies an event among all events emitted from all aggregates.
    pub id: Uuid,
    /// The aggregate instance that emitted the event.
    pub aggregate_id: Uuid,
    /// The original, emitted, event.
    pub payload: Event,
    /// The timestamp of when the event is persisted.
    pub occurred_on: DateTime<Utc>,
    /// The sequence number of the event, within its specific aggregate instance.
    pub sequence_number: SequenceNumber,
}

impl<Event> StoreEvent<Event> {
    /// Returns the sequence number of the event, within its specific aggregate instance.
    pub const fn sequence_number(&self) -> &SequenceNumber {
        &self.sequence_number
    }

    /// Returns the original, emitted, event.
    pub const fn payload(&self) -> &Event {
        &self.payload
    }
}
