use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::Instrument;
use uuid::Uuid;

use crate::handler::EventHandler;
use crate::store::in_memory::{InMemoryStoreBuilder, InMemoryStoreError};
use crate::store::{EventStore, StoreEvent};
use crate::types::SequenceNumber;
use crate::{Aggregate, AggregateState};

/// In-memory implementation of the [`EventStore`].
///
/// The store is protected by an [`Arc`] that allows it to be cloneable still having the same memory
/// reference. Appends are checked against the sequence number of the given aggregate state
/// (optimistic concurrency): if another writer appended in the meantime, nothing is written.
pub struct InMemoryStore<A>
where
    A: Aggregate,
{
    pub(super) inner: Arc<InnerInMemoryStore<A>>,
}

pub(super) struct InnerInMemoryStore<A>
where
    A: Aggregate,
{
    pub(super) streams: RwLock<HashMap<Uuid, Vec<StoredEvent>>>,
    pub(super) event_handlers: Vec<Box<dyn EventHandler<A> + Send>>,
}

/// An event as kept by the store, with a serialized payload.
#[derive(Clone, Debug)]
pub(super) struct StoredEvent {
    id: Uuid,
    aggregate_id: Uuid,
    payload: Value,
    occurred_on: DateTime<Utc>,
    sequence_number: SequenceNumber,
}

impl StoredEvent {
    fn try_into_store_event<E: DeserializeOwned>(self) -> Result<StoreEvent<E>, serde_json::Error> {
        Ok(StoreEvent {
            id: self.id,
            aggregate_id: self.aggregate_id,
            payload: serde_json::from_value::<E>(self.payload)?,
            occurred_on: self.occurred_on,
            sequence_number: self.sequence_number,
        })
    }
}

impl<A> InMemoryStore<A>
where
    A: Aggregate,
{
    /// Creates a store without event handlers. Use [`InMemoryStoreBuilder`] to register some.
    pub fn new() -> Self {
        InMemoryStoreBuilder::new().build()
    }

    /// Returns the current sequence number of the stream of the given aggregate, 0 if the stream
    /// is empty.
    pub async fn stream_version(&self, aggregate_id: Uuid) -> SequenceNumber {
        let streams = self.inner.streams.read().await;
        Self::version_of(streams.get(&aggregate_id))
    }

    fn version_of(stream: Option<&Vec<StoredEvent>>) -> SequenceNumber {
        stream
            .and_then(|events| events.last())
            .map(|event| event.sequence_number)
            .unwrap_or(0)
    }
}

impl<A> Default for InMemoryStore<A>
where
    A: Aggregate,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<A> EventStore for InMemoryStore<A>
where
    A: Aggregate,
    A::State: Send,
    A::Event: Send + Sync,
{
    type Aggregate = A;
    type Error = InMemoryStoreError;

    async fn by_aggregate_id(&self, aggregate_id: Uuid) -> Result<Vec<StoreEvent<A::Event>>, Self::Error> {
        let stored: Vec<StoredEvent> = self
            .inner
            .streams
            .read()
            .await
            .get(&aggregate_id)
            .cloned()
            .unwrap_or_default();

        Ok(stored
            .into_iter()
            .map(StoredEvent::try_into_store_event)
            .collect::<Result<Vec<StoreEvent<A::Event>>, serde_json::Error>>()?)
    }

    #[tracing::instrument(skip_all, fields(aggregate = A::NAME, aggregate_id = %aggregate_state.id()), err)]
    async fn persist(
        &self,
        aggregate_state: &mut AggregateState<A::State>,
        events: Vec<A::Event>,
    ) -> Result<Vec<StoreEvent<A::Event>>, Self::Error> {
        if events.is_empty() {
            return Ok(vec![]);
        }

        let aggregate_id: Uuid = *aggregate_state.id();
        let occurred_on: DateTime<Utc> = Utc::now();

        // Serialize everything up front: a failure here must leave the stream untouched.
        let payloads: Vec<Value> = events
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, serde_json::Error>>()?;

        let mut store_events: Vec<StoreEvent<A::Event>> = Vec::with_capacity(events.len());

        {
            let mut streams = self.inner.streams.write().await;

            let expected: SequenceNumber = *aggregate_state.sequence_number();
            let actual: SequenceNumber = Self::version_of(streams.get(&aggregate_id));

            if expected != actual {
                tracing::error!(expected, actual, "stream moved since the aggregate was loaded");

                return Err(InMemoryStoreError::VersionConflict {
                    aggregate_id,
                    expected,
                    actual,
                });
            }

            let stream = streams.entry(aggregate_id).or_default();

            for (event, payload) in events.into_iter().zip(payloads) {
                let id: Uuid = Uuid::new_v4();
                let sequence_number: SequenceNumber = aggregate_state.next_sequence_number();

                stream.push(StoredEvent {
                    id,
                    aggregate_id,
                    payload,
                    occurred_on,
                    sequence_number,
                });

                store_events.push(StoreEvent {
                    id,
                    aggregate_id,
                    payload: event,
                    occurred_on,
                    sequence_number,
                });
            }
        }

        tracing::debug!(appended = store_events.len(), "events appended to stream");

        for store_event in &store_events {
            for event_handler in &self.inner.event_handlers {
                let span = tracing::debug_span!(
                    "installation.event_handler",
                    event_id = %store_event.id,
                    aggregate_id = %store_event.aggregate_id,
                    event_handler = event_handler.name()
                );

                event_handler.handle(store_event).instrument(span).await;
            }
        }

        Ok(store_events)
    }
}

/// Debug implementation for [`InMemoryStore`]. Streams are not printed, only the registered
/// handlers.
impl<A: Aggregate> std::fmt::Debug for InMemoryStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers: Vec<&'static str> = self.inner.event_handlers.iter().map(|h| h.name()).collect();

        f.debug_struct("InMemoryStore")
            .field("aggregate", &A::NAME)
            .field("event_handlers", &handlers)
            .finish()
    }
}

impl<A> Clone for InMemoryStore<A>
where
    A: Aggregate,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
