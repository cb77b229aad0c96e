use uuid::Uuid;

use crate::store::StoreEvent;
use crate::types::SequenceNumber;

/// The internal state for an Aggregate.
///
/// It contains:
/// - an id uniquely representing the aggregate instance (its event stream),
/// - an incremental sequence number,
/// - the state defined by the user of this library.
#[derive(Clone, Debug)]
pub struct AggregateState<S> {
    id: Uuid,
    sequence_number: SequenceNumber,
    inner: S,
}

/// Default implementation for [`AggregateState`]
impl<S: Default> Default for AggregateState<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Default> AggregateState<S> {
    /// Creates a new instance of an [`AggregateState`] with a new unique id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates a new instance of an [`AggregateState`] with the given aggregate id. Use this when
    /// the stream id must match an id chosen by the caller.
    #[must_use]
    pub fn with_id(id: impl Into<Uuid>) -> Self {
        Self {
            id: id.into(),
            sequence_number: 0,
            inner: Default::default(),
        }
    }

    /// Consumes the aggregate state and generates a new one with the events applied to it,
    /// in the order they are given.
    #[must_use]
    pub fn apply_store_events<T, F>(self, store_events: Vec<StoreEvent<T>>, function: F) -> Self
    where
        F: Fn(S, T) -> S,
    {
        store_events.into_iter().fold(self, |state, store_event| {
            let sequence_number = store_event.sequence_number;
            let inner = function(state.inner, store_event.payload);

            Self {
                sequence_number: sequence_number.max(state.sequence_number),
                inner,
                ..state
            }
        })
    }
}

impl<S> AggregateState<S> {
    /// Returns the aggregate id.
    pub const fn id(&self) -> &Uuid {
        &self.id
    }

    /// Returns the internal state.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Consumes self and returns the internal state.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Returns the sequence number of the last event applied to this state.
    pub const fn sequence_number(&self) -> &SequenceNumber {
        &self.sequence_number
    }

    /// Computes and sets the next sequence number, returning it.
    pub(crate) fn next_sequence_number(&mut self) -> SequenceNumber {
        self.sequence_number += 1;
        self.sequence_number
    }
}

impl<S: Default> AggregateState<S> {
    /// Applies freshly persisted payloads in place. The sequence number is left untouched since
    /// the store already advanced it while appending.
    pub(crate) fn apply_payloads<T, F>(&mut self, payloads: impl IntoIterator<Item = T>, function: F)
    where
        F: Fn(S, T) -> S,
    {
        let inner: S = std::mem::take(&mut self.inner);
        self.inner = payloads.into_iter().fold(inner, function);
    }
}
