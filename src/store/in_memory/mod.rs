//! In-memory [`EventStore`](crate::store::EventStore) implementation.
//!
//! Streams are kept in a hash map keyed by aggregate id. Payloads are stored serialized as JSON,
//! so loading an aggregate always goes through the same serialization round trip a durable store
//! would use.

pub use builder::*;
pub use event_store::*;

mod builder;
mod event_store;

use uuid::Uuid;

use crate::types::SequenceNumber;

#[derive(thiserror::Error, Debug)]
pub enum InMemoryStoreError {
    /// Serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The stream moved since the aggregate state was loaded.
    #[error("version conflict on aggregate {aggregate_id}: expected sequence number {expected}, found {actual}")]
    VersionConflict {
        aggregate_id: Uuid,
        expected: SequenceNumber,
        actual: SequenceNumber,
    },
}
