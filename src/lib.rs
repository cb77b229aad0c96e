//! Event sourced installation aggregate.
//!
//! An installation (a physical or contractual connection point) is recorded as an append-only
//! sequence of [`installation::InstallationEvent`]s. Commands are validated against the current
//! [`installation::InstallationState`] by [`Aggregate::handle_command`], and the state is rebuilt by
//! folding the event history through [`Aggregate::apply_event`].
//!
//! Persistence is delegated to an [`store::EventStore`]. [`store::in_memory::InMemoryStore`] is the
//! reference implementation, and [`manager::AggregateManager`] couples an aggregate with its store.

pub use crate::aggregate::Aggregate;
pub use crate::state::AggregateState;

mod aggregate;
mod state;

pub mod handler;
pub mod installation;
pub mod manager;
pub mod store;

pub mod types {
    /// Position of an event within the stream of a single aggregate instance, starting from 1.
    pub type SequenceNumber = i32;
}
