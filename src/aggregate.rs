use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// The Aggregate trait is responsible for validating commands, mapping commands to events, and
/// applying events onto the state.
///
/// An Aggregate should be able to derive its own state from nothing but its initial configuration
/// and its event stream. Applying the same events in the same order to the same aggregate must
/// always yield an identical aggregate state.
///
/// This trait is purposefully _synchronous_. If you are implementing this trait, your aggregate
/// should not have any side effects. If you need side effects, register an
/// [`EventHandler`](crate::handler::EventHandler) on the store instead.
pub trait Aggregate {
    /// The `NAME` is used to identify the aggregate kind in logs and stores.
    const NAME: &'static str;

    /// Internal aggregate state. This will be wrapped in [`AggregateState`](crate::AggregateState)
    /// and could be used to validate commands.
    type State: Default + Clone + Send;

    /// A command is an action that the caller can execute over an aggregate in order to let it
    /// emit an event.
    type Command: Send;

    /// An event represents a fact that took place in the domain. They are the source of truth;
    /// your current state is derived from the events.
    type Event: Serialize + DeserializeOwned + Send + Sync;

    /// This associated type is used to get domain errors while handling a command.
    type Error: std::error::Error + Send + Sync;

    /// Handles, validates a command and emits events.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the user of this library set up command validations. Every error here
    /// could be just a "domain error". No technical errors.
    fn handle_command(state: &Self::State, command: Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Updates the aggregate state using the new event. This assumes that the event can be
    /// correctly applied to the state.
    fn apply_event(state: Self::State, payload: Self::Event) -> Self::State;

    /// Checks that freshly emitted events may be appended to the stream identified by
    /// `aggregate_id`. Called by the manager before persisting. Accepts everything by default.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an event claims an identity other than the stream it is written to.
    fn check_events(_aggregate_id: &Uuid, _events: &[Self::Event]) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Rebuilds the state by folding the given events, in order, over the default state.
    fn replay(events: impl IntoIterator<Item = Self::Event>) -> Self::State {
        events.into_iter().fold(Self::State::default(), Self::apply_event)
    }
}
