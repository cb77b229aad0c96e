//! The installation aggregate: a connection point whose lifecycle is recorded as events.

pub use aggregate::*;
pub use command::*;
pub use error::*;
pub use event::*;
pub use state::*;
pub use view::*;

mod aggregate;
mod command;
mod error;
mod event;
mod state;
mod view;
