//! Topic-based event bus for progression events.
//!
//! The path engine publishes completions here; hosts subscribe to the topics
//! they care about (announcements, audit logs, rank displays).

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{PathEvent, RequirementEvent};
