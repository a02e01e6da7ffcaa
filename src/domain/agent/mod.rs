// Agent domain module
// Contains the agent aggregate root, its steps, value objects, and domain events

#![allow(clippy::module_inception)]

pub mod agent;
pub mod events;
pub mod step;
pub mod value_objects;

// Re-export main types for convenience
pub use agent::Agent;
pub use events::AgentEvent;
pub use step::Step;
pub use value_objects::{AgentStatus, StepStatus};
