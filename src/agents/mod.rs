// Agent execution modules
//
// The runner walks an agent through its step plan; executors do the work
// behind each step.

pub mod errors;
pub mod executor;
pub mod plan;
pub mod runner;

// Re-export main types
pub use errors::{AgentError, AgentResult};
pub use executor::{SimulatedExecutor, StepExecutor};
pub use runner::AgentRunner;
