// Repository traits (ports) for domain aggregates

pub mod agent_repository;

pub use agent_repository::{AgentRepository, StartOutcome};
