use async_trait::async_trait;

use crate::domain::agent::{Agent, AgentEvent, Step};

/// Result of trying to start an agent through the repository
#[derive(Debug)]
pub enum StartOutcome {
    /// The agent moved to running; carries the stored snapshot
    Started { agent: Agent, event: AgentEvent },
    NotFound,
    /// The agent exists but could not start (it is not idle)
    Rejected(String),
}

/// Repository trait for the Agent aggregate
///
/// Defines the contract for storing and retrieving agents. Records handed
/// out are snapshots; writing one back goes through [`save`](Self::save).
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Save an agent (insert or replace the stored snapshot)
    async fn save(&self, agent: &Agent) -> Result<(), String>;

    /// Find an agent by its exact ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Agent>, String>;

    /// Find all agents, in the order they were first saved
    async fn find_all(&self) -> Result<Vec<Agent>, String>;

    /// Atomically start an idle agent with the steps `plan` builds from its task
    ///
    /// The status check and the write happen under one lock, so at most one
    /// caller ever starts a given agent.
    async fn start(&self, id: &str, plan: for<'p> fn(&'p str) -> Vec<Step>) -> Result<StartOutcome, String>;

    /// Number of stored agents
    async fn count(&self) -> Result<usize, String>;

    /// Create and register a new idle agent
    async fn create(&self, name: String, task: String) -> Result<Agent, String> {
        let (agent, events) = Agent::new(name, task);
        for event in &events {
            tracing::debug!(agent_id = event.agent_id(), event = event.kind(), "agent event");
        }

        self.save(&agent).await?;
        Ok(agent)
    }
}
