use std::sync::Arc;
use tokio::task::JoinHandle;

use super::errors::{AgentError, AgentResult};
use super::executor::StepExecutor;
use super::plan;
use crate::domain::agent::{Agent, AgentEvent, StepStatus};
use crate::domain::repositories::{AgentRepository, StartOutcome};

/// Drives agents from `idle` to a terminal state, one step at a time
///
/// The runner works on a private copy of the agent and publishes a fresh
/// snapshot to the repository after every state change. Once a run has
/// started, nothing else writes that agent's record.
pub struct AgentRunner {
    repository: Arc<dyn AgentRepository>,
    executor: Arc<dyn StepExecutor>,
}

impl AgentRunner {
    pub fn new(repository: Arc<dyn AgentRepository>, executor: Arc<dyn StepExecutor>) -> Self {
        Self {
            repository,
            executor,
        }
    }

    /// Launch a run in the background without waiting for it
    ///
    /// Errors cannot reach the caller, so they are logged here. The run
    /// itself executes in a nested task: if it panics, the agent is marked
    /// failed instead of being left running.
    pub fn spawn(self: &Arc<Self>, agent_id: String) -> JoinHandle<()> {
        let runner = Arc::clone(self);
        tokio::spawn(async move {
            let worker = Arc::clone(&runner);
            let id = agent_id.clone();
            match tokio::spawn(async move { worker.run(&id).await }).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!(agent_id = %agent_id, error = %e, "Agent execution failed");
                }
                Err(e) => {
                    tracing::error!(agent_id = %agent_id, error = %e, "Agent execution panicked");
                    if let Err(e) = runner.abandon(&agent_id, "Agent execution panicked").await {
                        tracing::error!(
                            agent_id = %agent_id,
                            error = %e,
                            "Failed to mark abandoned agent as failed"
                        );
                    }
                }
            }
        })
    }

    /// Run an agent to completion
    ///
    /// # Errors
    /// - `AgentNotFound` if the id is unknown; nothing is modified
    /// - `InvalidStateTransition` if the agent is not idle; nothing is modified
    /// - any executor error, after the failing step and the agent have both
    ///   been marked failed
    pub async fn run(&self, agent_id: &str) -> AgentResult<()> {
        let outcome = self
            .repository
            .start(agent_id, plan::steps_for_task)
            .await
            .map_err(AgentError::Repository)?;

        let mut agent = match outcome {
            StartOutcome::Started { agent, event } => {
                self.record(&agent, &event);
                agent
            }
            StartOutcome::NotFound => return Err(AgentError::AgentNotFound(agent_id.to_string())),
            StartOutcome::Rejected(reason) => {
                return Err(AgentError::InvalidStateTransition(reason))
            }
        };

        let outcome = match self.execute_steps(&mut agent).await {
            Ok(()) => agent.complete().map_err(AgentError::InvalidStateTransition),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(event) => self.publish(&agent, event).await,
            Err(err) => {
                // No agent may be left running once its run gives up.
                if let Ok(event) = agent.fail(err.to_string()) {
                    self.publish(&agent, event).await?;
                }
                Err(err)
            }
        }
    }

    async fn execute_steps(&self, agent: &mut Agent) -> AgentResult<()> {
        for index in 0..agent.steps().len() {
            let event = agent
                .start_step(index)
                .map_err(AgentError::InvalidStateTransition)?;
            self.publish(agent, event).await?;

            match self
                .executor
                .execute(agent.task(), &agent.steps()[index])
                .await
            {
                Ok(output) => {
                    let event = agent
                        .complete_step(index, output)
                        .map_err(AgentError::InvalidStateTransition)?;
                    self.publish(agent, event).await?;
                }
                Err(err) => {
                    let event = agent
                        .fail_step(index, err.to_string())
                        .map_err(AgentError::InvalidStateTransition)?;
                    self.publish(agent, event).await?;
                    return Err(err);
                }
            }
        }

        Ok(())
    }

    /// Move an agent whose run died mid-flight to `failed`, failing the
    /// step it was on
    async fn abandon(&self, agent_id: &str, reason: &str) -> AgentResult<()> {
        let Some(mut agent) = self
            .repository
            .find_by_id(agent_id)
            .await
            .map_err(AgentError::Repository)?
        else {
            return Ok(());
        };
        if agent.status().is_terminal() {
            return Ok(());
        }

        if let Some(index) = agent
            .steps()
            .iter()
            .position(|step| step.status() == StepStatus::Running)
        {
            let event = agent
                .fail_step(index, reason.to_string())
                .map_err(AgentError::InvalidStateTransition)?;
            self.publish(&agent, event).await?;
        }

        let event = agent
            .fail(reason.to_string())
            .map_err(AgentError::InvalidStateTransition)?;
        self.publish(&agent, event).await
    }

    async fn publish(&self, agent: &Agent, event: AgentEvent) -> AgentResult<()> {
        self.record(agent, &event);
        self.repository
            .save(agent)
            .await
            .map_err(AgentError::Repository)
    }

    fn record(&self, agent: &Agent, event: &AgentEvent) {
        match event {
            AgentEvent::StepFailed { reason, .. } | AgentEvent::Failed { reason, .. } => {
                tracing::warn!(
                    agent_id = event.agent_id(),
                    event = event.kind(),
                    reason = %reason,
                    "agent event"
                );
            }
            _ => {
                tracing::info!(
                    agent_id = event.agent_id(),
                    event = event.kind(),
                    status = %agent.status(),
                    "agent event"
                );
            }
        }
    }
}
