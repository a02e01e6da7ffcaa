/// Domain events raised by the Agent aggregate
///
/// The runner records each event as it happens, which gives operators a
/// step-by-step trail of every run.
///
/// # Example
/// ```
/// use agentflow_api::domain::agent::AgentEvent;
///
/// let event = AgentEvent::StepStarted {
///     agent_id: "agent_1_abc".to_string(),
///     step_id: "1".to_string(),
/// };
/// assert_eq!(event.agent_id(), "agent_1_abc");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// Fired when an agent record is created
    Created {
        agent_id: String,
        name: String,
    },
    /// Fired when the runner picks the agent up and assigns its steps
    Started {
        agent_id: String,
        step_count: usize,
    },
    StepStarted {
        agent_id: String,
        step_id: String,
    },
    StepCompleted {
        agent_id: String,
        step_id: String,
    },
    StepFailed {
        agent_id: String,
        step_id: String,
        reason: String,
    },
    /// Fired once every step has completed
    Completed {
        agent_id: String,
    },
    /// Fired when the run ends early because of an error
    Failed {
        agent_id: String,
        reason: String,
    },
}

impl AgentEvent {
    /// Returns the agent_id for this event
    pub fn agent_id(&self) -> &str {
        match self {
            AgentEvent::Created { agent_id, .. }
            | AgentEvent::Started { agent_id, .. }
            | AgentEvent::StepStarted { agent_id, .. }
            | AgentEvent::StepCompleted { agent_id, .. }
            | AgentEvent::StepFailed { agent_id, .. }
            | AgentEvent::Completed { agent_id }
            | AgentEvent::Failed { agent_id, .. } => agent_id,
        }
    }

    /// Short machine-friendly name, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            AgentEvent::Created { .. } => "created",
            AgentEvent::Started { .. } => "started",
            AgentEvent::StepStarted { .. } => "step_started",
            AgentEvent::StepCompleted { .. } => "step_completed",
            AgentEvent::StepFailed { .. } => "step_failed",
            AgentEvent::Completed { .. } => "completed",
            AgentEvent::Failed { .. } => "failed",
        }
    }
}
