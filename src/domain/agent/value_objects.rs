use serde::{Deserialize, Serialize};

/// Lifecycle status of an agent
///
/// # Status Transitions
/// ```text
/// Idle -> Running -> Completed
///            └-----> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Agent has been created but its run has not started
    Idle,
    /// Agent is working through its steps
    Running,
    /// Every step finished successfully
    Completed,
    /// A step failed and the run was abandoned
    Failed,
}

impl AgentStatus {
    /// Checks if a transition from current status to next status is valid
    ///
    /// # Valid Transitions
    /// - Idle -> Running
    /// - Running -> Completed
    /// - Running -> Failed
    ///
    /// # Example
    /// ```
    /// use agentflow_api::domain::agent::AgentStatus;
    ///
    /// assert!(AgentStatus::Idle.can_transition_to(AgentStatus::Running));
    /// assert!(!AgentStatus::Idle.can_transition_to(AgentStatus::Completed));
    /// ```
    pub fn can_transition_to(&self, next: AgentStatus) -> bool {
        use AgentStatus::*;
        matches!(
            (self, next),
            (Idle, Running) | (Running, Completed) | (Running, Failed)
        )
    }

    /// Returns true for `Completed` and `Failed`
    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentStatus::Completed | AgentStatus::Failed)
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentStatus::Idle => write!(f, "idle"),
            AgentStatus::Running => write!(f, "running"),
            AgentStatus::Completed => write!(f, "completed"),
            AgentStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Status of a single step within an agent's plan
///
/// # Status Transitions
/// ```text
/// Pending -> Running -> Completed
///               └-----> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl StepStatus {
    /// Checks if a transition from current status to next status is valid
    pub fn can_transition_to(&self, next: StepStatus) -> bool {
        use StepStatus::*;
        matches!(
            (self, next),
            (Pending, Running) | (Running, Completed) | (Running, Failed)
        )
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Pending => write!(f, "pending"),
            StepStatus::Running => write!(f, "running"),
            StepStatus::Completed => write!(f, "completed"),
            StepStatus::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transition_idle_to_running() {
        assert!(AgentStatus::Idle.can_transition_to(AgentStatus::Running));
    }

    #[test]
    fn valid_transition_running_to_terminal() {
        assert!(AgentStatus::Running.can_transition_to(AgentStatus::Completed));
        assert!(AgentStatus::Running.can_transition_to(AgentStatus::Failed));
    }

    #[test]
    fn invalid_transition_idle_to_completed() {
        assert!(!AgentStatus::Idle.can_transition_to(AgentStatus::Completed));
        assert!(!AgentStatus::Idle.can_transition_to(AgentStatus::Failed));
    }

    #[test]
    fn terminal_agent_states_do_not_transition() {
        for from in [AgentStatus::Completed, AgentStatus::Failed] {
            assert!(from.is_terminal());
            for to in [
                AgentStatus::Idle,
                AgentStatus::Running,
                AgentStatus::Completed,
                AgentStatus::Failed,
            ] {
                assert!(!from.can_transition_to(to), "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn step_transitions_are_strictly_forward() {
        assert!(StepStatus::Pending.can_transition_to(StepStatus::Running));
        assert!(StepStatus::Running.can_transition_to(StepStatus::Completed));
        assert!(StepStatus::Running.can_transition_to(StepStatus::Failed));
        assert!(!StepStatus::Pending.can_transition_to(StepStatus::Completed));
        assert!(!StepStatus::Completed.can_transition_to(StepStatus::Running));
        assert!(!StepStatus::Running.can_transition_to(StepStatus::Pending));
    }

    #[test]
    fn status_display() {
        assert_eq!(AgentStatus::Idle.to_string(), "idle");
        assert_eq!(AgentStatus::Running.to_string(), "running");
        assert_eq!(AgentStatus::Completed.to_string(), "completed");
        assert_eq!(AgentStatus::Failed.to_string(), "failed");
        assert_eq!(StepStatus::Pending.to_string(), "pending");
        assert_eq!(StepStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AgentStatus::Running).unwrap(),
            "\"running\""
        );
        assert_eq!(
            serde_json::to_string(&StepStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
