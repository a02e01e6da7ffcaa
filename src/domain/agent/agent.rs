use super::events::AgentEvent;
use super::step::Step;
use super::value_objects::{AgentStatus, StepStatus};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Agent aggregate root
///
/// A tracked unit of work: a caller-supplied name and task description plus
/// the ordered steps a runner walks through on its behalf.
///
/// # Invariants
/// - Steps keep the order they were assigned in
/// - At most one step is running at a time, and a step only starts once
///   every step before it has completed
/// - `completed_at` is set if and only if the status is terminal
///
/// # Example
/// ```
/// use agentflow_api::domain::agent::{Agent, AgentStatus};
///
/// let (agent, events) = Agent::new("Bot1".to_string(), "Summarize doc".to_string());
///
/// assert_eq!(agent.status(), AgentStatus::Idle);
/// assert!(agent.steps().is_empty());
/// assert_eq!(events.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    id: String,
    name: String,
    task: String,
    status: AgentStatus,
    steps: Vec<Step>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Agent {
    /// Creates a new idle Agent
    ///
    /// Name and task are opaque; input validation belongs to the caller.
    pub fn new(name: String, task: String) -> (Self, Vec<AgentEvent>) {
        let agent = Self {
            id: generate_agent_id(),
            name,
            task,
            status: AgentStatus::Idle,
            steps: Vec::new(),
            created_at: Utc::now(),
            completed_at: None,
        };

        let events = vec![AgentEvent::Created {
            agent_id: agent.id.clone(),
            name: agent.name.clone(),
        }];

        (agent, events)
    }

    /// Starts the agent (Idle -> Running) and assigns its step plan,
    /// replacing any previous step list
    pub fn start(&mut self, steps: Vec<Step>) -> Result<AgentEvent, String> {
        self.transition(AgentStatus::Running)?;
        self.steps = steps;

        Ok(AgentEvent::Started {
            agent_id: self.id.clone(),
            step_count: self.steps.len(),
        })
    }

    /// Marks the step at `index` as running
    ///
    /// # Business Rules
    /// - Agent must be running
    /// - Every earlier step must already be completed
    pub fn start_step(&mut self, index: usize) -> Result<AgentEvent, String> {
        self.ensure_running()?;

        if let Some(blocking) = self.steps[..index.min(self.steps.len())]
            .iter()
            .find(|step| step.status() != StepStatus::Completed)
        {
            return Err(format!(
                "Cannot start step {} while step {} is {}",
                index + 1,
                blocking.id(),
                blocking.status()
            ));
        }

        let step = self.step_mut(index)?;
        step.start()?;

        Ok(AgentEvent::StepStarted {
            agent_id: self.id.clone(),
            step_id: self.steps[index].id().to_string(),
        })
    }

    /// Marks the running step at `index` as completed with its output
    pub fn complete_step(&mut self, index: usize, output: String) -> Result<AgentEvent, String> {
        self.ensure_running()?;
        self.step_mut(index)?.complete(output)?;

        Ok(AgentEvent::StepCompleted {
            agent_id: self.id.clone(),
            step_id: self.steps[index].id().to_string(),
        })
    }

    /// Marks the running step at `index` as failed
    pub fn fail_step(&mut self, index: usize, reason: String) -> Result<AgentEvent, String> {
        self.ensure_running()?;
        self.step_mut(index)?.fail(reason.clone())?;

        Ok(AgentEvent::StepFailed {
            agent_id: self.id.clone(),
            step_id: self.steps[index].id().to_string(),
            reason,
        })
    }

    /// Completes the agent (Running -> Completed)
    ///
    /// All steps must have completed first.
    pub fn complete(&mut self) -> Result<AgentEvent, String> {
        if let Some(step) = self
            .steps
            .iter()
            .find(|step| step.status() != StepStatus::Completed)
        {
            return Err(format!(
                "Cannot complete agent {} while step {} is {}",
                self.id,
                step.id(),
                step.status()
            ));
        }

        self.transition(AgentStatus::Completed)?;
        self.completed_at = Some(Utc::now());

        Ok(AgentEvent::Completed {
            agent_id: self.id.clone(),
        })
    }

    /// Marks the agent as failed (Running -> Failed)
    pub fn fail(&mut self, reason: String) -> Result<AgentEvent, String> {
        self.transition(AgentStatus::Failed)?;
        self.completed_at = Some(Utc::now());

        Ok(AgentEvent::Failed {
            agent_id: self.id.clone(),
            reason,
        })
    }

    fn transition(&mut self, next: AgentStatus) -> Result<(), String> {
        if !self.status.can_transition_to(next) {
            return Err(format!(
                "Cannot move agent {} from {} to {}",
                self.id, self.status, next
            ));
        }
        self.status = next;
        Ok(())
    }

    fn ensure_running(&self) -> Result<(), String> {
        if self.status != AgentStatus::Running {
            return Err(format!("Agent {} is {}, not running", self.id, self.status));
        }
        Ok(())
    }

    fn step_mut(&mut self, index: usize) -> Result<&mut Step, String> {
        let len = self.steps.len();
        self.steps
            .get_mut(index)
            .ok_or_else(|| format!("Step index {} out of range ({} steps)", index, len))
    }

    // ===== Getters =====

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text task description, carried as-is
    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

/// Generates `agent_<unix-millis>_<9 random chars>`
fn generate_agent_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("agent_{}_{}", Utc::now().timestamp_millis(), &random[..9])
}
