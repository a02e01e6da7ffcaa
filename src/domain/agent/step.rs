use super::value_objects::StepStatus;
use chrono::{DateTime, Utc};

/// One stage of an agent's task breakdown
///
/// Steps are owned by their [`Agent`](super::Agent) and only change state
/// through it, which keeps the sequencing rules in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    id: String,
    description: String,
    status: StepStatus,
    output: Option<String>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Step {
    /// Creates a pending step
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            status: StepStatus::Pending,
            output: None,
            started_at: None,
            completed_at: None,
        }
    }

    pub(super) fn start(&mut self) -> Result<(), String> {
        self.transition(StepStatus::Running)?;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    pub(super) fn complete(&mut self, output: String) -> Result<(), String> {
        self.transition(StepStatus::Completed)?;
        self.output = Some(output);
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    pub(super) fn fail(&mut self, reason: String) -> Result<(), String> {
        self.transition(StepStatus::Failed)?;
        self.output = Some(reason);
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    fn transition(&mut self, next: StepStatus) -> Result<(), String> {
        if !self.status.can_transition_to(next) {
            return Err(format!(
                "Step {} cannot move from {} to {}",
                self.id, self.status, next
            ));
        }
        self.status = next;
        Ok(())
    }

    // ===== Getters =====

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> StepStatus {
        self.status
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}
