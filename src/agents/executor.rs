use async_trait::async_trait;
use std::time::Duration;

use super::errors::AgentResult;
use crate::domain::agent::Step;

/// Performs the work behind a single step
///
/// The runner owns sequencing and state changes; an executor only turns a
/// step into an output message, or an error that fails the run.
#[async_trait]
pub trait StepExecutor: Send + Sync {
    async fn execute(&self, task: &str, step: &Step) -> AgentResult<String>;
}

/// Stand-in executor that waits a fixed delay and reports success
///
/// It never looks at the task text and never fails.
#[derive(Debug, Clone)]
pub struct SimulatedExecutor {
    delay: Duration,
}

impl SimulatedExecutor {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl StepExecutor for SimulatedExecutor {
    async fn execute(&self, _task: &str, step: &Step) -> AgentResult<String> {
        tokio::time::sleep(self.delay).await;
        Ok(format!("Completed: {}", step.description()))
    }
}
