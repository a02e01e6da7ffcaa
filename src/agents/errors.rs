use thiserror::Error;

/// Errors that can occur while running an agent
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Step execution failed: {0}")]
    StepExecutionFailed(String),

    #[error("Agent store error: {0}")]
    Repository(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
