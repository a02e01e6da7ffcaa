//! Runner integration tests against the in-memory store
//!
//! Exercises the public runner API with custom step executors plugged in.

use agentflow_api::agents::{AgentError, AgentResult, AgentRunner, StepExecutor};
use agentflow_api::domain::agent::{AgentStatus, Step, StepStatus};
use agentflow_api::domain::repositories::AgentRepository;
use agentflow_api::infrastructure::repositories::InMemoryAgentRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Echoes the task text into every step output
struct EchoExecutor;

#[async_trait]
impl StepExecutor for EchoExecutor {
    async fn execute(&self, task: &str, step: &Step) -> AgentResult<String> {
        tokio::task::yield_now().await;
        Ok(format!("{} / {}", step.id(), task))
    }
}

/// Rejects tasks that mention "explode" on the first step
struct PickyExecutor;

#[async_trait]
impl StepExecutor for PickyExecutor {
    async fn execute(&self, task: &str, step: &Step) -> AgentResult<String> {
        if task.contains("explode") {
            return Err(AgentError::StepExecutionFailed(format!(
                "step {} refused task",
                step.id()
            )));
        }
        Ok("fine".to_string())
    }
}

#[tokio::test]
async fn custom_executor_output_is_recorded_per_step() {
    let store = Arc::new(InMemoryAgentRepository::new());
    let runner = Arc::new(AgentRunner::new(store.clone(), Arc::new(EchoExecutor)));
    let agent = store
        .create("Echo".to_string(), "write a haiku".to_string())
        .await
        .unwrap();

    runner.spawn(agent.id().to_string()).await.unwrap();

    let done = store.find_by_id(agent.id()).await.unwrap().unwrap();
    assert_eq!(done.status(), AgentStatus::Completed);
    let outputs: Vec<&str> = done.steps().iter().filter_map(|s| s.output()).collect();
    assert_eq!(
        outputs,
        vec![
            "1 / write a haiku",
            "2 / write a haiku",
            "3 / write a haiku",
            "4 / write a haiku",
        ]
    );
}

#[tokio::test]
async fn failing_run_leaves_agent_terminal() {
    let store = Arc::new(InMemoryAgentRepository::new());
    let runner = Arc::new(AgentRunner::new(store.clone(), Arc::new(PickyExecutor)));
    let bad = store
        .create("Bad".to_string(), "please explode".to_string())
        .await
        .unwrap();
    let good = store
        .create("Good".to_string(), "behave".to_string())
        .await
        .unwrap();

    let handles = vec![
        runner.spawn(bad.id().to_string()),
        runner.spawn(good.id().to_string()),
    ];
    for handle in handles {
        handle.await.unwrap();
    }

    let bad = store.find_by_id(bad.id()).await.unwrap().unwrap();
    assert_eq!(bad.status(), AgentStatus::Failed);
    assert!(bad.completed_at().is_some());
    assert_eq!(bad.steps()[0].status(), StepStatus::Failed);
    assert!(bad.steps()[1..]
        .iter()
        .all(|s| s.status() == StepStatus::Pending));

    let good = store.find_by_id(good.id()).await.unwrap().unwrap();
    assert_eq!(good.status(), AgentStatus::Completed);
}

#[tokio::test]
async fn unknown_agent_reports_not_found() {
    let store = Arc::new(InMemoryAgentRepository::new());
    let runner = AgentRunner::new(store.clone(), Arc::new(EchoExecutor));

    let err = runner.run("agent_1_missing").await.unwrap_err();

    assert_eq!(err.to_string(), "Agent not found: agent_1_missing");
    assert!(store.find_all().await.unwrap().is_empty());
}
