use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::agent::{Agent, Step};
use crate::domain::repositories::{AgentRepository, StartOutcome};

/// In-memory implementation of AgentRepository
///
/// The process-wide agent store. Every read returns a cloned snapshot and
/// every write replaces the stored snapshot whole, so readers never observe
/// a half-applied update. Records are never evicted.
#[derive(Default)]
pub struct InMemoryAgentRepository {
    registry: RwLock<Registry>,
}

#[derive(Default)]
struct Registry {
    order: Vec<String>,
    agents: HashMap<String, Agent>,
}

impl InMemoryAgentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn save(&self, agent: &Agent) -> Result<(), String> {
        let mut registry = self.registry.write().await;
        if !registry.agents.contains_key(agent.id()) {
            registry.order.push(agent.id().to_string());
        }
        registry.agents.insert(agent.id().to_string(), agent.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Agent>, String> {
        let registry = self.registry.read().await;
        Ok(registry.agents.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Agent>, String> {
        let registry = self.registry.read().await;
        Ok(registry
            .order
            .iter()
            .filter_map(|id| registry.agents.get(id))
            .cloned()
            .collect())
    }

    async fn start(&self, id: &str, plan: for<'p> fn(&'p str) -> Vec<Step>) -> Result<StartOutcome, String> {
        let mut registry = self.registry.write().await;
        let Some(stored) = registry.agents.get_mut(id) else {
            return Ok(StartOutcome::NotFound);
        };

        let mut agent = stored.clone();
        let steps = plan(agent.task());
        match agent.start(steps) {
            Ok(event) => {
                *stored = agent.clone();
                Ok(StartOutcome::Started { agent, event })
            }
            Err(reason) => Ok(StartOutcome::Rejected(reason)),
        }
    }

    async fn count(&self) -> Result<usize, String> {
        Ok(self.registry.read().await.agents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::agent::AgentStatus;

    fn one_step(_task: &str) -> Vec<Step> {
        vec![Step::new("1", "only")]
    }

    #[tokio::test]
    async fn create_registers_idle_agent() {
        let repo = InMemoryAgentRepository::new();

        let agent = repo
            .create("Bot1".to_string(), "Summarize doc".to_string())
            .await
            .unwrap();

        assert_eq!(agent.status(), AgentStatus::Idle);
        assert!(agent.steps().is_empty());

        let found = repo.find_by_id(agent.id()).await.unwrap().unwrap();
        assert_eq!(found.name(), "Bot1");
        assert_eq!(found.task(), "Summarize doc");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_unknown_id_returns_none() {
        let repo = InMemoryAgentRepository::new();
        let agent = repo.create("a".to_string(), "b".to_string()).await.unwrap();

        assert!(repo.find_by_id("missing").await.unwrap().is_none());
        assert!(repo.find_by_id(&agent.id()[..5]).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let repo = InMemoryAgentRepository::new();
        let mut ids = Vec::new();
        for n in 0..5 {
            let agent = repo
                .create(format!("bot-{}", n), "task".to_string())
                .await
                .unwrap();
            ids.push(agent.id().to_string());
        }

        let listed: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|agent| agent.id().to_string())
            .collect();

        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn save_replaces_snapshot_without_reordering() {
        let repo = InMemoryAgentRepository::new();
        let first = repo.create("first".to_string(), "t".to_string()).await.unwrap();
        let second = repo.create("second".to_string(), "t".to_string()).await.unwrap();

        let mut updated = first.clone();
        updated.start(vec![Step::new("1", "only")]).unwrap();
        repo.save(&updated).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id(), first.id());
        assert_eq!(all[0].status(), AgentStatus::Running);
        assert_eq!(all[1].id(), second.id());
    }

    #[tokio::test]
    async fn snapshots_are_detached_from_the_store() {
        let repo = InMemoryAgentRepository::new();
        let created = repo.create("Bot".to_string(), "t".to_string()).await.unwrap();

        let mut local = repo.find_by_id(created.id()).await.unwrap().unwrap();
        local.start(vec![Step::new("1", "only")]).unwrap();

        let stored = repo.find_by_id(created.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), AgentStatus::Idle);
    }

    #[tokio::test]
    async fn start_moves_idle_agent_to_running() {
        let repo = InMemoryAgentRepository::new();
        let created = repo.create("Bot".to_string(), "t".to_string()).await.unwrap();

        let outcome = repo.start(created.id(), one_step).await.unwrap();

        let agent = match outcome {
            StartOutcome::Started { agent, .. } => agent,
            other => panic!("expected agent to start, got {:?}", other),
        };
        assert_eq!(agent.status(), AgentStatus::Running);
        let stored = repo.find_by_id(created.id()).await.unwrap().unwrap();
        assert_eq!(stored, agent);
    }

    #[tokio::test]
    async fn start_unknown_agent_is_not_found() {
        let repo = InMemoryAgentRepository::new();

        let outcome = repo.start("agent_0_missing", one_step).await.unwrap();

        assert!(matches!(outcome, StartOutcome::NotFound));
    }

    #[tokio::test]
    async fn concurrent_starts_let_only_one_caller_win() {
        let repo = std::sync::Arc::new(InMemoryAgentRepository::new());
        let created = repo.create("Bot".to_string(), "t".to_string()).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = repo.clone();
            let id = created.id().to_string();
            handles.push(tokio::spawn(async move { repo.start(&id, one_step).await.unwrap() }));
        }

        let mut started = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                StartOutcome::Started { .. } => started += 1,
                StartOutcome::Rejected(_) => rejected += 1,
                StartOutcome::NotFound => panic!("agent vanished"),
            }
        }
        assert_eq!(started, 1);
        assert_eq!(rejected, 7);
    }
}
