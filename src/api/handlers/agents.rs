use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::domain::agent::{Agent, AgentStatus, Step, StepStatus};

const MISSING_FIELDS: &str = "Name and task are required";

/// Request body for creating an agent
#[derive(Debug, Deserialize)]
pub struct CreateAgentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
}

impl CreateAgentRequest {
    /// Returns `(name, task)` when both are present and non-empty
    fn into_fields(self) -> Option<(String, String)> {
        match (self.name, self.task) {
            (Some(name), Some(task)) if !name.is_empty() && !task.is_empty() => Some((name, task)),
            _ => None,
        }
    }
}

/// Wire representation of an agent
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub id: String,
    pub name: String,
    pub task: String,
    pub status: AgentStatus,
    pub steps: Vec<StepResponse>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "timestamp::option::serialize"
    )]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Wire representation of a step
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResponse {
    pub id: String,
    pub description: String,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "timestamp::option::serialize"
    )]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "timestamp::option::serialize"
    )]
    pub completed_at: Option<DateTime<Utc>>,
}

/// RFC 3339 UTC timestamps with exactly three fractional digits, so that
/// text order matches time order
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::Serializer;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::Serializer;

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}

impl From<&Step> for StepResponse {
    fn from(step: &Step) -> Self {
        Self {
            id: step.id().to_string(),
            description: step.description().to_string(),
            status: step.status(),
            output: step.output().map(str::to_string),
            started_at: step.started_at(),
            completed_at: step.completed_at(),
        }
    }
}

impl From<&Agent> for AgentResponse {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id().to_string(),
            name: agent.name().to_string(),
            task: agent.task().to_string(),
            status: agent.status(),
            steps: agent.steps().iter().map(StepResponse::from).collect(),
            created_at: agent.created_at(),
            completed_at: agent.completed_at(),
        }
    }
}

/// Create an agent and start running it in the background
///
/// POST /api/agents
///
/// Responds with the idle snapshot taken before the run begins.
pub async fn create_agent(
    State(state): State<AppState>,
    payload: Result<Json<CreateAgentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AgentResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e, "rejected create agent body");
        ApiError::bad_request(MISSING_FIELDS)
    })?;

    let (name, task) = req
        .into_fields()
        .ok_or_else(|| ApiError::bad_request(MISSING_FIELDS))?;

    let agent = state.agents.create(name, task).await.map_err(|e| {
        tracing::error!(error = %e, "failed to create agent");
        ApiError::internal_server_error("Failed to create agent")
    })?;

    tracing::info!(agent_id = agent.id(), agent_name = agent.name(), "agent created");
    state.runner.spawn(agent.id().to_string());

    Ok((StatusCode::CREATED, Json(AgentResponse::from(&agent))))
}

/// List every agent in creation order
///
/// GET /api/agents
pub async fn list_agents(
    State(state): State<AppState>,
) -> Result<Json<Vec<AgentResponse>>, ApiError> {
    let agents = state.agents.find_all().await.map_err(|e| {
        tracing::error!(error = %e, "failed to list agents");
        ApiError::internal_server_error("Failed to list agents")
    })?;

    Ok(Json(agents.iter().map(AgentResponse::from).collect()))
}

/// Get an agent by ID
///
/// GET /api/agents/:id
pub async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AgentResponse>, ApiError> {
    let agent = state
        .agents
        .find_by_id(&id)
        .await
        .map_err(|e| {
            tracing::error!(agent_id = %id, error = %e, "failed to load agent");
            ApiError::internal_server_error("Failed to load agent")
        })?
        .ok_or_else(|| ApiError::not_found("Agent not found"))?;

    Ok(Json(AgentResponse::from(&agent)))
}
