// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::agents::{AgentRunner, StepExecutor};
use crate::domain::repositories::AgentRepository;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub agents: Arc<dyn AgentRepository>,
    pub runner: Arc<AgentRunner>,
}

impl AppState {
    pub fn new(agents: Arc<dyn AgentRepository>, executor: Arc<dyn StepExecutor>) -> Self {
        let runner = Arc::new(AgentRunner::new(agents.clone(), executor));
        Self { agents, runner }
    }
}

/// Build the full application router with middleware
pub fn build_router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Agent routes
        .route(
            "/api/agents",
            get(handlers::agents::list_agents).post(handlers::agents::create_agent),
        )
        .route("/api/agents/:id", get(handlers::agents::get_agent))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
