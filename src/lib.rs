//! Agentflow API Library
//!
//! In-memory agent service: agents are created over HTTP and walked through
//! a fixed step plan by background runners. This library provides the domain
//! model, the agent store, the runner and the HTTP adapter.

pub mod agents;
pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
