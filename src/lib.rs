//! # Weather Agent API
//!
//! A small HTTP service in front of a hosted LLM provider.
//!
//! This library provides:
//! - Hosted agent runs (weather question, web research) through the Responses API
//! - A computer-use endpoint that returns the model's tool calls as JSON
//! - The axum router and server wiring
//!
//! ## Request Flow
//! 1. Receive request via API
//! 2. Build the agent definition or chat messages
//! 3. Make exactly one call to the provider
//! 4. Return the final text or the normalized tool calls
//!
//! ## Modules
//! - `agents`: agent definitions and the three use cases
//! - `llm`: provider client (chat completions + agent runs)
//! - `api`: HTTP routes
//! - `config`: environment configuration

pub mod agents;
pub mod api;
pub mod config;
pub mod llm;

pub use config::Config;
