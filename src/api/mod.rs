//! HTTP API for the Weather Agent.
//!
//! ## Endpoints
//!
//! - `GET /` - Liveness check
//! - `GET /weather` - Ask the weather agent about today's weather in Tokyo
//! - `GET /web_search` - Run the research agent with a fixed query
//! - `POST /computer_use` - Ask the model for computer-use tool calls

mod agents;
mod error;
mod routes;
pub mod types;

pub use error::ApiError;
pub use routes::{router, serve, AppState};
pub use types::*;
