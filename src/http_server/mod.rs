//! # HTTP Server Module
//!
//! Serves the engine over HTTP with axum.
//!
//! # Endpoints
//!
//! - `POST /process` - Resolve a table, returns the full response
//! - `GET /health` - Health check

pub mod config;
pub mod errors;
pub mod routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
