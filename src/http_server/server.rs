//! # HTTP Server
//!
//! Combines the processing and health routers behind a CORS layer.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::routes::{health_routes, process_routes, EngineState};
use crate::engine::Engine;
use crate::observability::{log_event_with_fields, Event};

/// HTTP front end for the engine
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default(), Engine::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig, engine: Engine) -> Self {
        let router = Self::build_router(&config, engine);
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig, engine: Engine) -> Router {
        let state = Arc::new(EngineState::new(engine));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(process_routes(state))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the listener fails
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event_with_fields(Event::ServerStart, &[("addr", addr.to_string().as_str())]);

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}
