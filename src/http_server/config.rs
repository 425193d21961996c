//! HTTP Server Configuration
//!
//! Host, port and CORS settings.

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (default: ["http://localhost:3000"]).
    /// An empty list allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
