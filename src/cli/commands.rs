//! CLI command implementations

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::{Engine, EngineConfig, ProcessRequest, ProcessResponse};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event_with_fields, Event};

use super::args::{Command, OutputFormat};
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_error, write_response, write_text};
use super::render::TextReport;

/// Configuration file structure
///
/// Both sections are optional; a missing file means all defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// HTTP server settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        let shown = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", shown.as_str())]);
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        self.engine
            .validate()
            .map_err(|e| CliError::config_error(format!("engine: {}", e)))?;

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        Ok(())
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command. Failures are
/// also reported on stdout as a JSON error object.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command).map_err(|e| {
        let _ = write_error(e.code_str(), e.message());
        e
    })
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Process {
            input,
            method,
            threshold,
            config,
            format,
        } => process(&input, method, threshold, config.as_deref(), format),
        Command::Serve { config, port } => serve(config.as_deref(), port),
    }
}

/// Resolve one request and print the response
pub fn process(
    input: &Path,
    method: Option<String>,
    threshold: Option<f64>,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    let request = build_request(read_input(input)?, method, threshold)?;
    let response = execute(&config, &request)?;

    match format {
        OutputFormat::Json => write_response(&response),
        OutputFormat::Text => write_text(&TextReport(&response).to_string()),
    }
}

/// Decode a request, applying command-line overrides
///
/// The method is written into the JSON before decoding, so a file that
/// holds only `{"table": ...}` becomes valid once `--method` is given.
/// The threshold is applied to the decoded request as a number; JSON has
/// no encoding for NaN or infinity, and those must reach the engine's
/// range check unchanged.
pub fn build_request(
    mut value: Value,
    method: Option<String>,
    threshold: Option<f64>,
) -> CliResult<ProcessRequest> {
    let obj = value
        .as_object_mut()
        .ok_or_else(|| CliError::io_error("Request must be a JSON object"))?;

    if let Some(m) = method {
        obj.insert("method".to_string(), Value::String(m));
    }

    let mut request: ProcessRequest = serde_json::from_value(value)
        .map_err(|e| CliError::io_error(format!("Invalid request: {}", e)))?;
    if threshold.is_some() {
        request.threshold = threshold;
    }
    Ok(request)
}

/// Run the engine on a decoded request
pub fn execute(config: &Config, request: &ProcessRequest) -> CliResult<ProcessResponse> {
    Ok(Engine::new(config.engine).process(request)?)
}

/// Start the HTTP server and block until it exits
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(p) = port {
        config.http.port = p;
    }
    config.validate()?;

    let server = HttpServer::with_config(config.http.clone(), Engine::new(config.engine));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}
