//! CLI module
//!
//! Provides command-line interface for:
//! - process: resolve one table from a file or stdin
//! - serve: run the HTTP server

mod args;
mod commands;
mod errors;
mod io;
mod render;

pub use args::{Cli, Command, OutputFormat};
pub use commands::{build_request, execute, process, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_input, write_error, write_response};
pub use render::TextReport;
