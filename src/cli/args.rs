//! CLI argument definitions using clap
//!
//! Commands:
//! - dtresolve process [--input <path>|-] [--method <m>] [--threshold <t>] [--config <path>] [--format json|text]
//! - dtresolve serve [--config <path>] [--port <p>]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// dtresolve - decision table inconsistency resolution and rule induction
#[derive(Parser, Debug)]
#[command(name = "dtresolve")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve one table and print the response
    Process {
        /// Request JSON file, or `-` for stdin
        #[arg(long, short, default_value = "-")]
        input: PathBuf,

        /// Override the request method (qualitative | quantitative)
        #[arg(long)]
        method: Option<String>,

        /// Override the request threshold (quantitative only)
        #[arg(long)]
        threshold: Option<f64>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Output format of the process command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{"status":"ok","data":...}` on stdout
    Json,
    /// Human-readable report
    Text,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
