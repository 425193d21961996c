//! Structured JSON logger
//!
//! - One log line = one event
//! - `event` first, then `severity`, then fields sorted by key
//! - Synchronous, no buffering
//! - Written to stderr; stdout is reserved for command output

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info = 0,
    /// Recoverable issues
    Warn = 1,
    /// Operation failures
    Error = 2,
    /// Broken invariants
    Fatal = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    ///
    /// Fields are output in deterministic order (alphabetical by key)
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::log_to_writer(severity, event, fields, &mut io::stderr().lock());
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let line = Self::render(severity, event, fields);
        // One write per line; a failed log write never fails the caller
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut output = String::with_capacity(256);

        output.push_str("{\"event\":");
        Self::push_json_string(&mut output, event);
        output.push_str(",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push(',');
            Self::push_json_string(&mut output, key);
            output.push(':');
            Self::push_json_string(&mut output, value);
        }

        output.push_str("}\n");
        output
    }

    fn push_json_string(output: &mut String, s: &str) {
        match serde_json::to_string(s) {
            Ok(quoted) => output.push_str(&quoted),
            Err(_) => output.push_str("\"\""),
        }
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }

    /// Log at FATAL level
    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Fatal, event, fields);
    }
}

/// Capture logs to a buffer for testing
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
