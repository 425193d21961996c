//! JSON I/O handling for CLI
//!
//! - Input: one JSON request, from a file or stdin
//! - Output: one JSON object on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a JSON value from `path`, or from stdin when `path` is `-`
pub fn read_input(path: &Path) -> CliResult<Value> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read {}: {}", path.display(), e))
        })?
    };

    if content.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let value: Value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write plain text to stdout
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_input_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, r#"{"method": "qualitative"}"#).unwrap();

        let value = read_input(&path).unwrap();
        assert_eq!(value["method"], "qualitative");
    }

    #[test]
    fn test_read_input_rejects_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "  \n").unwrap();

        let err = read_input(&path).unwrap_err();
        assert_eq!(err.code_str(), "DT_CLI_IO_ERROR");
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Path::new("/nonexistent/request.json")).unwrap_err();
        assert_eq!(err.code_str(), "DT_CLI_IO_ERROR");
    }
}
