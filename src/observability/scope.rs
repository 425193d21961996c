//! ObservationScope for automatic begin/complete logging
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE` or `{name}_FAILED` when finished
//! - Logs `{name}_INCOMPLETE` on drop if never finished

use std::cell::Cell;
use std::time::Instant;

use super::logger::Logger;

/// A scope that logs begin and complete events around a unit of work
///
/// ```ignore
/// let scope = ObservationScope::with_fields("PIPELINE", &[("method", "qualitative")]);
/// // ... do work ...
/// scope.complete_with_fields(&[("removed", "2")]);
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: Cell<bool>,
    fields: Vec<(&'a str, String)>,
    started: Instant,
}

impl<'a> ObservationScope<'a> {
    /// Create a new observation scope, logging `{name}_BEGIN`
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Create a new observation scope whose fields repeat on every event
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);

        Self {
            name,
            completed: Cell::new(false),
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            started: Instant::now(),
        }
    }

    /// Mark the scope as successfully completed
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Mark the scope as completed, adding result fields
    ///
    /// `elapsed_ms` is appended automatically.
    pub fn complete_with_fields(self, extra_fields: &[(&str, &str)]) {
        self.completed.set(true);
        let elapsed = self.elapsed_ms();

        let mut all_fields = self.field_refs();
        all_fields.extend(extra_fields.iter().copied());
        all_fields.push(("elapsed_ms", elapsed.as_str()));

        Logger::info(&format!("{}_COMPLETE", self.name), &all_fields);
    }

    /// Mark the scope as failed, logging `{name}_FAILED` at ERROR level
    pub fn fail(self, code: &str, reason: &str) {
        self.completed.set(true);
        let mut all_fields = self.field_refs();
        all_fields.push(("code", code));
        all_fields.push(("reason", reason));
        Logger::error(&format!("{}_FAILED", self.name), &all_fields);
    }

    /// Mark the scope as failed with FATAL severity
    pub fn fail_fatal(self, code: &str, reason: &str) {
        self.completed.set(true);
        let mut all_fields = self.field_refs();
        all_fields.push(("code", code));
        all_fields.push(("reason", reason));
        Logger::fatal(&format!("{}_FAILED", self.name), &all_fields);
    }

    /// Check if the scope has been completed
    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }

    fn field_refs(&self) -> Vec<(&str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }

    fn elapsed_ms(&self) -> String {
        self.started.elapsed().as_millis().to_string()
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed.get() {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}
