//! Observability subsystem
//!
//! Structured JSON logging of pipeline events. Logging is write-only: it
//! never influences engine output, and a failed log write is ignored.
//!
//! ```ignore
//! use dtresolve::observability::{log_event_with_fields, Event, ObservationScope};
//!
//! log_event_with_fields(Event::RulesInduced, &[("rules", "3")]);
//!
//! let scope = ObservationScope::new("PIPELINE");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

fn severity_of(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_of(event), event.as_str(), fields);
}
