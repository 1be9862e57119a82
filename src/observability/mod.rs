//! Observability
//!
//! Structured JSON log lines describing what an invocation did. Output is
//! advisory: MHA only reads the exit code.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on execution
//! 3. Passwords are never logged
//!
//! ```ignore
//! use mha_failover::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::ReadOnlySet, &[("host", "db1"), ("state", "ON")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{invocation_id, Logger, Severity};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_failure_event() {
        // no panic
        log_event_with_fields(Event::UnknownCommand, &[("command", "reboot")]);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ReadOnlySet, &[("host", "db1"), ("state", "ON")]);
    }
}
