//! Structured JSON logger
//!
//! - One log line = one event
//! - Key order: event, severity, invocation, ts, then fields alphabetically
//! - Synchronous, no buffering
//!
//! MHA copies the script's stdout/stderr into its own log. Several copies of
//! this tool may run at once for different node pairs, so every line carries
//! the invocation id of the process that wrote it.

use std::fmt;
use std::io::{self, Write};
use std::sync::OnceLock;

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info,
    /// Operation failures
    Error,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Id shared by every line this process writes.
pub fn invocation_id() -> &'static str {
    static ID: OnceLock<String> = OnceLock::new();
    ID.get_or_init(|| Uuid::new_v4().to_string())
}

/// Per-line context stamped ahead of the fields.
struct LineContext<'a> {
    invocation: &'a str,
    ts: String,
}

impl LineContext<'static> {
    fn now() -> Self {
        Self {
            invocation: invocation_id(),
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// A structured logger that outputs JSON logs
pub struct Logger;

impl Logger {
    /// Log an event; Error goes to stderr, Info to stdout
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let context = LineContext::now();
        if severity >= Severity::Error {
            Self::log_to_writer(severity, event, fields, &context, &mut io::stderr());
        } else {
            Self::log_to_writer(severity, event, fields, &context, &mut io::stdout());
        }
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        context: &LineContext<'_>,
        writer: &mut W,
    ) {
        let mut output = String::with_capacity(256);

        output.push('{');
        Self::push_pair(&mut output, "event", event, true);
        Self::push_pair(&mut output, "severity", severity.as_str(), false);
        Self::push_pair(&mut output, "invocation", context.invocation, false);
        Self::push_pair(&mut output, "ts", &context.ts, false);

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            Self::push_pair(&mut output, key, value, false);
        }

        output.push('}');
        output.push('\n');

        // one write per line
        let _ = writer.write_all(output.as_bytes());
        let _ = writer.flush();
    }

    fn push_pair(output: &mut String, key: &str, value: &str, first: bool) {
        if !first {
            output.push(',');
        }
        output.push('"');
        Self::escape_json_string(output, key);
        output.push_str("\":\"");
        Self::escape_json_string(output, value);
        output.push('"');
    }

    /// Escape special characters for JSON strings
    fn escape_json_string(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }
}

/// Capture a log line with a fixed context, for tests
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let context = LineContext {
        invocation: "00000000-0000-0000-0000-000000000000",
        ts: "2016-01-01T00:00:00.000Z".to_string(),
    };
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &context, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
