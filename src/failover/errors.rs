//! Failover error types
//!
//! Every variant is an anticipated failure. The dispatcher converts all of
//! them into the domain failure exit code; none of them may escape as a panic.

use std::time::Duration;

use thiserror::Error;

/// Result type for failover operations
pub type FailoverResult<T> = Result<T, FailoverError>;

/// Failover errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailoverError {
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid parameter {name}: {value:?}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("failed to spawn {program}: {reason}")]
    Spawn { program: String, reason: String },

    #[error("{program} exited with {status}")]
    ExitStatus { program: String, status: String },

    #[error("{program} timed out after {}s", .timeout.as_secs())]
    Timeout { program: String, timeout: Duration },

    #[error("failed to turn read_only {state} on {host}: {reason}")]
    ReadOnlyToggle {
        host: String,
        state: &'static str,
        reason: String,
    },

    #[error("promotion step failed: {0}")]
    Promotion(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl FailoverError {
    /// Stable error code for log lines
    pub fn code(&self) -> &'static str {
        match self {
            FailoverError::MissingParameter(_) => "MHA_MISSING_PARAMETER",
            FailoverError::InvalidParameter { .. } => "MHA_INVALID_PARAMETER",
            FailoverError::Spawn { .. } => "MHA_SPAWN_FAILED",
            FailoverError::ExitStatus { .. } => "MHA_NONZERO_EXIT",
            FailoverError::Timeout { .. } => "MHA_TIMEOUT",
            FailoverError::ReadOnlyToggle { .. } => "MHA_READ_ONLY_FAILED",
            FailoverError::Promotion(_) => "MHA_PROMOTION_FAILED",
            FailoverError::Config(_) => "MHA_CONFIG_INVALID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = FailoverError::ReadOnlyToggle {
            host: "db1".into(),
            state: "ON",
            reason: "mysql exited with exit status: 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to turn read_only ON on db1: mysql exited with exit status: 1"
        );
    }

    #[test]
    fn test_timeout_display_in_seconds() {
        let err = FailoverError::Timeout {
            program: "/usr/bin/mysql".into(),
            timeout: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "/usr/bin/mysql timed out after 30s");
        assert_eq!(err.code(), "MHA_TIMEOUT");
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            FailoverError::MissingParameter("new_master_host").code(),
            "MHA_MISSING_PARAMETER"
        );
        assert_eq!(
            FailoverError::Config("x".into()).code(),
            "MHA_CONFIG_INVALID"
        );
    }
}
