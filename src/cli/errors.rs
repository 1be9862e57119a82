//! CLI-specific error types
//!
//! These stop an invocation before any action runs. Each maps to an exit
//! code the orchestrator cannot confuse with a domain outcome.

use std::fmt;

use crate::config::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE_ERROR};
use crate::failover::FailoverError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Command line could not be parsed
    UsageError,
    /// `--help` or `--version`; not a failure
    InfoRequested,
    /// Configuration file unreadable or invalid
    ConfigError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UsageError => "MHA_CLI_USAGE_ERROR",
            Self::InfoRequested => "MHA_CLI_INFO_REQUESTED",
            Self::ConfigError => "MHA_CLI_CONFIG_ERROR",
        }
    }

    /// Process exit code for this condition
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UsageError => EXIT_USAGE_ERROR,
            Self::InfoRequested => EXIT_SUCCESS,
            Self::ConfigError => EXIT_FAILURE,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Usage error
    pub fn usage_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::UsageError, msg)
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            // clap already formatted help and version text
            CliErrorCode::InfoRequested => write!(f, "{}", self.message),
            _ => write!(f, "{}: {}", self.code.code(), self.message),
        }
    }
}

impl std::error::Error for CliError {}

impl From<clap::Error> for CliError {
    fn from(e: clap::Error) -> Self {
        use clap::error::ErrorKind;

        match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Self::new(CliErrorCode::InfoRequested, e.to_string())
            }
            _ => Self::usage_error(e.to_string().trim_end().to_string()),
        }
    }
}

impl From<FailoverError> for CliError {
    fn from(e: FailoverError) -> Self {
        Self::config_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliErrorCode::UsageError.exit_code(), 2);
        assert_eq!(CliErrorCode::InfoRequested.exit_code(), 0);
        assert_eq!(CliErrorCode::ConfigError.exit_code(), 20);
    }

    #[test]
    fn test_display_includes_code() {
        let err = CliError::usage_error("unexpected argument '--foo'");
        assert_eq!(
            err.to_string(),
            "MHA_CLI_USAGE_ERROR: unexpected argument '--foo'"
        );
    }

    #[test]
    fn test_from_failover_error() {
        let err = CliError::from(FailoverError::Config("bad".into()));
        assert_eq!(err.code(), CliErrorCode::ConfigError);
        assert!(err.message().contains("bad"));
    }
}
