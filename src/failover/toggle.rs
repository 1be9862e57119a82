//! Read-only toggle
//!
//! The one mutation this tool performs against a database: flipping the
//! global `read_only` variable. The dispatcher only sees the trait; the
//! MySQL client implementation shells out (without a shell) to the
//! configured client binary.

use std::fmt;
use std::process::Command;
use std::time::Duration;

use super::errors::FailoverResult;
use super::params::Endpoint;
use super::process::run_bounded;
use crate::config::Config;

/// Desired value of the global `read_only` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOnlyState {
    On,
    Off,
}

impl ReadOnlyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadOnlyState::On => "ON",
            ReadOnlyState::Off => "OFF",
        }
    }

    /// SQL statement applying this state.
    pub fn statement(&self) -> String {
        format!("set global read_only={}", self.as_str())
    }
}

impl fmt::Display for ReadOnlyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability to set `read_only` on a database endpoint.
pub trait ReadOnlyToggle {
    /// Succeeds only once the endpoint acknowledged the new setting.
    fn set_read_only(&self, endpoint: &Endpoint, state: ReadOnlyState) -> FailoverResult<()>;
}

/// Toggle backed by the `mysql` command-line client.
#[derive(Debug, Clone)]
pub struct MysqlClientToggle {
    client_path: String,
    timeout: Duration,
}

impl MysqlClientToggle {
    pub fn new(client_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client_path: client_path.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.mysql_client_path.clone(), config.client_timeout())
    }

    /// Client argument list for the given endpoint and state.
    pub fn client_args(endpoint: &Endpoint, state: ReadOnlyState) -> Vec<String> {
        vec![
            format!("-h{}", endpoint.host),
            format!("-P{}", endpoint.port),
            format!("-u{}", endpoint.credentials.user),
            format!("-p{}", endpoint.credentials.password),
            "-e".to_string(),
            state.statement(),
        ]
    }
}

impl ReadOnlyToggle for MysqlClientToggle {
    fn set_read_only(&self, endpoint: &Endpoint, state: ReadOnlyState) -> FailoverResult<()> {
        let mut command = Command::new(&self.client_path);
        command.args(Self::client_args(endpoint, state));
        run_bounded(&mut command, self.timeout)
    }
}
