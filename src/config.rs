//! Configuration surface
//!
//! Holds the orchestrator-facing exit codes and the defaults for the
//! external database client. Everything here is fixed at build time except
//! the optional JSON file named by `MHA_FAILOVER_CONFIG`.
//!
//! The command-line contract with MHA is never extended by configuration:
//! the file is located through the environment so the flag set stays exactly
//! what the orchestrator passes.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::failover::{FailoverError, FailoverResult};

/// Exit code: action completed.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code: secondary success. Reserved; no action emits it today.
pub const EXIT_SUCCESS2: i32 = 10;

/// Exit code: domain failure (toggle failed, unknown command, bad config).
pub const EXIT_FAILURE: i32 = 20;

/// Exit code: the command line could not be parsed. Must stay outside
/// {0, 10, 20} so MHA never mistakes it for a domain outcome.
pub const EXIT_USAGE_ERROR: i32 = 2;

/// Environment variable naming the optional JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "MHA_FAILOVER_CONFIG";

/// Default location of the MySQL command-line client.
pub const DEFAULT_MYSQL_CLIENT_PATH: &str = "/usr/bin/mysql";

/// Default upper bound on a single client invocation.
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 30;

/// Default upper bound on the promotion hook.
pub const DEFAULT_PROMOTION_HOOK_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the MySQL client binary
    #[serde(default = "default_mysql_client_path")]
    pub mysql_client_path: String,

    /// Seconds before a client invocation is killed
    #[serde(default = "default_client_timeout_secs")]
    pub client_timeout_secs: u64,

    /// Command run after the new master accepted writes (argv, no shell)
    #[serde(default)]
    pub promotion_hook: Option<Vec<String>>,

    /// Seconds before the promotion hook is killed
    #[serde(default = "default_promotion_hook_timeout_secs")]
    pub promotion_hook_timeout_secs: u64,
}

fn default_mysql_client_path() -> String {
    DEFAULT_MYSQL_CLIENT_PATH.to_string()
}
fn default_client_timeout_secs() -> u64 {
    DEFAULT_CLIENT_TIMEOUT_SECS
}
fn default_promotion_hook_timeout_secs() -> u64 {
    DEFAULT_PROMOTION_HOOK_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mysql_client_path: default_mysql_client_path(),
            client_timeout_secs: default_client_timeout_secs(),
            promotion_hook: None,
            promotion_hook_timeout_secs: default_promotion_hook_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from `MHA_FAILOVER_CONFIG`, or defaults when unset.
    pub fn from_env() -> FailoverResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> FailoverResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FailoverError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| FailoverError::Config(format!("invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> FailoverResult<()> {
        if self.mysql_client_path.trim().is_empty() {
            return Err(FailoverError::Config(
                "mysql_client_path must not be empty".into(),
            ));
        }

        if self.client_timeout_secs == 0 {
            return Err(FailoverError::Config(
                "client_timeout_secs must be > 0".into(),
            ));
        }

        if self.promotion_hook_timeout_secs == 0 {
            return Err(FailoverError::Config(
                "promotion_hook_timeout_secs must be > 0".into(),
            ));
        }

        if let Some(hook) = &self.promotion_hook {
            if hook.first().map_or(true, |program| program.trim().is_empty()) {
                return Err(FailoverError::Config(
                    "promotion_hook must name a program".into(),
                ));
            }
        }

        Ok(())
    }

    pub fn client_timeout(&self) -> Duration {
        Duration::from_secs(self.client_timeout_secs)
    }

    pub fn promotion_hook_timeout(&self) -> Duration {
        Duration::from_secs(self.promotion_hook_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("mha_failover.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [EXIT_SUCCESS, EXIT_SUCCESS2, EXIT_FAILURE, EXIT_USAGE_ERROR];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(EXIT_SUCCESS, 0);
        assert_eq!(EXIT_SUCCESS2, 10);
        assert_eq!(EXIT_FAILURE, 20);
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{}");

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.mysql_client_path, "/usr/bin/mysql");
        assert_eq!(config.client_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"mysql_client_path": "/opt/mysql/bin/mysql",
                "client_timeout_secs": 5,
                "promotion_hook": ["/usr/local/bin/move-vip", "--up"]}"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.mysql_client_path, "/opt/mysql/bin/mysql");
        assert_eq!(config.client_timeout_secs, 5);
        assert_eq!(
            config.promotion_hook,
            Some(vec!["/usr/local/bin/move-vip".to_string(), "--up".to_string()])
        );
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"client_timeout_secs": 0}"#);

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code(), "MHA_CONFIG_INVALID");
    }

    #[test]
    fn test_rejects_unknown_key() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"mysql_path": "/usr/bin/mysql"}"#);

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_rejects_empty_hook() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"promotion_hook": []}"#);

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}
