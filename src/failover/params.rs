//! Parameter model
//!
//! MHA hands the script a flat set of named values describing the original
//! and the new master. `RawParameters` is that set exactly as parsed;
//! `ParameterSet` is the normalized, immutable form the dispatcher works on.
//!
//! Normalization:
//! - empty strings count as absent
//! - the command string is resolved to an `Action` once
//! - the online-switch signal (both original-master credentials present) is
//!   resolved to a `StopContext` once

use std::fmt;

use super::errors::{FailoverError, FailoverResult};

/// Parameters as they arrive from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParameters {
    pub command: Option<String>,
    pub ssh_user: Option<String>,
    pub ssh_options: Option<String>,
    pub orig_master_host: Option<String>,
    pub orig_master_ip: Option<String>,
    pub orig_master_port: Option<String>,
    pub orig_master_user: Option<String>,
    pub orig_master_password: Option<String>,
    pub orig_master_ssh_user: Option<String>,
    pub new_master_host: Option<String>,
    pub new_master_ip: Option<String>,
    pub new_master_port: Option<String>,
    pub new_master_user: Option<String>,
    pub new_master_password: Option<String>,
    pub new_master_ssh_user: Option<String>,
    pub orig_master_is_new_slave: bool,
}

/// The lifecycle action requested by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Health check; no side effects
    Status,
    /// Old master is being demoted (online switch or unreachable master)
    Stop,
    /// Old master is reachable over ssh during failover
    StopSsh,
    /// New master is being promoted
    Start,
    /// Anything else, including no command at all
    Unrecognized(String),
}

impl Action {
    pub fn parse(command: Option<&str>) -> Self {
        match command {
            Some("status") => Action::Status,
            Some("stop") => Action::Stop,
            Some("stopssh") => Action::StopSsh,
            Some("start") => Action::Start,
            Some(other) => Action::Unrecognized(other.to_string()),
            None => Action::Unrecognized(String::new()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Action::Status => "status",
            Action::Stop => "stop",
            Action::StopSsh => "stopssh",
            Action::Start => "start",
            Action::Unrecognized(command) => command,
        }
    }
}

/// Database login. The password never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// How a `stop` invocation must treat the original master.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopContext {
    /// Planned switch: the original master is alive and must stop taking writes.
    OnlineSwitch { credentials: Credentials },
    /// Automatic failover: the original master is presumed unreachable.
    AutoFailover,
}

/// Which side of the switch a node sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    OrigMaster,
    NewMaster,
}

impl NodeRole {
    fn param(self, field: &str) -> &'static str {
        match (self, field) {
            (NodeRole::OrigMaster, "host") => "orig_master_host",
            (NodeRole::OrigMaster, "port") => "orig_master_port",
            (NodeRole::OrigMaster, "user") => "orig_master_user",
            (NodeRole::OrigMaster, _) => "orig_master_password",
            (NodeRole::NewMaster, "host") => "new_master_host",
            (NodeRole::NewMaster, "port") => "new_master_port",
            (NodeRole::NewMaster, "user") => "new_master_user",
            (NodeRole::NewMaster, _) => "new_master_password",
        }
    }
}

/// Identity and login of one master node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeParams {
    pub role: NodeRole,
    pub host: Option<String>,
    pub ip: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub ssh_user: Option<String>,
}

impl NodeParams {
    /// Both user and password, if both were given.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.user, &self.password) {
            (Some(user), Some(password)) => Some(Credentials {
                user: user.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }

    /// Resolve a connectable endpoint using this node's own login.
    pub fn endpoint(&self) -> FailoverResult<Endpoint> {
        let user = self
            .user
            .clone()
            .ok_or(FailoverError::MissingParameter(self.role.param("user")))?;
        let password = self
            .password
            .clone()
            .ok_or(FailoverError::MissingParameter(self.role.param("password")))?;
        self.endpoint_with(&Credentials { user, password })
    }

    /// Resolve a connectable endpoint with an explicit login.
    pub fn endpoint_with(&self, credentials: &Credentials) -> FailoverResult<Endpoint> {
        let host = self
            .host
            .clone()
            .ok_or(FailoverError::MissingParameter(self.role.param("host")))?;

        let raw_port = self
            .port
            .as_deref()
            .ok_or(FailoverError::MissingParameter(self.role.param("port")))?;
        let port = raw_port
            .parse::<u16>()
            .ok()
            .filter(|port| *port != 0)
            .ok_or_else(|| FailoverError::InvalidParameter {
                name: self.role.param("port"),
                value: raw_port.to_string(),
            })?;

        Ok(Endpoint {
            host,
            port,
            credentials: credentials.clone(),
        })
    }
}

/// A database server the read-only toggle can be aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub credentials: Credentials,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Normalized parameters for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    action: Action,
    ssh_user: Option<String>,
    ssh_options: Option<String>,
    orig_master: NodeParams,
    new_master: NodeParams,
    orig_master_is_new_slave: bool,
    stop_context: StopContext,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ParameterSet {
    pub fn new(raw: RawParameters) -> Self {
        let command = present(raw.command);
        let orig_master = NodeParams {
            role: NodeRole::OrigMaster,
            host: present(raw.orig_master_host),
            ip: present(raw.orig_master_ip),
            port: present(raw.orig_master_port),
            user: present(raw.orig_master_user),
            password: present(raw.orig_master_password),
            ssh_user: present(raw.orig_master_ssh_user),
        };
        let new_master = NodeParams {
            role: NodeRole::NewMaster,
            host: present(raw.new_master_host),
            ip: present(raw.new_master_ip),
            port: present(raw.new_master_port),
            user: present(raw.new_master_user),
            password: present(raw.new_master_password),
            ssh_user: present(raw.new_master_ssh_user),
        };

        let stop_context = match orig_master.credentials() {
            Some(credentials) => StopContext::OnlineSwitch { credentials },
            None => StopContext::AutoFailover,
        };

        Self {
            action: Action::parse(command.as_deref()),
            ssh_user: present(raw.ssh_user),
            ssh_options: present(raw.ssh_options),
            orig_master,
            new_master,
            orig_master_is_new_slave: raw.orig_master_is_new_slave,
            stop_context,
        }
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn ssh_user(&self) -> Option<&str> {
        self.ssh_user.as_deref()
    }

    pub fn ssh_options(&self) -> Option<&str> {
        self.ssh_options.as_deref()
    }

    pub fn orig_master(&self) -> &NodeParams {
        &self.orig_master
    }

    pub fn new_master(&self) -> &NodeParams {
        &self.new_master
    }

    pub fn orig_master_is_new_slave(&self) -> bool {
        self.orig_master_is_new_slave
    }

    pub fn stop_context(&self) -> &StopContext {
        &self.stop_context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(command: &str) -> RawParameters {
        RawParameters {
            command: Some(command.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(Action::parse(Some("status")), Action::Status);
        assert_eq!(Action::parse(Some("stop")), Action::Stop);
        assert_eq!(Action::parse(Some("stopssh")), Action::StopSsh);
        assert_eq!(Action::parse(Some("start")), Action::Start);
        assert_eq!(
            Action::parse(Some("START")),
            Action::Unrecognized("START".into())
        );
        assert_eq!(Action::parse(None), Action::Unrecognized(String::new()));
    }

    #[test]
    fn test_missing_command_is_unrecognized() {
        let params = ParameterSet::new(RawParameters::default());
        assert!(matches!(params.action(), Action::Unrecognized(_)));
    }

    #[test]
    fn test_online_switch_needs_both_credentials() {
        let both = ParameterSet::new(RawParameters {
            orig_master_user: Some("u".into()),
            orig_master_password: Some("p".into()),
            ..raw("stop")
        });
        assert_eq!(
            both.stop_context(),
            &StopContext::OnlineSwitch {
                credentials: Credentials {
                    user: "u".into(),
                    password: "p".into()
                }
            }
        );

        let user_only = ParameterSet::new(RawParameters {
            orig_master_user: Some("u".into()),
            ..raw("stop")
        });
        assert_eq!(user_only.stop_context(), &StopContext::AutoFailover);

        let password_only = ParameterSet::new(RawParameters {
            orig_master_password: Some("p".into()),
            ..raw("stop")
        });
        assert_eq!(password_only.stop_context(), &StopContext::AutoFailover);
    }

    #[test]
    fn test_empty_value_counts_as_absent() {
        let params = ParameterSet::new(RawParameters {
            orig_master_user: Some("u".into()),
            orig_master_password: Some(String::new()),
            ..raw("stop")
        });
        assert_eq!(params.stop_context(), &StopContext::AutoFailover);
        assert!(params.orig_master().password.is_none());
    }

    #[test]
    fn test_new_master_endpoint() {
        let params = ParameterSet::new(RawParameters {
            new_master_host: Some("db2".into()),
            new_master_port: Some("3307".into()),
            new_master_user: Some("root".into()),
            new_master_password: Some("secret".into()),
            ..raw("start")
        });

        let endpoint = params.new_master().endpoint().unwrap();
        assert_eq!(endpoint.host, "db2");
        assert_eq!(endpoint.port, 3307);
        assert_eq!(endpoint.credentials.user, "root");
        assert_eq!(endpoint.to_string(), "db2:3307");
    }

    #[test]
    fn test_endpoint_missing_host_names_parameter() {
        let params = ParameterSet::new(RawParameters {
            new_master_user: Some("root".into()),
            new_master_password: Some("secret".into()),
            ..raw("start")
        });

        assert_eq!(
            params.new_master().endpoint().unwrap_err(),
            FailoverError::MissingParameter("new_master_host")
        );
    }

    #[test]
    fn test_endpoint_missing_password_names_parameter() {
        let params = ParameterSet::new(RawParameters {
            new_master_host: Some("db2".into()),
            new_master_user: Some("root".into()),
            ..raw("start")
        });

        assert_eq!(
            params.new_master().endpoint().unwrap_err(),
            FailoverError::MissingParameter("new_master_password")
        );
    }

    #[test]
    fn test_endpoint_rejects_bad_port() {
        let params = ParameterSet::new(RawParameters {
            orig_master_host: Some("db1".into()),
            orig_master_port: Some("mysql".into()),
            ..raw("stop")
        });
        let credentials = Credentials {
            user: "u".into(),
            password: "p".into(),
        };

        assert!(matches!(
            params.orig_master().endpoint_with(&credentials),
            Err(FailoverError::InvalidParameter {
                name: "orig_master_port",
                ..
            })
        ));
    }

    #[test]
    fn test_endpoint_missing_port_names_parameter() {
        let params = ParameterSet::new(RawParameters {
            orig_master_host: Some("db1".into()),
            ..raw("stop")
        });
        let credentials = Credentials {
            user: "u".into(),
            password: "p".into(),
        };

        assert_eq!(
            params.orig_master().endpoint_with(&credentials).unwrap_err(),
            FailoverError::MissingParameter("orig_master_port")
        );
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            user: "repl".into(),
            password: "hunter2".into(),
        };
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("repl"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_new_slave_flag_defaults_false() {
        let params = ParameterSet::new(raw("status"));
        assert!(!params.orig_master_is_new_slave());
    }
}
