//! CLI argument definitions using clap
//!
//! MHA invokes the script as
//! `mha-failover --command=stop --orig_master_host=db1 ... [--orig_master_is_new_slave]`.
//! Long names are snake_case and string values must be attached with `=`.
//! A repeated flag keeps its last value.

use clap::Parser;

use crate::failover::RawParameters;

/// master_ip_failover_script / master_ip_online_change_script for MHA
#[derive(Parser, Debug)]
#[command(name = "mha-failover")]
#[command(version, about, long_about = None)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Action: status, stop, stopssh or start
    #[arg(long = "command", require_equals = true)]
    pub command: Option<String>,

    /// ssh user for reachability checks
    #[arg(long = "ssh_user", require_equals = true)]
    pub ssh_user: Option<String>,

    /// Extra ssh options for reachability checks
    #[arg(long = "ssh_options", require_equals = true, allow_hyphen_values = true)]
    pub ssh_options: Option<String>,

    /// Hostname of the master being demoted
    #[arg(long = "orig_master_host", require_equals = true)]
    pub orig_master_host: Option<String>,

    /// IP address of the master being demoted
    #[arg(long = "orig_master_ip", require_equals = true)]
    pub orig_master_ip: Option<String>,

    /// MySQL port of the master being demoted
    #[arg(long = "orig_master_port", require_equals = true)]
    pub orig_master_port: Option<String>,

    /// MySQL user on the master being demoted (online switch only)
    #[arg(long = "orig_master_user", require_equals = true)]
    pub orig_master_user: Option<String>,

    /// MySQL password on the master being demoted (online switch only)
    #[arg(long = "orig_master_password", require_equals = true, allow_hyphen_values = true)]
    pub orig_master_password: Option<String>,

    /// ssh user on the master being demoted
    #[arg(long = "orig_master_ssh_user", require_equals = true)]
    pub orig_master_ssh_user: Option<String>,

    /// Hostname of the master being promoted
    #[arg(long = "new_master_host", require_equals = true)]
    pub new_master_host: Option<String>,

    /// IP address of the master being promoted
    #[arg(long = "new_master_ip", require_equals = true)]
    pub new_master_ip: Option<String>,

    /// MySQL port of the master being promoted
    #[arg(long = "new_master_port", require_equals = true)]
    pub new_master_port: Option<String>,

    /// MySQL user on the master being promoted
    #[arg(long = "new_master_user", require_equals = true)]
    pub new_master_user: Option<String>,

    /// MySQL password on the master being promoted
    #[arg(long = "new_master_password", require_equals = true, allow_hyphen_values = true)]
    pub new_master_password: Option<String>,

    /// ssh user on the master being promoted
    #[arg(long = "new_master_ssh_user", require_equals = true)]
    pub new_master_ssh_user: Option<String>,

    /// The demoted master will replicate from the new one
    #[arg(long = "orig_master_is_new_slave")]
    pub orig_master_is_new_slave: bool,
}

impl From<Cli> for RawParameters {
    fn from(cli: Cli) -> Self {
        RawParameters {
            command: cli.command,
            ssh_user: cli.ssh_user,
            ssh_options: cli.ssh_options,
            orig_master_host: cli.orig_master_host,
            orig_master_ip: cli.orig_master_ip,
            orig_master_port: cli.orig_master_port,
            orig_master_user: cli.orig_master_user,
            orig_master_password: cli.orig_master_password,
            orig_master_ssh_user: cli.orig_master_ssh_user,
            new_master_host: cli.new_master_host,
            new_master_ip: cli.new_master_ip,
            new_master_port: cli.new_master_port,
            new_master_user: cli.new_master_user,
            new_master_password: cli.new_master_password,
            new_master_ssh_user: cli.new_master_ssh_user,
            orig_master_is_new_slave: cli.orig_master_is_new_slave,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("mha-failover").chain(args.iter().copied()))
    }

    #[test]
    fn test_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_mha_style_arguments() {
        let cli = parse(&[
            "--command=stop",
            "--orig_master_host=db1",
            "--orig_master_ip=10.0.0.1",
            "--orig_master_port=3306",
            "--orig_master_user=mha",
            "--orig_master_password=secret",
            "--new_master_host=db2",
        ])
        .unwrap();

        assert_eq!(cli.command.as_deref(), Some("stop"));
        assert_eq!(cli.orig_master_host.as_deref(), Some("db1"));
        assert_eq!(cli.orig_master_port.as_deref(), Some("3306"));
        assert_eq!(cli.new_master_host.as_deref(), Some("db2"));
        assert!(!cli.orig_master_is_new_slave);
    }

    #[test]
    fn test_value_keeps_everything_after_first_equals() {
        let cli = parse(&["--command=start", "--new_master_password=a=b=c"]).unwrap();
        assert_eq!(cli.new_master_password.as_deref(), Some("a=b=c"));
    }

    #[test]
    fn test_repeated_flag_keeps_last_value() {
        let cli = parse(&["--command=status", "--command=start"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("start"));

        let cli = parse(&[
            "--command=start",
            "--orig_master_is_new_slave",
            "--orig_master_is_new_slave",
        ])
        .unwrap();
        assert!(cli.orig_master_is_new_slave);
    }

    #[test]
    fn test_bool_flag() {
        let cli = parse(&["--command=start", "--orig_master_is_new_slave"]).unwrap();
        assert!(cli.orig_master_is_new_slave);
    }

    #[test]
    fn test_bool_flag_rejects_value() {
        assert!(parse(&["--orig_master_is_new_slave=1"]).is_err());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = parse(&["--command=status", "--new_master_vip=10.0.0.9"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_kebab_case_is_not_accepted() {
        assert!(parse(&["--orig-master-host=db1"]).is_err());
    }

    #[test]
    fn test_string_flag_without_equals_is_rejected() {
        assert!(parse(&["--command=stop", "--orig_master_host"]).is_err());
        assert!(parse(&["--command", "stop"]).is_err());
    }

    #[test]
    fn test_positional_is_rejected() {
        assert!(parse(&["status"]).is_err());
    }

    #[test]
    fn test_into_raw_parameters() {
        let cli = parse(&["--command=status", "--ssh_user=root"]).unwrap();
        let raw = RawParameters::from(cli);
        assert_eq!(raw.command.as_deref(), Some("status"));
        assert_eq!(raw.ssh_user.as_deref(), Some("root"));
    }
}
