//! CLI entry points
//!
//! parse → configuration → capabilities → dispatch → exit code.
//! Nothing here decides what an action does; that is the dispatcher's job.

use std::ffi::OsString;

use clap::Parser;

use crate::config::Config;
use crate::failover::{
    promotion_from_config, Dispatcher, MysqlClientToggle, ParameterSet, PromotionStep,
    RawParameters, ReadOnlyToggle,
};
use crate::observability::{log_event_with_fields, Event};

use super::args::Cli;
use super::errors::{CliError, CliErrorCode, CliResult};

/// Parse a full argv (program name first) into a parameter set.
pub fn parse_params<I, T>(args: I) -> CliResult<ParameterSet>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    Ok(ParameterSet::new(RawParameters::from(cli)))
}

/// Process entry: real argv, configuration from the environment.
pub fn run() -> i32 {
    run_from(std::env::args_os())
}

/// Run with the given argv and configuration from the environment.
pub fn run_from<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let params = match parse_params(args) {
        Ok(params) => params,
        Err(e) => return report(e),
    };

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => return report(e),
    };

    run_with_config(&params, &config)
}

/// Run with an explicit configuration.
pub fn run_with_config(params: &ParameterSet, config: &Config) -> i32 {
    let toggle = MysqlClientToggle::from_config(config);
    let promotion = match promotion_from_config(config) {
        Ok(step) => step,
        Err(e) => return report(CliError::from(e)),
    };

    run_with(params, &toggle, promotion.as_ref())
}

/// Run with explicit capabilities.
pub fn run_with(
    params: &ParameterSet,
    toggle: &dyn ReadOnlyToggle,
    promotion: &dyn PromotionStep,
) -> i32 {
    Dispatcher::new(toggle, promotion)
        .dispatch(params)
        .exit_code()
}

fn load_config() -> CliResult<Config> {
    let config = Config::from_env()?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("mysql_client_path", config.mysql_client_path.as_str())],
    );
    Ok(config)
}

fn report(e: CliError) -> i32 {
    match e.code() {
        CliErrorCode::InfoRequested => print!("{}", e),
        CliErrorCode::UsageError => eprintln!("{}", e),
        CliErrorCode::ConfigError => {
            log_event_with_fields(Event::ConfigFailed, &[("reason", e.message())]);
        }
    }
    e.exit_code()
}
