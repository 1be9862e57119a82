//! Promotion completion
//!
//! Runs after the new master accepted writes: moving a virtual IP, updating
//! a service registry, and so on. The mechanism is deployment specific, so
//! it is a trait. Implementations must be idempotent; MHA may re-run `start`.

use std::process::Command;
use std::time::Duration;

use super::errors::{FailoverError, FailoverResult};
use super::params::ParameterSet;
use super::process::run_bounded;
use crate::config::Config;
use crate::observability::{log_event_with_fields, Event};

/// Final step of a promotion.
pub trait PromotionStep {
    fn complete(&self, params: &ParameterSet) -> FailoverResult<()>;
}

/// No completion step configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipPromotion;

impl PromotionStep for SkipPromotion {
    fn complete(&self, params: &ParameterSet) -> FailoverResult<()> {
        log_event_with_fields(
            Event::PromotionSkipped,
            &[(
                "new_master_host",
                params.new_master().host.as_deref().unwrap_or(""),
            )],
        );
        Ok(())
    }
}

/// Runs an operator-supplied command with the switch described in its
/// environment.
#[derive(Debug, Clone)]
pub struct HookCommand {
    argv: Vec<String>,
    timeout: Duration,
}

impl HookCommand {
    pub fn new(argv: Vec<String>, timeout: Duration) -> FailoverResult<Self> {
        if argv.is_empty() {
            return Err(FailoverError::Config(
                "promotion hook must name a program".into(),
            ));
        }
        Ok(Self { argv, timeout })
    }

    /// Environment handed to the hook. Passwords are never exported.
    pub fn environment(params: &ParameterSet) -> Vec<(&'static str, String)> {
        let orig = params.orig_master();
        let new = params.new_master();
        let value = |v: &Option<String>| v.clone().unwrap_or_default();

        vec![
            ("NEW_MASTER_HOST", value(&new.host)),
            ("NEW_MASTER_IP", value(&new.ip)),
            ("NEW_MASTER_PORT", value(&new.port)),
            ("ORIG_MASTER_HOST", value(&orig.host)),
            ("ORIG_MASTER_IP", value(&orig.ip)),
            ("ORIG_MASTER_PORT", value(&orig.port)),
            (
                "ORIG_MASTER_IS_NEW_SLAVE",
                if params.orig_master_is_new_slave() { "1" } else { "0" }.to_string(),
            ),
        ]
    }
}

impl PromotionStep for HookCommand {
    fn complete(&self, params: &ParameterSet) -> FailoverResult<()> {
        let mut command = Command::new(&self.argv[0]);
        command.args(&self.argv[1..]);
        command.envs(Self::environment(params));

        log_event_with_fields(Event::PromotionHookStart, &[("program", self.argv[0].as_str())]);
        run_bounded(&mut command, self.timeout)
            .map_err(|e| FailoverError::Promotion(e.to_string()))
    }
}

/// Pick the promotion step described by the configuration.
pub fn from_config(config: &Config) -> FailoverResult<Box<dyn PromotionStep>> {
    match &config.promotion_hook {
        Some(argv) => Ok(Box::new(HookCommand::new(
            argv.clone(),
            config.promotion_hook_timeout(),
        )?)),
        None => Ok(Box::new(SkipPromotion)),
    }
}
