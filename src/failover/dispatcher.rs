//! Action dispatcher
//!
//! One invocation performs exactly one action and exits:
//!
//! - status: no side effect
//! - stop: online switch sets read_only=ON on the original master;
//!   auto failover leaves it alone
//! - stopssh: no side effect
//! - start: read_only=OFF on the new master, then the promotion step
//! - anything else: no side effect, failure
//!
//! Every error is caught here and becomes `Outcome::Failure`.

use super::errors::{FailoverError, FailoverResult};
use super::params::{Action, Endpoint, ParameterSet, StopContext};
use super::promotion::PromotionStep;
use super::toggle::{ReadOnlyState, ReadOnlyToggle};
use crate::config::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_SUCCESS2};
use crate::observability::{log_event_with_fields, Event};

/// Result of an action as the orchestrator sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Reserved; no action produces it yet.
    SecondarySuccess,
    Failure,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success => EXIT_SUCCESS,
            Outcome::SecondarySuccess => EXIT_SUCCESS2,
            Outcome::Failure => EXIT_FAILURE,
        }
    }
}

pub struct Dispatcher<'a> {
    toggle: &'a dyn ReadOnlyToggle,
    promotion: &'a dyn PromotionStep,
}

impl<'a> Dispatcher<'a> {
    pub fn new(toggle: &'a dyn ReadOnlyToggle, promotion: &'a dyn PromotionStep) -> Self {
        Self { toggle, promotion }
    }

    /// Run the requested action and map it to an outcome.
    pub fn dispatch(&self, params: &ParameterSet) -> Outcome {
        log_event_with_fields(
            Event::InvocationStart,
            &[
                ("command", params.action().name()),
                (
                    "orig_master_is_new_slave",
                    if params.orig_master_is_new_slave() { "true" } else { "false" },
                ),
            ],
        );

        let result = match params.action() {
            Action::Status => self.status(),
            Action::Stop => self.stop(params),
            Action::StopSsh => self.stopssh(),
            Action::Start => self.start(params),
            Action::Unrecognized(command) => {
                log_event_with_fields(Event::UnknownCommand, &[("command", command.as_str())]);
                Ok(Outcome::Failure)
            }
        };

        let outcome = result.unwrap_or_else(|err| {
            let event = match &err {
                FailoverError::Promotion(_) => Event::PromotionFailed,
                _ => Event::ReadOnlyFailed,
            };
            log_event_with_fields(
                event,
                &[("code", err.code()), ("reason", err.to_string().as_str())],
            );
            Outcome::Failure
        });

        log_event_with_fields(
            Event::InvocationComplete,
            &[
                ("command", params.action().name()),
                ("exit_code", outcome.exit_code().to_string().as_str()),
            ],
        );
        outcome
    }

    fn status(&self) -> FailoverResult<Outcome> {
        log_event_with_fields(Event::StatusReported, &[]);
        Ok(Outcome::Success)
    }

    fn stop(&self, params: &ParameterSet) -> FailoverResult<Outcome> {
        match params.stop_context() {
            StopContext::OnlineSwitch { credentials } => {
                let orig = params.orig_master();
                log_event_with_fields(
                    Event::OnlineSwitchDetected,
                    &[("orig_master_host", orig.host.as_deref().unwrap_or(""))],
                );
                let endpoint = orig.endpoint_with(credentials)?;
                self.set_read_only(&endpoint, ReadOnlyState::On)?;
            }
            StopContext::AutoFailover => {
                log_event_with_fields(
                    Event::AutoFailoverDetected,
                    &[(
                        "orig_master_host",
                        params.orig_master().host.as_deref().unwrap_or(""),
                    )],
                );
            }
        }
        Ok(Outcome::Success)
    }

    // TODO: confirm the original master is unreachable over ssh (ssh_user,
    // ssh_options) before letting MHA promote.
    fn stopssh(&self) -> FailoverResult<Outcome> {
        log_event_with_fields(Event::StopSshAcknowledged, &[]);
        Ok(Outcome::Success)
    }

    fn start(&self, params: &ParameterSet) -> FailoverResult<Outcome> {
        let new = params.new_master();
        log_event_with_fields(
            Event::PromotionStart,
            &[("new_master_host", new.host.as_deref().unwrap_or(""))],
        );

        let endpoint = new.endpoint()?;
        self.set_read_only(&endpoint, ReadOnlyState::Off)?;

        self.promotion.complete(params).map_err(|err| match err {
            FailoverError::Promotion(_) => err,
            other => FailoverError::Promotion(other.to_string()),
        })?;

        log_event_with_fields(
            Event::PromotionComplete,
            &[("new_master", endpoint.to_string().as_str())],
        );
        Ok(Outcome::Success)
    }

    fn set_read_only(&self, endpoint: &Endpoint, state: ReadOnlyState) -> FailoverResult<()> {
        let target = endpoint.to_string();
        log_event_with_fields(
            Event::ReadOnlyRequested,
            &[("endpoint", target.as_str()), ("state", state.as_str())],
        );

        self.toggle
            .set_read_only(endpoint, state)
            .map_err(|err| FailoverError::ReadOnlyToggle {
                host: endpoint.host.clone(),
                state: state.as_str(),
                reason: err.to_string(),
            })?;

        log_event_with_fields(
            Event::ReadOnlySet,
            &[("endpoint", target.as_str()), ("state", state.as_str())],
        );
        Ok(())
    }
}
