//! Observable events
//!
//! Events are explicit and typed. Names are stable: operators grep the MHA
//! log for them.

use std::fmt;

/// Observable events during one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Parameters parsed, action about to run
    InvocationStart,
    /// Configuration file loaded
    ConfigLoaded,
    /// Configuration could not be loaded
    ConfigFailed,

    /// `status` answered
    StatusReported,
    /// `stop` with both original-master credentials
    OnlineSwitchDetected,
    /// `stop` without credentials; original master left alone
    AutoFailoverDetected,
    /// `stopssh` acknowledged
    StopSshAcknowledged,
    /// `start` begins promoting the new master
    PromotionStart,
    /// Promotion completion hook launched
    PromotionHookStart,
    /// No promotion completion step configured
    PromotionSkipped,
    /// Promotion finished
    PromotionComplete,
    /// Promotion completion step failed
    PromotionFailed,

    /// read_only toggle about to run
    ReadOnlyRequested,
    /// read_only acknowledged by the endpoint
    ReadOnlySet,
    /// read_only toggle failed or could not be attempted
    ReadOnlyFailed,

    /// Command string matched no action
    UnknownCommand,
    /// Action finished; carries the exit code
    InvocationComplete,
}

impl Event {
    /// Returns the event name for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::InvocationStart => "INVOCATION_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ConfigFailed => "CONFIG_FAILED",
            Event::StatusReported => "STATUS_REPORTED",
            Event::OnlineSwitchDetected => "ONLINE_SWITCH_DETECTED",
            Event::AutoFailoverDetected => "AUTO_FAILOVER_DETECTED",
            Event::StopSshAcknowledged => "STOPSSH_ACKNOWLEDGED",
            Event::PromotionStart => "PROMOTION_START",
            Event::PromotionHookStart => "PROMOTION_HOOK_START",
            Event::PromotionSkipped => "PROMOTION_SKIPPED",
            Event::PromotionComplete => "PROMOTION_COMPLETE",
            Event::PromotionFailed => "PROMOTION_FAILED",
            Event::ReadOnlyRequested => "READ_ONLY_REQUESTED",
            Event::ReadOnlySet => "READ_ONLY_SET",
            Event::ReadOnlyFailed => "READ_ONLY_FAILED",
            Event::UnknownCommand => "UNKNOWN_COMMAND",
            Event::InvocationComplete => "INVOCATION_COMPLETE",
        }
    }

    /// Whether this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::ConfigFailed
                | Event::PromotionFailed
                | Event::ReadOnlyFailed
                | Event::UnknownCommand
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
