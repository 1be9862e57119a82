//! Failover subsystem
//!
//! Everything MHA asks of the script during a master switch:
//! - `params`: the named parameters MHA passes, normalized once
//! - `dispatcher`: picks the action and maps it to an exit code
//! - `toggle`: the read_only mutation against a database endpoint
//! - `promotion`: the deployment-specific tail of `start`
//!
//! The dispatcher only sees the toggle and promotion step as traits, so
//! tests drive every branch without a database.

mod dispatcher;
mod errors;
mod params;
mod process;
mod promotion;
mod toggle;

pub use dispatcher::{Dispatcher, Outcome};
pub use errors::{FailoverError, FailoverResult};
pub use params::{
    Action, Credentials, Endpoint, NodeParams, NodeRole, ParameterSet, RawParameters,
    StopContext,
};
pub use process::run_bounded;
pub use promotion::{from_config as promotion_from_config, HookCommand, PromotionStep, SkipPromotion};
pub use toggle::{MysqlClientToggle, ReadOnlyState, ReadOnlyToggle};
