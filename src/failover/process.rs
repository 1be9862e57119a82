//! Bounded child-process execution
//!
//! The only blocking point of an invocation. The child inherits stdout and
//! stderr so client diagnostics land in the orchestrator's log; stdin is
//! closed. A child still running at the deadline is killed and reaped.

use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::errors::{FailoverError, FailoverResult};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run `command` to completion within `timeout`; succeed only on exit 0.
pub fn run_bounded(command: &mut Command, timeout: Duration) -> FailoverResult<()> {
    let program = command.get_program().to_string_lossy().into_owned();

    let mut child = command
        .stdin(Stdio::null())
        .spawn()
        .map_err(|e| FailoverError::Spawn {
            program: program.clone(),
            reason: e.to_string(),
        })?;

    let started = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if started.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(FailoverError::Timeout { program, timeout });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(FailoverError::Spawn {
                    program,
                    reason: format!("wait failed: {}", e),
                });
            }
        }
    };

    if status.success() {
        Ok(())
    } else {
        Err(FailoverError::ExitStatus {
            program,
            status: status.to_string(),
        })
    }
}
