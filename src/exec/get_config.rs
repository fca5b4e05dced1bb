//! Get-config orchestration.

use serde::Deserialize;
use serde_json::Value;

use super::{Collaborators, notify, release, run_check};
use crate::check::{CheckDefinition, CheckPhase};
use crate::command::{CommandInput, normalize_commands};
use crate::driver::build_driver;
use crate::error::{Error, Result};
use crate::job::JobContext;
use crate::result::ExecutionResult;
use crate::transport::ConnectionArgs;

/// A get-config invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct GetRequest {
    /// Backend selector.
    pub library: String,

    /// Backend-specific connection parameters.
    pub connection_args: ConnectionArgs,

    /// Backend-specific per-call options (query mode, resource options).
    #[serde(default)]
    pub args: Value,

    /// Read payload, legacy argument name.
    #[serde(default)]
    pub command: Option<CommandInput>,

    /// Read payload; takes precedence over `command` when both are given.
    #[serde(default)]
    pub commands: Option<CommandInput>,

    /// Assertions validated after the primary read.
    #[serde(default)]
    pub post_checks: Vec<CheckDefinition>,

    /// Notification target, forwarded verbatim to the dispatcher.
    #[serde(default)]
    pub webhook: Option<Value>,
}

/// Execute a read operation.
///
/// Sequence: normalize commands, construct the driver, connect, primary
/// read (post-checks-only invocations are legal), post-checks, logout,
/// optional notification. Runtime failures are recorded in `job` and the
/// accumulated partial result is still returned; only
/// programming/configuration errors return `Err`.
pub async fn run_get(
    request: &GetRequest,
    collab: &Collaborators<'_>,
    job: &JobContext,
) -> Result<ExecutionResult> {
    log::debug!(
        "run_get: library={} host={} job={}",
        request.library,
        request.connection_args.host,
        job.job_id()
    );

    let commands =
        normalize_commands(request.command.as_ref(), request.commands.as_ref()).unwrap_or_default();
    if commands.is_empty() && request.post_checks.is_empty() {
        return Err(Error::invalid_input(
            "must provide `command`, `commands`, or `post_checks`",
        ));
    }

    let mut driver = build_driver(
        &request.library,
        request.connection_args.clone(),
        &request.args,
        collab.transports,
    )?;

    let mut result = ExecutionResult::new();
    match driver.connect().await {
        Ok(()) => {
            if !commands.is_empty() {
                match driver.run_read_commands(&commands, job).await {
                    Ok(read) => result.absorb(read),
                    Err(e) => job.record_error(format!("{e}")),
                }
            }
            // Post-checks run regardless of the primary read's outcome.
            for check in &request.post_checks {
                run_check(driver.as_mut(), check, CheckPhase::Post, job).await;
            }
        }
        Err(e) => job.record_error(format!("{e}")),
    }

    release(driver.as_mut(), job).await;
    notify(request.webhook.as_ref(), collab, &result, job);

    Ok(result)
}
