//! Set-config orchestration.

use serde::Deserialize;
use serde_json::Value;

use super::{Collaborators, notify, release, run_check};
use crate::check::{CheckDefinition, CheckPhase};
use crate::driver::{ApplyOptions, ConfigPayload, build_driver};
use crate::error::{Error, Result};
use crate::job::JobContext;
use crate::result::ExecutionResult;
use crate::template::TemplatedConfig;
use crate::transport::ConnectionArgs;

/// A set-config invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// Backend selector.
    pub library: String,

    /// Backend-specific connection parameters.
    pub connection_args: ConnectionArgs,

    /// Backend-specific per-call options.
    #[serde(default)]
    pub args: Value,

    /// Literal configuration payload.
    #[serde(default)]
    pub config: Option<ConfigPayload>,

    /// Templated configuration; rendered first and, when present, replaces
    /// `config`.
    #[serde(default)]
    pub j2config: Option<TemplatedConfig>,

    /// Assertions that gate the mutating operation.
    #[serde(default)]
    pub pre_checks: Vec<CheckDefinition>,

    /// Assertions validated after the mutating operation.
    #[serde(default)]
    pub post_checks: Vec<CheckDefinition>,

    /// Escalate to privileged mode before applying (CLI backends).
    #[serde(default)]
    pub enable_mode: bool,

    /// Compute and report the change without committing it.
    #[serde(default)]
    pub dry_run: bool,

    /// Notification target, forwarded verbatim to the dispatcher.
    #[serde(default)]
    pub webhook: Option<Value>,
}

impl SetRequest {
    /// Resolve the effective configuration payload.
    ///
    /// A templated config is rendered through the collaborator and replaces
    /// any literal `config`. A render failure is recorded and yields `None`
    /// — the apply step is then skipped rather than the job aborted.
    fn resolve_config(&self, collab: &Collaborators<'_>, job: &JobContext) -> Option<ConfigPayload> {
        let Some(j2) = &self.j2config else {
            return self.config.clone();
        };
        match collab.templates {
            Some(renderer) => match renderer.render(&j2.template, &j2.args) {
                Ok(rendered) => Some(ConfigPayload::Blob(rendered)),
                Err(e) => {
                    job.record_error(format!("{e}"));
                    None
                }
            },
            None => {
                job.record_error("templated config requested but no renderer is configured");
                None
            }
        }
    }
}

/// Execute a configuration change.
///
/// Sequence: resolve (possibly templated) config, construct the driver,
/// connect, pre-checks, apply, post-checks, logout, optional notification.
/// Any pre-check failure skips the apply step entirely and skips
/// post-checks; the failure is reported through the job context. Runtime
/// failures are recorded and the partial result returned; only
/// programming/configuration errors return `Err`.
pub async fn run_set(
    request: &SetRequest,
    collab: &Collaborators<'_>,
    job: &JobContext,
) -> Result<ExecutionResult> {
    log::debug!(
        "run_set: library={} host={} dry_run={} job={}",
        request.library,
        request.connection_args.host,
        request.dry_run,
        job.job_id()
    );

    if request.config.is_none() && request.j2config.is_none() {
        return Err(Error::invalid_input(
            "must provide `config` or `j2config`",
        ));
    }
    let config = request.resolve_config(collab, job);

    let mut driver = build_driver(
        &request.library,
        request.connection_args.clone(),
        &request.args,
        collab.transports,
    )?;
    let options = ApplyOptions {
        dry_run: request.dry_run,
        enable_mode: request.enable_mode,
    };

    let mut result = ExecutionResult::new();
    let mut fatal = None;

    match driver.connect().await {
        Ok(()) => {
            let mut pre_check_ok = true;
            for check in &request.pre_checks {
                if !run_check(driver.as_mut(), check, CheckPhase::Pre, job).await {
                    pre_check_ok = false;
                }
            }

            if pre_check_ok {
                match &config {
                    Some(config) => match driver.apply_config(config, &options, job).await {
                        Ok(applied) => result.absorb(applied),
                        Err(e) if e.is_fatal() => fatal = Some(e),
                        Err(e) => job.record_error(format!("{e}")),
                    },
                    // Render already failed and was recorded; note the skip.
                    None => job.record_error("no configuration to apply; skipping apply step"),
                }

                if fatal.is_none() {
                    for check in &request.post_checks {
                        run_check(driver.as_mut(), check, CheckPhase::Post, job).await;
                    }
                }
            }
        }
        Err(e) => job.record_error(format!("{e}")),
    }

    release(driver.as_mut(), job).await;

    if let Some(e) = fatal {
        return Err(e);
    }

    notify(request.webhook.as_ref(), collab, &result, job);
    Ok(result)
}
