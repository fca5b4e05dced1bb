//! Execution orchestrators.
//!
//! [`run_get`](get_config::run_get) and [`run_set`](set_config::run_set)
//! compose a driver with command normalization, pre/post-check validation,
//! the job error sink, and the optional notification side effect. They
//! return a result mapping even on partial failure; only
//! programming/configuration errors propagate to the caller.

pub mod get_config;
pub mod set_config;

pub use get_config::{GetRequest, run_get};
pub use set_config::{SetRequest, run_set};

use serde_json::Value;

use crate::check::{CheckDefinition, CheckPhase};
use crate::driver::Driver;
use crate::job::JobContext;
use crate::result::ExecutionResult;
use crate::template::TemplateRenderer;
use crate::transport::TransportFactory;
use crate::webhook::{WebhookDispatcher, WebhookPayload};

/// External collaborators an orchestrator invocation may touch.
///
/// The transport factory is always required; the renderer and dispatcher
/// are only consulted when the request asks for them.
pub struct Collaborators<'a> {
    /// Supplier of concrete wire transports.
    pub transports: &'a dyn TransportFactory,

    /// Template-rendering collaborator for generated configuration.
    pub templates: Option<&'a dyn TemplateRenderer>,

    /// Notification dispatch collaborator.
    pub webhooks: Option<&'a dyn WebhookDispatcher>,
}

impl<'a> Collaborators<'a> {
    /// Collaborators with only the transport factory wired up.
    pub fn new(transports: &'a dyn TransportFactory) -> Self {
        Self {
            transports,
            templates: None,
            webhooks: None,
        }
    }

    /// Attach a template renderer.
    pub fn with_templates(mut self, templates: &'a dyn TemplateRenderer) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Attach a webhook dispatcher.
    pub fn with_webhooks(mut self, webhooks: &'a dyn WebhookDispatcher) -> Self {
        self.webhooks = Some(webhooks);
        self
    }
}

/// Run one check's read command and validate its output.
///
/// Returns whether the check passed; failures (including a failed read) are
/// recorded, never raised.
pub(crate) async fn run_check(
    driver: &mut dyn Driver,
    check: &CheckDefinition,
    phase: CheckPhase,
    job: &JobContext,
) -> bool {
    match driver
        .run_read_commands(std::slice::from_ref(&check.command), job)
        .await
    {
        Ok(read) => check.evaluate_and_record(phase, &read.to_text(), job),
        Err(e) => {
            job.record_error(format!("{e}"));
            false
        }
    }
}

/// Release the driver session, recording rather than raising on failure.
pub(crate) async fn release(driver: &mut dyn Driver, job: &JobContext) {
    if let Err(e) = driver.logout().await {
        job.record_error(format!("{e}"));
    }
}

/// Hand the final result to the notification dispatcher if the caller
/// asked for one. Dispatch failures are recorded, never raised.
pub(crate) fn notify(
    webhook: Option<&Value>,
    collab: &Collaborators<'_>,
    result: &ExecutionResult,
    job: &JobContext,
) {
    let Some(target) = webhook else {
        return;
    };
    match collab.webhooks {
        Some(dispatcher) => {
            let payload = WebhookPayload::render(job, result);
            if let Err(e) = dispatcher.dispatch(&payload, target) {
                job.record_error(format!("webhook dispatch failed: {e}"));
            }
        }
        None => job.record_error("webhook requested but no dispatcher is configured"),
    }
}
