//! Notification dispatch seam.
//!
//! When the caller asks for a callback, the orchestrator renders the final
//! result into a payload and hands it to the dispatcher together with the
//! caller's target descriptor, forwarded verbatim. Delivery mechanics
//! (HTTP, queues, retries) are the collaborator's business.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::job::JobContext;
use crate::result::ExecutionResult;

/// Rendered notification payload for one finished job.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    /// Id of the job that produced the result.
    pub job_id: String,

    /// The final (possibly partial) execution result.
    pub result: ExecutionResult,

    /// Failures recorded during the job, in order.
    pub errors: Vec<String>,
}

impl WebhookPayload {
    /// Render the payload from the job context and its result.
    pub fn render(job: &JobContext, result: &ExecutionResult) -> Self {
        Self {
            job_id: job.job_id().to_string(),
            result: result.clone(),
            errors: job.errors(),
        }
    }
}

/// External notification dispatch collaborator.
pub trait WebhookDispatcher: Send + Sync {
    /// Deliver the payload to the caller's target.
    fn dispatch(&self, payload: &WebhookPayload, target: &Value) -> Result<()>;
}
