//! Job-scoped error sink.
//!
//! One [`JobContext`] exists per externally-scheduled job. Every non-fatal
//! failure that happens while executing the job (transport hiccups, failed
//! checks, webhook delivery problems) is appended here so the caller sees
//! partial results instead of a crashed job.

use std::sync::Mutex;

use log::warn;

/// Append-only failure accumulator scoped to one job execution.
///
/// Recording never fails and never panics; multiple points within a single
/// invocation (pre-checks, primary operation, post-checks, notification)
/// write to the same context in order. The context is discarded after the
/// job's result is returned.
#[derive(Debug, Default)]
pub struct JobContext {
    job_id: String,
    errors: Mutex<Vec<String>>,
}

impl JobContext {
    /// Create a context for the given job id.
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            errors: Mutex::new(Vec::new()),
        }
    }

    /// The id of the job this context belongs to.
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Record a non-fatal failure.
    ///
    /// Never raises; a poisoned lock is recovered so late-stage failures
    /// (e.g. during logout) are still captured.
    pub fn record_error(&self, message: impl Into<String>) {
        let message = message.into();
        warn!("job {}: {}", self.job_id, message);
        let mut errors = match self.errors.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        errors.push(message);
    }

    /// Snapshot of the errors recorded so far, in recording order.
    pub fn errors(&self) -> Vec<String> {
        match self.errors.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Whether any failure has been recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }
}
