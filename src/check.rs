//! Declarative pre/post-check validation.
//!
//! A check reads a command's output and asserts that a set of substrings is
//! (or is not) present. Failures are reported through the job context, never
//! raised — a failed check must not kill the job.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::job::JobContext;

/// Whether a check's substrings must be present or absent.
///
/// Closed set: anything else in the request fails deserialization up front
/// rather than silently matching nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Pass only if every listed substring appears in the output.
    Include,
    /// Pass only if no listed substring appears in the output.
    Exclude,
}

/// When a check runs relative to the primary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckPhase {
    /// Before the mutating operation; a failure gates it.
    Pre,
    /// After the primary operation.
    Post,
}

impl CheckPhase {
    fn label(self) -> &'static str {
        match self {
            CheckPhase::Pre => "PreCheck",
            CheckPhase::Post => "PostCheck",
        }
    }
}

/// A declarative assertion over one read command's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDefinition {
    /// Read-only command whose output is inspected.
    pub command: String,

    /// Presence or absence assertion.
    pub match_type: MatchType,

    /// Substrings tested against the stringified output, in order.
    pub match_str: Vec<String>,
}

impl CheckDefinition {
    /// Evaluate against the stringified command output.
    ///
    /// Returns `None` on pass, or a description of the first failing
    /// substring. Short-circuits within this check only; the caller still
    /// evaluates every remaining check in its list.
    pub fn evaluate(&self, output: &str) -> Option<String> {
        for match_str in &self.match_str {
            match self.match_type {
                MatchType::Include if !output.contains(match_str.as_str()) => {
                    return Some(format!("{match_str} not found in {output}"));
                }
                MatchType::Exclude if output.contains(match_str.as_str()) => {
                    return Some(format!("{match_str} found in {output}"));
                }
                _ => {}
            }
        }
        None
    }

    /// Evaluate and record any failure in the job context, tagged with the
    /// phase it ran in. Returns whether the check passed.
    pub fn evaluate_and_record(&self, phase: CheckPhase, output: &str, job: &JobContext) -> bool {
        match self.evaluate(output) {
            Some(failure) => {
                let failed = Error::CheckFailed(format!("{} Failed: {failure}", phase.label()));
                job.record_error(failed.to_string());
                false
            }
            None => true,
        }
    }
}
