//! Execution result types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single command's rendered response.
///
/// The shape depends on the backend and query mode: CLI output split into
/// lines, a poll scalar, ordered key/value pairs from a subtree walk, table
/// rows, a structured document from a model-driven getter, or an error
/// placeholder when the command itself failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// Line-split textual output.
    Lines(Vec<String>),
    /// Single scalar value.
    Scalar(String),
    /// Ordered key/value pairs (subtree walk).
    Pairs(Vec<(String, String)>),
    /// Ordered rows of column/value mappings (table query).
    Rows(Vec<IndexMap<String, String>>),
    /// Structured document returned verbatim by the backend.
    Structured(Value),
    /// Placeholder recorded when the command failed.
    Error(String),
}

/// Result of one get-config or set-config execution.
///
/// Created fresh per execution and returned to the caller even on partial
/// failure; persistence is an external collaborator's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Each executed command mapped to its rendered response, in execution
    /// order.
    #[serde(default)]
    pub responses: IndexMap<String, ResponseValue>,

    /// Diff/echo lines produced by a mutating operation. Absent for reads
    /// and for mutating operations that never reached the device.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<Vec<String>>,
}

impl ExecutionResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command's response.
    pub fn insert(&mut self, command: impl Into<String>, response: ResponseValue) {
        self.responses.insert(command.into(), response);
    }

    /// Merge another result's responses and changes into this one.
    pub fn absorb(&mut self, other: ExecutionResult) {
        self.responses.extend(other.responses);
        if other.changes.is_some() {
            self.changes = other.changes;
        }
    }

    /// Render to the string form used by check validation.
    pub fn to_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl std::fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
