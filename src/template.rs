//! Templated configuration rendering seam.
//!
//! Rendering engines live outside this crate; the orchestrator only needs
//! "template identifier + args in, text out".

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Caller-supplied descriptor for generated configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatedConfig {
    /// Template identifier, resolved by the rendering collaborator.
    pub template: String,

    /// Arguments handed to the template.
    #[serde(default)]
    pub args: Value,
}

/// External template-rendering collaborator.
pub trait TemplateRenderer: Send + Sync {
    /// Render the named template with the given arguments.
    fn render(&self, template: &str, args: &Value) -> Result<String>;
}
