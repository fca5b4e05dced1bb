//! Command normalization.
//!
//! Callers may supply the read payload either as a single string or as an
//! ordered list, and historically under either the `command` or `commands`
//! argument name. Everything downstream works on a canonical `Vec<String>`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A caller-supplied command payload: one string or an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandInput {
    /// A single command string.
    One(String),
    /// An ordered sequence of command strings.
    Many(Vec<String>),
}

impl CommandInput {
    /// Expand into an ordered sequence, preserving order without dedup.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            CommandInput::One(cmd) => vec![cmd.clone()],
            CommandInput::Many(cmds) => cmds.clone(),
        }
    }
}

impl From<&str> for CommandInput {
    fn from(cmd: &str) -> Self {
        CommandInput::One(cmd.to_string())
    }
}

impl From<Vec<String>> for CommandInput {
    fn from(cmds: Vec<String>) -> Self {
        CommandInput::Many(cmds)
    }
}

/// Coerce the caller's `command`/`commands` arguments into a canonical
/// ordered sequence.
///
/// The newer `commands` name takes precedence when both are present.
/// Fails with [`Error::InvalidInput`] when both are absent.
pub fn normalize_commands(
    command: Option<&CommandInput>,
    commands: Option<&CommandInput>,
) -> Result<Vec<String>> {
    commands
        .or(command)
        .map(CommandInput::to_vec)
        .ok_or_else(|| Error::invalid_input("must provide `command` or `commands`"))
}
