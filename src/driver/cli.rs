//! Interactive CLI-session driver.
//!
//! Wraps a live line-oriented session. Configuration is sent as a
//! line-delimited batch followed by a per-device-family finalization step:
//! commit for candidate-config families, save for running-config families,
//! nothing for plain shells. The finalization step is best-effort — a
//! failure there is recorded, not fatal.

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use super::{ApplyOptions, ConfigPayload, Driver};
use crate::error::{Error, Result};
use crate::job::JobContext;
use crate::result::{ExecutionResult, ResponseValue};
use crate::transport::{CliSession, ConnectionArgs};

/// How a CLI device family finalizes a pending configuration change.
///
/// Decided once at driver construction from the caller's device type, never
/// probed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStrategy {
    /// Candidate-config families: explicit commit step.
    Commit,
    /// Running-config families: persist with a save step.
    Save,
    /// Plain shells: nothing to finalize.
    None,
}

impl CommitStrategy {
    /// Resolve the strategy for a device-type string.
    pub fn for_device_type(device_type: &str) -> Result<Self> {
        match device_type {
            "juniper" | "juniper_junos" | "cisco_xr" => Ok(CommitStrategy::Commit),
            "cisco_ios" | "cisco_xe" | "cisco_nxos_ssh" | "nxos" | "arista_eos" => {
                Ok(CommitStrategy::Save)
            }
            "linux" => Ok(CommitStrategy::None),
            other => Err(Error::UnsupportedDeviceType {
                device_type: other.to_string(),
                backend: "cli-session",
            }),
        }
    }
}

/// Driver for interactive CLI sessions.
pub struct CliDriver {
    session: Box<dyn CliSession>,
    params: ConnectionArgs,
    strategy: CommitStrategy,
    options: Value,
}

impl CliDriver {
    /// Wrap a CLI session with the given commit strategy and the caller's
    /// per-call options.
    pub fn new(
        session: Box<dyn CliSession>,
        params: ConnectionArgs,
        strategy: CommitStrategy,
        options: Value,
    ) -> Self {
        Self {
            session,
            params,
            strategy,
            options,
        }
    }

    /// Shape one command response.
    ///
    /// Plain reads split textual output into lines; when per-call options
    /// were supplied the transport's response (possibly a parsed table) is
    /// returned unsplit.
    fn shape_response(&self, response: Value) -> ResponseValue {
        if self.options.is_null() {
            match response {
                Value::String(text) => {
                    ResponseValue::Lines(text.lines().map(str::to_string).collect())
                }
                other => ResponseValue::Structured(other),
            }
        } else {
            match response {
                Value::String(text) => ResponseValue::Scalar(text),
                other => ResponseValue::Structured(other),
            }
        }
    }
}

#[async_trait]
impl Driver for CliDriver {
    async fn connect(&mut self) -> Result<()> {
        debug!("cli-session: connecting to {}", self.params.host);
        self.session.connect(&self.params).await?;
        Ok(())
    }

    async fn logout(&mut self) -> Result<()> {
        self.session.disconnect().await?;
        Ok(())
    }

    async fn run_read_commands(
        &mut self,
        commands: &[String],
        job: &JobContext,
    ) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::new();
        for command in commands {
            match self.session.send_command(command, &self.options).await {
                Ok(response) => result.insert(command, self.shape_response(response)),
                Err(e) => {
                    job.record_error(format!("{e}"));
                    result.insert(command, ResponseValue::Error(format!("{e}")));
                }
            }
        }
        Ok(result)
    }

    async fn apply_config(
        &mut self,
        config: &ConfigPayload,
        options: &ApplyOptions,
        job: &JobContext,
    ) -> Result<ExecutionResult> {
        if options.enable_mode {
            self.session.enter_enable().await?;
        }

        let lines = config.lines();
        let mut response = self.session.send_config_set(&lines, &self.options).await?;

        if !options.dry_run {
            // Best-effort finalization: a failed commit/save is a recorded
            // partial failure, the batch response is still returned.
            let finalize = match self.strategy {
                CommitStrategy::Commit => Some(self.session.commit().await),
                CommitStrategy::Save => Some(self.session.save_config().await),
                CommitStrategy::None => None,
            };
            match finalize {
                Some(Ok(extra)) => response.push_str(&extra),
                Some(Err(e)) => job.record_error(format!("{e}")),
                None => {}
            }
        }

        let mut result = ExecutionResult::new();
        result.changes = Some(response.lines().map(str::to_string).collect());
        Ok(result)
    }
}
