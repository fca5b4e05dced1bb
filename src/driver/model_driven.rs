//! Model-driven session driver.
//!
//! Wraps a structured device API. Reads prefer a named structured getter
//! and fall back to CLI passthrough; writes merge a candidate, compute a
//! structural diff against the running state, then commit or discard. The
//! `changes` field is the computed diff, not raw device echo — a materially
//! different contract from the CLI-session backend.

use async_trait::async_trait;
use log::debug;

use super::{ApplyOptions, ConfigPayload, Driver};
use crate::error::{Error, Result};
use crate::job::JobContext;
use crate::result::{ExecutionResult, ResponseValue};
use crate::transport::{ConnectionArgs, ModelDrivenSession};

/// Translate the generic device-type taxonomy into the model-driven
/// backend's own driver names.
pub(crate) fn translate_device_type(device_type: &str) -> Result<&'static str> {
    match device_type {
        "arista_eos" => Ok("eos"),
        "juniper" => Ok("junos"),
        "cisco_xr" => Ok("iosxr"),
        "nxos" => Ok("nxos"),
        "cisco_nxos_ssh" => Ok("nxos_ssh"),
        "cisco_ios" => Ok("ios"),
        other => Err(Error::UnsupportedDeviceType {
            device_type: other.to_string(),
            backend: "model-driven-session",
        }),
    }
}

/// Driver for structured model-driven sessions.
pub struct ModelDrivenDriver {
    session: Box<dyn ModelDrivenSession>,
    params: ConnectionArgs,
}

impl ModelDrivenDriver {
    /// Wrap a model-driven session.
    pub fn new(session: Box<dyn ModelDrivenSession>, params: ConnectionArgs) -> Self {
        Self { session, params }
    }
}

#[async_trait]
impl Driver for ModelDrivenDriver {
    async fn connect(&mut self) -> Result<()> {
        debug!("model-driven-session: opening {}", self.params.host);
        self.session.open(&self.params).await?;
        Ok(())
    }

    async fn logout(&mut self) -> Result<()> {
        self.session.close().await?;
        Ok(())
    }

    async fn run_read_commands(
        &mut self,
        commands: &[String],
        job: &JobContext,
    ) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::new();
        for command in commands {
            let response = match self.session.getter(command).await {
                Ok(Some(value)) => Ok(ResponseValue::Structured(value)),
                Ok(None) => self.session.cli(command).await.map(|output| {
                    ResponseValue::Lines(output.lines().map(str::to_string).collect())
                }),
                Err(e) => Err(e),
            };
            match response {
                Ok(value) => result.insert(command, value),
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
        _job: &JobContext,
    ) -> Result<ExecutionResult> {
        self.session.load_merge_candidate(&config.text()).await?;
        let diff = self.session.compare_config().await?;

        if options.dry_run {
            self.session.discard_config().await?;
        } else {
            self.session.commit_config().await?;
        }

        let mut result = ExecutionResult::new();
        result.changes = Some(diff.lines().map(str::to_string).collect());
        Ok(result)
    }
}
