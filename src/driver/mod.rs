//! Backend drivers.
//!
//! Every transport backend satisfies the same [`Driver`] contract: open a
//! session, run read commands, apply configuration, release the session.
//! Orchestration code never branches on the concrete backend once a driver
//! exists — selection happens exactly once, in [`build_driver`], keyed by
//! the caller's `library` string.

mod cli;
mod model_driven;
mod poll;
mod rpc;

pub use cli::{CliDriver, CommitStrategy};
pub use model_driven::ModelDrivenDriver;
pub use poll::{PollDriver, QueryMode};
pub use rpc::RpcDriver;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::job::JobContext;
use crate::result::ExecutionResult;
use crate::transport::{ConnectionArgs, TransportFactory};

/// The closed set of selectable backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Interactive line-oriented CLI session.
    CliSession,
    /// Structured model-driven device API session.
    ModelDriven,
    /// Connectionless request/response query protocol.
    Poll,
    /// Stateless RPC / structured-document transport.
    Rpc,
}

impl Backend {
    /// Parse a caller-supplied `library` selector.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "cli-session" => Ok(Backend::CliSession),
            "model-driven-session" => Ok(Backend::ModelDriven),
            "connectionless-poll" => Ok(Backend::Poll),
            "stateless-rpc" => Ok(Backend::Rpc),
            other => Err(Error::UnsupportedBackend {
                name: other.to_string(),
            }),
        }
    }

    /// Canonical selector string.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::CliSession => "cli-session",
            Backend::ModelDriven => "model-driven-session",
            Backend::Poll => "connectionless-poll",
            Backend::Rpc => "stateless-rpc",
        }
    }
}

/// A configuration payload: one blob or an ordered sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigPayload {
    /// A single configuration blob, line-delimited.
    Blob(String),
    /// An ordered sequence of configuration lines.
    Lines(Vec<String>),
}

impl ConfigPayload {
    /// As an ordered sequence of lines.
    pub fn lines(&self) -> Vec<String> {
        match self {
            ConfigPayload::Blob(text) => text.lines().map(str::to_string).collect(),
            ConfigPayload::Lines(lines) => lines.clone(),
        }
    }

    /// As a single newline-joined blob.
    pub fn text(&self) -> String {
        match self {
            ConfigPayload::Blob(text) => text.clone(),
            ConfigPayload::Lines(lines) => {
                let mut text = String::new();
                for line in lines {
                    text.push_str(line);
                    text.push('\n');
                }
                text
            }
        }
    }
}

impl From<&str> for ConfigPayload {
    fn from(text: &str) -> Self {
        ConfigPayload::Blob(text.to_string())
    }
}

/// Execution modifiers for a mutating operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Compute and return the change without committing it.
    pub dry_run: bool,
    /// Escalate to privileged mode before applying (CLI backends).
    pub enable_mode: bool,
}

/// The polymorphic driver contract every backend satisfies.
///
/// A driver instance owns exactly one device session and is owned by
/// exactly one orchestrator invocation. Per-command transport failures
/// inside [`run_read_commands`](Driver::run_read_commands) are recorded in
/// the job context and surface as error placeholders in the result;
/// session-level failures (`connect`, `logout`, `apply_config`) return
/// `Err` for the orchestrator to record.
#[async_trait]
pub trait Driver: Send {
    /// Open the device session. No-op for connectionless backends.
    async fn connect(&mut self) -> Result<()>;

    /// Release the session. Called exactly once per execution, on every
    /// exit path. No-op for connectionless backends.
    async fn logout(&mut self) -> Result<()>;

    /// Execute read-only commands in order, one response per command.
    async fn run_read_commands(
        &mut self,
        commands: &[String],
        job: &JobContext,
    ) -> Result<ExecutionResult>;

    /// Apply a configuration change.
    async fn apply_config(
        &mut self,
        config: &ConfigPayload,
        options: &ApplyOptions,
        job: &JobContext,
    ) -> Result<ExecutionResult>;
}

/// Construct the driver for the caller's `library` selector.
///
/// Performs backend-specific argument translation up front: the CLI backend
/// resolves its commit strategy and the model-driven backend its driver
/// taxonomy from `device_type` (unknown values fail with
/// [`Error::UnsupportedDeviceType`]); the poll backend resolves its query
/// mode from `args`, while the CLI and RPC backends carry `args` as
/// per-call options forwarded to the transport. The concrete wire
/// transport comes from `transports`.
pub fn build_driver(
    library: &str,
    params: ConnectionArgs,
    args: &Value,
    transports: &dyn TransportFactory,
) -> Result<Box<dyn Driver>> {
    match Backend::parse(library)? {
        Backend::CliSession => {
            let strategy = CommitStrategy::for_device_type(params.device_type())?;
            let session = transports.cli_session()?;
            Ok(Box::new(CliDriver::new(session, params, strategy, args.clone())))
        }
        Backend::ModelDriven => {
            let driver_name = model_driven::translate_device_type(params.device_type())?;
            let session = transports.model_driven_session(driver_name)?;
            Ok(Box::new(ModelDrivenDriver::new(session, params)))
        }
        Backend::Poll => {
            let mode = QueryMode::from_args(args)?;
            let client = transports.poll_client()?;
            Ok(Box::new(PollDriver::new(client, params, mode)))
        }
        Backend::Rpc => {
            let transport = transports.rpc_transport()?;
            Ok(Box::new(RpcDriver::new(transport, params, args.clone())))
        }
    }
}

#[cfg(test)]
pub(crate) mod testing;
