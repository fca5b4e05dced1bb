//! Connectionless poll driver.
//!
//! There is no session: `connect` and `logout` are no-ops and every command
//! is one independent request. The caller picks a query mode through
//! `args.type`; each mode has its own result shape. This backend is
//! read-only — mutating calls fail before any network request is attempted.

use async_trait::async_trait;
use serde_json::Value;

use super::{ApplyOptions, ConfigPayload, Driver};
use crate::error::{Error, Result};
use crate::job::JobContext;
use crate::result::{ExecutionResult, ResponseValue};
use crate::transport::{ConnectionArgs, PollClient};

const DEFAULT_PORT: u16 = 161;
const DEFAULT_TIMEOUT_SECS: u64 = 2;

/// Query mode selecting the request and result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// Single scalar value per command.
    #[default]
    Get,
    /// Subtree walk: ordered key/value pairs.
    Walk,
    /// Table query: ordered rows of column/value mappings.
    Table,
}

impl QueryMode {
    /// Resolve the mode from the caller's backend-specific `args`.
    ///
    /// Absent means `get`; an unrecognized value is a configuration error.
    pub fn from_args(args: &Value) -> Result<Self> {
        match args.get("type").and_then(Value::as_str) {
            None | Some("get") => Ok(QueryMode::Get),
            Some("walk") => Ok(QueryMode::Walk),
            Some("table") => Ok(QueryMode::Table),
            Some(other) => Err(Error::invalid_input(format!(
                "unknown poll query type '{other}'"
            ))),
        }
    }
}

/// Driver for connectionless poll transports.
pub struct PollDriver {
    client: Box<dyn PollClient>,
    params: ConnectionArgs,
    mode: QueryMode,
}

impl PollDriver {
    /// Wrap a poll client, applying the backend's port/timeout defaults.
    pub fn new(client: Box<dyn PollClient>, mut params: ConnectionArgs, mode: QueryMode) -> Self {
        params.port = Some(params.port_or(DEFAULT_PORT));
        params.timeout = Some(params.timeout_or(DEFAULT_TIMEOUT_SECS).as_secs());
        Self {
            client,
            params,
            mode,
        }
    }
}

#[async_trait]
impl Driver for PollDriver {
    async fn connect(&mut self) -> Result<()> {
        // Connectionless: nothing to open.
        Ok(())
    }

    async fn logout(&mut self) -> Result<()> {
        Ok(())
    }

    async fn run_read_commands(
        &mut self,
        commands: &[String],
        job: &JobContext,
    ) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::new();
        for oid in commands {
            let response = match self.mode {
                QueryMode::Get => self
                    .client
                    .get(&self.params, oid)
                    .await
                    .map(ResponseValue::Scalar),
                QueryMode::Walk => self
                    .client
                    .walk(&self.params, oid)
                    .await
                    .map(ResponseValue::Pairs),
                QueryMode::Table => self
                    .client
                    .table(&self.params, oid)
                    .await
                    .map(ResponseValue::Rows),
            };
            match response {
                Ok(value) => result.insert(oid, value),
                Err(e) => {
                    job.record_error(format!("{e}"));
                    result.insert(oid, ResponseValue::Error(format!("{e}")));
                }
            }
        }
        Ok(result)
    }

    async fn apply_config(
        &mut self,
        _config: &ConfigPayload,
        _options: &ApplyOptions,
        _job: &JobContext,
    ) -> Result<ExecutionResult> {
        Err(Error::UnsupportedOperation {
            message: "connectionless-poll backend does not support configuration changes"
                .to_string(),
        })
    }
}
