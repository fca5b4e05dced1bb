//! Stateless RPC driver.
//!
//! The session is a short-lived handle per execution; reads and writes are
//! single request/response round trips. No diff is computed — the backend's
//! own response document is returned verbatim.

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use super::{ApplyOptions, ConfigPayload, Driver};
use crate::error::Result;
use crate::job::JobContext;
use crate::result::{ExecutionResult, ResponseValue};
use crate::transport::{ConnectionArgs, RpcTransport};

/// Result key under which the write response is reported.
const CONFIG_KEY: &str = "config";

/// Driver for stateless RPC / structured-document transports.
pub struct RpcDriver {
    transport: Box<dyn RpcTransport>,
    params: ConnectionArgs,
    options: Value,
}

impl RpcDriver {
    /// Wrap an RPC transport with its backend-specific call options.
    pub fn new(transport: Box<dyn RpcTransport>, params: ConnectionArgs, options: Value) -> Self {
        Self {
            transport,
            params,
            options,
        }
    }
}

#[async_trait]
impl Driver for RpcDriver {
    async fn connect(&mut self) -> Result<()> {
        debug!("stateless-rpc: opening handle to {}", self.params.host);
        self.transport.open(&self.params).await?;
        Ok(())
    }

    async fn logout(&mut self) -> Result<()> {
        self.transport.close().await?;
        Ok(())
    }

    async fn run_read_commands(
        &mut self,
        commands: &[String],
        job: &JobContext,
    ) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::new();
        for resource in commands {
            match self.transport.get(resource, &self.options).await {
                Ok(value) => result.insert(resource, ResponseValue::Structured(value)),
                Err(e) => {
                    job.record_error(format!("{e}"));
                    result.insert(resource, ResponseValue::Error(format!("{e}")));
                }
            }
        }
        Ok(result)
    }

    async fn apply_config(
        &mut self,
        config: &ConfigPayload,
        _options: &ApplyOptions,
        _job: &JobContext,
    ) -> Result<ExecutionResult> {
        let response = self.transport.edit(&config.text(), &self.options).await?;
        let mut result = ExecutionResult::new();
        result.insert(CONFIG_KEY, ResponseValue::Structured(response));
        Ok(result)
    }
}
