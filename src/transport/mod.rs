//! Transport boundary.
//!
//! The wire protocols themselves (SSH scraping, NETCONF, SNMP, RESTCONF)
//! live outside this crate. Each backend driver consumes one of the traits
//! defined here; the embedding application supplies concrete implementations
//! through a [`TransportFactory`].

mod config;

pub use config::ConnectionArgs;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Result, TransportError};

/// A live, stateful line-oriented device session (interactive CLI).
#[async_trait]
pub trait CliSession: Send {
    /// Establish and authenticate the session.
    async fn connect(&mut self, params: &ConnectionArgs) -> std::result::Result<(), TransportError>;

    /// Send one command and return its response.
    ///
    /// `options` carries the caller's per-call options (output template
    /// name, paging, ...) and is `Null` when none were supplied. With
    /// options the transport may return a structured document (e.g. a
    /// parsed table) instead of plain text.
    async fn send_command(
        &mut self,
        command: &str,
        options: &Value,
    ) -> std::result::Result<Value, TransportError>;

    /// Escalate to the device's privileged mode.
    async fn enter_enable(&mut self) -> std::result::Result<(), TransportError>;

    /// Send a line-delimited configuration batch and return the device echo.
    async fn send_config_set(
        &mut self,
        lines: &[String],
        options: &Value,
    ) -> std::result::Result<String, TransportError>;

    /// Commit pending changes (device families with candidate configs).
    async fn commit(&mut self) -> std::result::Result<String, TransportError>;

    /// Persist the running config (device families without commit).
    async fn save_config(&mut self) -> std::result::Result<String, TransportError>;

    /// Tear down the session.
    async fn disconnect(&mut self) -> std::result::Result<(), TransportError>;
}

/// A live session against a structured, model-driven device API.
#[async_trait]
pub trait ModelDrivenSession: Send {
    /// Open the session.
    async fn open(&mut self, params: &ConnectionArgs) -> std::result::Result<(), TransportError>;

    /// Invoke a named structured getter, or `None` if the backend has no
    /// getter by that name.
    async fn getter(&mut self, name: &str)
    -> std::result::Result<Option<Value>, TransportError>;

    /// Run a raw CLI command through the session.
    async fn cli(&mut self, command: &str) -> std::result::Result<String, TransportError>;

    /// Merge a configuration candidate against the running state.
    async fn load_merge_candidate(
        &mut self,
        config: &str,
    ) -> std::result::Result<(), TransportError>;

    /// Structural diff of the candidate against the running config.
    async fn compare_config(&mut self) -> std::result::Result<String, TransportError>;

    /// Commit the candidate.
    async fn commit_config(&mut self) -> std::result::Result<(), TransportError>;

    /// Discard the candidate.
    async fn discard_config(&mut self) -> std::result::Result<(), TransportError>;

    /// Close the session.
    async fn close(&mut self) -> std::result::Result<(), TransportError>;
}

/// A connectionless request/response query client.
///
/// There is no session to open or close; every call is an independent
/// request carrying the connection parameters.
#[async_trait]
pub trait PollClient: Send {
    /// Fetch a single value.
    async fn get(
        &mut self,
        params: &ConnectionArgs,
        oid: &str,
    ) -> std::result::Result<String, TransportError>;

    /// Walk a subtree, returning ordered key/value pairs.
    async fn walk(
        &mut self,
        params: &ConnectionArgs,
        oid: &str,
    ) -> std::result::Result<Vec<(String, String)>, TransportError>;

    /// Fetch a table, returning ordered rows of column/value mappings.
    async fn table(
        &mut self,
        params: &ConnectionArgs,
        oid: &str,
    ) -> std::result::Result<Vec<IndexMap<String, String>>, TransportError>;
}

/// A stateless RPC / structured-document transport.
///
/// Both reads and writes are single request/response round trips; the
/// backend's own response document is returned verbatim.
#[async_trait]
pub trait RpcTransport: Send {
    /// Acquire a short-lived handle.
    async fn open(&mut self, params: &ConnectionArgs) -> std::result::Result<(), TransportError>;

    /// Issue a read request for the given resource.
    async fn get(
        &mut self,
        resource: &str,
        options: &Value,
    ) -> std::result::Result<Value, TransportError>;

    /// Issue a write request carrying the configuration payload.
    async fn edit(
        &mut self,
        payload: &str,
        options: &Value,
    ) -> std::result::Result<Value, TransportError>;

    /// Release the handle.
    async fn close(&mut self) -> std::result::Result<(), TransportError>;
}

/// Supplier of concrete transport implementations.
///
/// The driver factory asks for exactly one transport per execution; the
/// returned object is exclusively owned by that driver instance.
pub trait TransportFactory: Send + Sync {
    /// Build an interactive CLI session.
    fn cli_session(&self) -> Result<Box<dyn CliSession>>;

    /// Build a model-driven session for the translated driver name
    /// (e.g. "eos", "junos").
    fn model_driven_session(&self, driver_name: &str) -> Result<Box<dyn ModelDrivenSession>>;

    /// Build a connectionless poll client.
    fn poll_client(&self) -> Result<Box<dyn PollClient>>;

    /// Build a stateless RPC transport.
    fn rpc_transport(&self) -> Result<Box<dyn RpcTransport>>;
}
