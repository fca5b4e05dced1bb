//! Spy transports shared across driver and orchestrator tests.
//!
//! Each spy clones into the driver while the test keeps its own handle;
//! state lives behind an `Arc<Mutex>` so call counts and scripted responses
//! are visible from both sides.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Result, TransportError};
use crate::transport::{
    CliSession, ConnectionArgs, ModelDrivenSession, PollClient, RpcTransport, TransportFactory,
};

fn protocol_failure(what: &str) -> TransportError {
    TransportError::Protocol(format!("scripted failure: {what}"))
}

#[derive(Default)]
struct CliState {
    responses: HashMap<String, Value>,
    failing_commands: Vec<String>,
    fail_connect: bool,
    fail_commit: bool,
    fail_config_set: bool,
    connect_calls: usize,
    disconnect_calls: usize,
    enable_calls: usize,
    commit_calls: usize,
    save_calls: usize,
    config_sets: Vec<Vec<String>>,
    commands_sent: Vec<String>,
    options_seen: Vec<Value>,
}

/// Scriptable CLI session spy.
#[derive(Clone, Default)]
pub(crate) struct SpyCliSession {
    state: Arc<Mutex<CliState>>,
}

impl SpyCliSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, command: &str, output: &str) {
        self.state
            .lock()
            .unwrap()
            .responses
            .insert(command.to_string(), Value::String(output.to_string()));
    }

    pub fn respond_structured(&self, command: &str, response: Value) {
        self.state
            .lock()
            .unwrap()
            .responses
            .insert(command.to_string(), response);
    }

    pub fn fail_command(&self, command: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_commands
            .push(command.to_string());
    }

    pub fn fail_connect(&self) {
        self.state.lock().unwrap().fail_connect = true;
    }

    pub fn fail_commit(&self) {
        self.state.lock().unwrap().fail_commit = true;
    }

    pub fn fail_config_set(&self) {
        self.state.lock().unwrap().fail_config_set = true;
    }

    pub fn connect_calls(&self) -> usize {
        self.state.lock().unwrap().connect_calls
    }

    pub fn disconnect_calls(&self) -> usize {
        self.state.lock().unwrap().disconnect_calls
    }

    pub fn enable_calls(&self) -> usize {
        self.state.lock().unwrap().enable_calls
    }

    pub fn commit_calls(&self) -> usize {
        self.state.lock().unwrap().commit_calls
    }

    pub fn save_calls(&self) -> usize {
        self.state.lock().unwrap().save_calls
    }

    pub fn config_sets(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().config_sets.clone()
    }

    pub fn commands_sent(&self) -> Vec<String> {
        self.state.lock().unwrap().commands_sent.clone()
    }

    pub fn options_seen(&self) -> Vec<Value> {
        self.state.lock().unwrap().options_seen.clone()
    }
}

#[async_trait]
impl CliSession for SpyCliSession {
    async fn connect(&mut self, params: &ConnectionArgs) -> std::result::Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        state.connect_calls += 1;
        if state.fail_connect {
            return Err(TransportError::ConnectionFailed {
                host: params.host.clone(),
                message: "scripted refusal".into(),
            });
        }
        Ok(())
    }

    async fn send_command(
        &mut self,
        command: &str,
        options: &Value,
    ) -> std::result::Result<Value, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.commands_sent.push(command.to_string());
        state.options_seen.push(options.clone());
        if state.failing_commands.iter().any(|c| c == command) {
            return Err(protocol_failure(command));
        }
        Ok(state
            .responses
            .get(command)
            .cloned()
            .unwrap_or_else(|| Value::String(String::new())))
    }

    async fn enter_enable(&mut self) -> std::result::Result<(), TransportError> {
        self.state.lock().unwrap().enable_calls += 1;
        Ok(())
    }

    async fn send_config_set(
        &mut self,
        lines: &[String],
        options: &Value,
    ) -> std::result::Result<String, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.options_seen.push(options.clone());
        if state.fail_config_set {
            return Err(protocol_failure("config set"));
        }
        state.config_sets.push(lines.to_vec());
        Ok(lines.join("\n"))
    }

    async fn commit(&mut self) -> std::result::Result<String, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.commit_calls += 1;
        if state.fail_commit {
            return Err(protocol_failure("commit"));
        }
        Ok("\ncommit complete".to_string())
    }

    async fn save_config(&mut self) -> std::result::Result<String, TransportError> {
        self.state.lock().unwrap().save_calls += 1;
        Ok("\n[OK]".to_string())
    }

    async fn disconnect(&mut self) -> std::result::Result<(), TransportError> {
        self.state.lock().unwrap().disconnect_calls += 1;
        Ok(())
    }
}

#[derive(Default)]
struct ModelDrivenState {
    getters: HashMap<String, Value>,
    cli_responses: HashMap<String, String>,
    diff: String,
    loaded: Vec<String>,
    commit_calls: usize,
    discard_calls: usize,
    close_calls: usize,
}

/// Scriptable model-driven session spy.
#[derive(Clone, Default)]
pub(crate) struct SpyModelDrivenSession {
    state: Arc<Mutex<ModelDrivenState>>,
}

impl SpyModelDrivenSession {
    pub fn new(diff: &str) -> Self {
        let spy = Self::default();
        spy.state.lock().unwrap().diff = diff.to_string();
        spy
    }

    pub fn set_diff(&self, diff: &str) {
        self.state.lock().unwrap().diff = diff.to_string();
    }

    pub fn add_getter(&self, name: &str, value: Value) {
        self.state
            .lock()
            .unwrap()
            .getters
            .insert(name.to_string(), value);
    }

    pub fn respond_cli(&self, command: &str, output: &str) {
        self.state
            .lock()
            .unwrap()
            .cli_responses
            .insert(command.to_string(), output.to_string());
    }

    pub fn commit_calls(&self) -> usize {
        self.state.lock().unwrap().commit_calls
    }

    pub fn discard_calls(&self) -> usize {
        self.state.lock().unwrap().discard_calls
    }

    pub fn close_calls(&self) -> usize {
        self.state.lock().unwrap().close_calls
    }
}

#[async_trait]
impl ModelDrivenSession for SpyModelDrivenSession {
    async fn open(&mut self, _params: &ConnectionArgs) -> std::result::Result<(), TransportError> {
        Ok(())
    }

    async fn getter(
        &mut self,
        name: &str,
    ) -> std::result::Result<Option<Value>, TransportError> {
        Ok(self.state.lock().unwrap().getters.get(name).cloned())
    }

    async fn cli(&mut self, command: &str) -> std::result::Result<String, TransportError> {
        self.state
            .lock()
            .unwrap()
            .cli_responses
            .get(command)
            .cloned()
            .ok_or_else(|| protocol_failure(command))
    }

    async fn load_merge_candidate(
        &mut self,
        config: &str,
    ) -> std::result::Result<(), TransportError> {
        self.state.lock().unwrap().loaded.push(config.to_string());
        Ok(())
    }

    async fn compare_config(&mut self) -> std::result::Result<String, TransportError> {
        Ok(self.state.lock().unwrap().diff.clone())
    }

    async fn commit_config(&mut self) -> std::result::Result<(), TransportError> {
        self.state.lock().unwrap().commit_calls += 1;
        Ok(())
    }

    async fn discard_config(&mut self) -> std::result::Result<(), TransportError> {
        self.state.lock().unwrap().discard_calls += 1;
        Ok(())
    }

    async fn close(&mut self) -> std::result::Result<(), TransportError> {
        self.state.lock().unwrap().close_calls += 1;
        Ok(())
    }
}

#[derive(Default)]
struct PollState {
    scalars: HashMap<String, String>,
    walks: HashMap<String, Vec<(String, String)>>,
    tables: HashMap<String, Vec<IndexMap<String, String>>>,
    request_count: usize,
}

/// Scriptable poll client spy.
#[derive(Clone, Default)]
pub(crate) struct SpyPollClient {
    state: Arc<Mutex<PollState>>,
}

impl SpyPollClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scalar(&self, oid: &str, value: &str) {
        self.state
            .lock()
            .unwrap()
            .scalars
            .insert(oid.to_string(), value.to_string());
    }

    pub fn set_walk(&self, oid: &str, pairs: Vec<(String, String)>) {
        self.state.lock().unwrap().walks.insert(oid.to_string(), pairs);
    }

    pub fn set_table(&self, oid: &str, rows: Vec<IndexMap<String, String>>) {
        self.state.lock().unwrap().tables.insert(oid.to_string(), rows);
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().request_count
    }
}

#[async_trait]
impl PollClient for SpyPollClient {
    async fn get(
        &mut self,
        _params: &ConnectionArgs,
        oid: &str,
    ) -> std::result::Result<String, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.request_count += 1;
        state
            .scalars
            .get(oid)
            .cloned()
            .ok_or_else(|| protocol_failure(oid))
    }

    async fn walk(
        &mut self,
        _params: &ConnectionArgs,
        oid: &str,
    ) -> std::result::Result<Vec<(String, String)>, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.request_count += 1;
        state
            .walks
            .get(oid)
            .cloned()
            .ok_or_else(|| protocol_failure(oid))
    }

    async fn table(
        &mut self,
        _params: &ConnectionArgs,
        oid: &str,
    ) -> std::result::Result<Vec<IndexMap<String, String>>, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.request_count += 1;
        state
            .tables
            .get(oid)
            .cloned()
            .ok_or_else(|| protocol_failure(oid))
    }
}

#[derive(Default)]
struct RpcState {
    resources: HashMap<String, Value>,
    edit_response: Option<Value>,
    open_calls: usize,
    close_calls: usize,
    edit_calls: usize,
}

/// Scriptable RPC transport spy.
#[derive(Clone, Default)]
pub(crate) struct SpyRpcTransport {
    state: Arc<Mutex<RpcState>>,
}

impl SpyRpcTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_resource(&self, resource: &str, value: Value) {
        self.state
            .lock()
            .unwrap()
            .resources
            .insert(resource.to_string(), value);
    }

    pub fn set_edit_response(&self, value: Value) {
        self.state.lock().unwrap().edit_response = Some(value);
    }

    pub fn edit_calls(&self) -> usize {
        self.state.lock().unwrap().edit_calls
    }

    pub fn close_calls(&self) -> usize {
        self.state.lock().unwrap().close_calls
    }
}

#[async_trait]
impl RpcTransport for SpyRpcTransport {
    async fn open(&mut self, _params: &ConnectionArgs) -> std::result::Result<(), TransportError> {
        self.state.lock().unwrap().open_calls += 1;
        Ok(())
    }

    async fn get(
        &mut self,
        resource: &str,
        _options: &Value,
    ) -> std::result::Result<Value, TransportError> {
        self.state
            .lock()
            .unwrap()
            .resources
            .get(resource)
            .cloned()
            .ok_or_else(|| protocol_failure(resource))
    }

    async fn edit(
        &mut self,
        _payload: &str,
        _options: &Value,
    ) -> std::result::Result<Value, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.edit_calls += 1;
        state
            .edit_response
            .clone()
            .ok_or_else(|| protocol_failure("edit"))
    }

    async fn close(&mut self) -> std::result::Result<(), TransportError> {
        self.state.lock().unwrap().close_calls += 1;
        Ok(())
    }
}

/// Factory handing out clones of the spies above.
#[derive(Clone, Default)]
pub(crate) struct SpyTransportFactory {
    pub cli: SpyCliSession,
    pub model_driven: SpyModelDrivenSession,
    pub poll: SpyPollClient,
    pub rpc: SpyRpcTransport,
}

impl SpyTransportFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransportFactory for SpyTransportFactory {
    fn cli_session(&self) -> Result<Box<dyn CliSession>> {
        Ok(Box::new(self.cli.clone()))
    }

    fn model_driven_session(&self, _driver_name: &str) -> Result<Box<dyn ModelDrivenSession>> {
        Ok(Box::new(self.model_driven.clone()))
    }

    fn poll_client(&self) -> Result<Box<dyn PollClient>> {
        Ok(Box::new(self.poll.clone()))
    }

    fn rpc_transport(&self) -> Result<Box<dyn RpcTransport>> {
        Ok(Box::new(self.rpc.clone()))
    }
}
