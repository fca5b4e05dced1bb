//! Connection parameter handling.

use std::time::Duration;

use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::Value;

/// Connection parameters for one device.
///
/// Common fields are typed; anything backend-specific rides along in
/// `extra` and is forwarded to the transport untouched. One instance is
/// exclusively owned by one driver for the lifetime of one execution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionArgs {
    /// Target host (hostname or IP address).
    pub host: String,

    /// Transport port; backends apply their own default when absent.
    #[serde(default)]
    pub port: Option<u16>,

    /// Username for authentication.
    #[serde(default)]
    pub username: Option<String>,

    /// Password for authentication.
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Device family selector, translated per backend at driver
    /// construction.
    #[serde(default)]
    pub device_type: Option<String>,

    /// Community string for poll transports.
    #[serde(default)]
    pub community: Option<SecretString>,

    /// Per-request timeout in seconds; backends apply their own default
    /// when absent. Opaque to orchestration, passed straight through.
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Backend-specific options forwarded verbatim to the transport.
    #[serde(flatten, default)]
    pub extra: IndexMap<String, Value>,
}

impl ConnectionArgs {
    /// Port with a backend-supplied fallback.
    pub fn port_or(&self, default: u16) -> u16 {
        self.port.unwrap_or(default)
    }

    /// Timeout with a backend-supplied fallback, as a [`Duration`].
    pub fn timeout_or(&self, default_secs: u64) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(default_secs))
    }

    /// Device type, defaulting to an empty string when absent.
    pub fn device_type(&self) -> &str {
        self.device_type.as_deref().unwrap_or_default()
    }
}
