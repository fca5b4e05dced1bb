//! # Netapply
//!
//! Transport-agnostic get/set configuration execution for network devices.
//!
//! Netapply lets a caller issue read ("get-config") and write ("set-config")
//! operations without knowing which transport a device speaks. Every backend
//! — interactive CLI session, model-driven API session, connectionless poll,
//! stateless RPC — satisfies the same [`Driver`] contract; the orchestrators
//! add command normalization, declarative pre/post-check validation with
//! gating, job-scoped error aggregation, and optional webhook notification.
//!
//! Wire protocols live outside this crate behind the
//! [`transport`] traits; the embedding application supplies them through a
//! [`TransportFactory`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netapply::{Collaborators, GetRequest, JobContext, run_get};
//! # use netapply::transport::TransportFactory;
//!
//! # async fn example(transports: &dyn TransportFactory) -> Result<(), netapply::Error> {
//! let request: GetRequest = serde_json::from_str(r#"{
//!     "library": "cli-session",
//!     "connection_args": {
//!         "host": "192.168.1.1",
//!         "username": "admin",
//!         "password": "secret",
//!         "device_type": "cisco_ios"
//!     },
//!     "command": "show version"
//! }"#).unwrap();
//!
//! let job = JobContext::new("job-1");
//! let collab = Collaborators::new(transports);
//! let result = run_get(&request, &collab, &job).await?;
//!
//! println!("{result}");
//! for error in job.errors() {
//!     eprintln!("partial failure: {error}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod command;
pub mod driver;
pub mod error;
pub mod exec;
pub mod job;
pub mod result;
pub mod template;
pub mod transport;
pub mod webhook;

// Re-export main types for convenience
pub use check::{CheckDefinition, CheckPhase, MatchType};
pub use command::{CommandInput, normalize_commands};
pub use driver::{ApplyOptions, Backend, ConfigPayload, Driver, build_driver};
pub use error::{Error, TransportError};
pub use exec::{Collaborators, GetRequest, SetRequest, run_get, run_set};
pub use job::JobContext;
pub use result::{ExecutionResult, ResponseValue};
pub use template::{TemplateRenderer, TemplatedConfig};
pub use transport::{ConnectionArgs, TransportFactory};
pub use webhook::{WebhookDispatcher, WebhookPayload};
