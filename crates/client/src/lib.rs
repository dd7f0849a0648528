//! NTCore client SDK.
//!
//! [`Client`] is the entry point: it manages workspaces on the registry
//! server, tracks experiment runs on the client side, and uploads trained
//! models with their metadata.
//!
//! ```no_run
//! # async fn demo() -> Result<(), client::RegistryError> {
//! use client::{Client, ClientConfig, Metadata};
//! use serde_json::json;
//!
//! let mut client = Client::new(ClientConfig::default().with_credentials("ada", "secret"))?;
//! let workspace = client.create_workspace("churn").await?;
//! let workspace_id = workspace["id"].as_str().unwrap_or_default().to_string();
//!
//! client.start_run(workspace_id);
//! client.log_pretraining_metadata(json!({"max_depth": 4}).as_object().cloned().unwrap_or_default())?;
//! // ... train ...
//! client.log_posttraining_metadata(Metadata::new())?;
//! # let model = vec![0.5_f64, 1.0];
//! # struct Weights(Vec<f64>);
//! # impl client::TrainedModel for Weights {
//! #     fn as_estimator(&self) -> Option<&dyn client::Estimator> { Some(&self.0) }
//! # }
//! client.save_model(&Weights(model)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architectural Layer
//!
//! **Orchestration.** The facade sequences the `serializer` and `transport`
//! crates around the domain types in `registry`; it holds no HTTP or
//! filesystem code of its own.
//!
//! ## Logging
//!
//! Every crate in the workspace emits `tracing` events. Nothing is printed
//! unless the application installs a subscriber; [`telemetry::init`] installs
//! a JSON one filtered by `RUST_LOG`.

mod client;
pub mod telemetry;

pub use client::Client;

// Re-export the domain types callers need alongside the facade.
pub use registry::{
    load_estimator, ClientConfig, EncryptionConfig, Estimator, ExperimentPayload, Framework,
    LayeredNetwork, Metadata, ModelVersion, RegistryError, Run, RunId, SerializeError,
    TensorModule, TrainedModel, Transport, TransportError, WorkspaceId, DEFAULT_SERVER,
};
pub use transport::HttpTransport;
