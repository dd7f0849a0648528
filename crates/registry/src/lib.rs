//! Core domain for the NTCore client SDK.
//!
//! This crate holds the identifiers, run lifecycle, upload payloads and error
//! types shared by the rest of the workspace, plus the two seams the facade is
//! built on: the [`Transport`] port and the [`TrainedModel`] capability traits.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** No I/O happens here. The `serializer` crate
//! turns models into bytes, the `transport` crate talks HTTP, and the `client`
//! crate sequences the two.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | `WorkspaceId`, `ModelVersion`, `RunId`, `RuntimeVersion` |
//! | [`types`] | `Framework`, `Metadata`, `Timestamp` |
//! | [`errors`] | `RegistryError`, `SerializeError`, `TransportError` |
//! | [`config`] | `ClientConfig`, `EncryptionConfig` |
//! | [`paths`] | Relative REST path builder |
//! | [`run`] | `Run` and the pending-run `RunQueue` |
//! | [`model`] | Model capability traits and `ModelKind` |
//! | [`payload`] | Request bodies, including the experiment upload |
//! | [`transport`] | The `Transport` port trait |

pub mod config;
pub mod errors;
pub mod identifiers;
pub mod model;
pub mod paths;
pub mod payload;
pub mod run;
pub mod transport;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{ClientConfig, EncryptionConfig, DEFAULT_SERVER};
pub use errors::{RegistryError, SerializeError, TransportError};
pub use identifiers::{ModelVersion, RunId, RuntimeVersion, WorkspaceId};
pub use model::{
    load_estimator, Estimator, LayeredNetwork, ModelKind, SerializedModel, TensorModule,
    TrainedModel,
};
pub use paths::build_path;
pub use payload::{CreateWorkspaceRequest, ExperimentPayload, RegisterExperimentRequest};
pub use run::{Run, RunQueue};
pub use transport::Transport;
pub use types::{Framework, Metadata, Timestamp};
