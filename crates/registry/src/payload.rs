//! Request bodies sent to the registry server.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::{Framework, Metadata, ModelVersion, RegistryError, RuntimeVersion, SerializedModel};

/// Body of `POST workspace`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWorkspaceRequest {
    /// Workspace type; the SDK always creates `"API"` workspaces.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

impl CreateWorkspaceRequest {
    pub fn api(name: impl Into<String>) -> Self {
        Self {
            kind: "API".to_string(),
            name: name.into(),
        }
    }
}

/// Body of `POST workspace/{id}/registry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterExperimentRequest {
    pub version: ModelVersion,
}

// ---------------------------------------------------------------------------

/// Body of `POST workspace/{id}/experiment`: one trained model with its metadata.
///
/// `parameters` and `metrics` are JSON text (the metadata maps encoded once
/// more as strings); `model` is the standard base64 encoding of the serialized
/// model bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentPayload {
    pub runtime: RuntimeVersion,
    pub framework: Framework,
    pub parameters: String,
    pub metrics: String,
    pub model: String,
}

impl ExperimentPayload {
    /// Assembles the upload body.
    pub fn new(
        runtime: RuntimeVersion,
        pretraining_metadata: &Metadata,
        posttraining_metadata: &Metadata,
        serialized: &SerializedModel,
    ) -> Result<Self, RegistryError> {
        Ok(Self {
            runtime,
            framework: serialized.framework,
            parameters: encode_metadata(pretraining_metadata)?,
            metrics: encode_metadata(posttraining_metadata)?,
            model: STANDARD.encode(&serialized.bytes),
        })
    }

    /// Decodes the `model` field back into raw bytes.
    pub fn model_bytes(&self) -> Result<Vec<u8>, RegistryError> {
        STANDARD
            .decode(&self.model)
            .map_err(|e| RegistryError::Payload {
                message: format!("model is not valid base64: {e}"),
            })
    }
}

fn encode_metadata(metadata: &Metadata) -> Result<String, RegistryError> {
    serde_json::to_string(metadata).map_err(|e| RegistryError::Payload {
        message: e.to_string(),
    })
}
