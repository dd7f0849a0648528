//! Error types for the NTCore client.
//!
//! [`RegistryError`] is what every facade operation returns. Component-level
//! failures ([`SerializeError`] from the model serializer, [`TransportError`]
//! from the HTTP adapter) convert into it with `?`.
//!
//! Nothing in this crate retries: a failed upload is surfaced as-is and the run
//! that was being saved is gone.

use thiserror::Error;

use crate::RunId;

// ---------------------------------------------------------------------------
// Client-level errors
// ---------------------------------------------------------------------------

/// Errors returned by the client facade.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Metadata logging or `save_model` was called with no pending run.
    #[error("No active experiment run; call start_run first")]
    EmptyRunQueue,

    /// The run being saved was started without a workspace id.
    ///
    /// Raised before the model is serialized or any request is sent.
    #[error("Run {run_id} has no workspace id")]
    MissingWorkspace {
        /// The run that could not be saved.
        run_id: RunId,
    },

    /// `save_run` was called on a run with no model attached.
    #[error("Run {run_id} has no model attached")]
    MissingModel {
        /// The run that could not be saved.
        run_id: RunId,
    },

    /// The model could not be serialized.
    #[error(transparent)]
    Serialization(#[from] SerializeError),

    /// The registry server could not be reached or rejected the request.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Run metadata could not be encoded into the upload payload.
    #[error("Payload encoding failed: {message}")]
    Payload {
        /// Description of the encoding failure.
        message: String,
    },

    /// The client configuration is invalid.
    ///
    /// Produced at construction time; a client never starts with an invalid config.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Serializer errors
// ---------------------------------------------------------------------------

/// Failures while turning a trained model into an upload blob.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// The model exposes none of the supported capabilities.
    #[error("Unsupported model type '{type_name}': expected an estimator, layered network or tensor module")]
    UnsupportedModel {
        /// Rust type name of the rejected model.
        type_name: &'static str,
    },

    /// The framework's own encoder failed.
    #[error("Model encoding failed: {message}")]
    Encode {
        /// Description of the encoder failure.
        message: String,
    },

    /// A filesystem step (temp file, export, archive, read-back) failed.
    #[error("I/O error while {context}: {source}")]
    Io {
        /// Which step failed (e.g. `"archiving model directory"`).
        context: &'static str,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl SerializeError {
    /// Builds a closure that wraps an [`std::io::Error`] with `context`, for use
    /// with `map_err`.
    pub fn io(context: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| SerializeError::Io { context, source }
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Failures reported by a [`crate::Transport`] implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response (DNS, connect, TLS, ...).
    #[error("Request to '{path}' failed: {message}")]
    Request {
        /// Relative path of the failed request.
        path: String,
        /// Description of the failure.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("Server returned {status} for '{path}': {body}")]
    Status {
        /// Relative path of the failed request.
        path: String,
        /// HTTP status code.
        status: u16,
        /// Raw response body, as returned by the server.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("Could not decode response from '{path}': {message}")]
    Decode {
        /// Relative path of the request.
        path: String,
        /// Description of the decoding failure.
        message: String,
    },
}
