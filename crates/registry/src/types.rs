//! Shared value types for the NTCore client domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Framework tag
// ---------------------------------------------------------------------------

/// The ML ecosystem that produced an uploaded model.
///
/// Chosen at save time from the model's capabilities; the server uses the tag
/// to pick the matching loader when it deploys the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// Estimator-style models, encoded as a single object blob.
    Sklearn,
    /// Layered networks, exported to a directory and shipped as `.tar.gz`.
    Tensorflow,
    /// Tensor modules, compiled to a single scripted file.
    Pytorch,
}

impl Framework {
    /// Returns the wire tag (`"sklearn"`, `"tensorflow"` or `"pytorch"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Framework::Sklearn => "sklearn",
            Framework::Tensorflow => "tensorflow",
            Framework::Pytorch => "pytorch",
        }
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Arbitrary key-value training metadata (hyper-parameters, metrics, ...).
pub type Metadata = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
