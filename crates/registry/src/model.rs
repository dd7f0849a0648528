//! Capability traits for trained models.
//!
//! A model handed to the client is classified by what it can do, not by a
//! concrete type. The three capabilities map one-to-one onto a
//! [`Framework`](crate::Framework) tag:
//!
//! | Capability | Encoding | Tag |
//! |------------|----------|-----|
//! | [`Estimator`] | single JSON object blob | `sklearn` |
//! | [`LayeredNetwork`] | exported directory, archived as `.tar.gz` | `tensorflow` |
//! | [`TensorModule`] | one scripted file | `pytorch` |
//!
//! [`ModelKind::of`] checks the capabilities in that order and the first match
//! wins. A model exposing none of them is [`ModelKind::Unsupported`], which the
//! serializer reports as an error.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Framework;

/// A model that can be encoded into one self-contained byte blob.
///
/// Implemented for every `serde::Serialize` type. The blob is the model's JSON
/// encoding and [`load_estimator`] turns it back into the original type.
pub trait Estimator {
    /// Encodes the model.
    fn dump(&self) -> serde_json::Result<Vec<u8>>;
}

impl<T: Serialize> Estimator for T {
    fn dump(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Decodes a blob produced by [`Estimator::dump`].
pub fn load_estimator<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    serde_json::from_slice(bytes)
}

/// A network that exports its full representation (graph, weights, assets) as
/// a directory tree.
pub trait LayeredNetwork {
    /// Writes the model into `dir`, which exists and is empty.
    fn export(&self, dir: &Path) -> std::io::Result<()>;
}

/// A module that compiles to a single portable scripted file.
pub trait TensorModule {
    /// Compiles the module and saves the result to `path`.
    ///
    /// `path` already exists (as an empty file) and should be overwritten.
    fn script(&self, path: &Path) -> std::io::Result<()>;
}

/// Any object the client may be asked to save.
///
/// Implementors override the accessor for each capability they have. All
/// accessors default to `None`.
pub trait TrainedModel {
    /// Returns `self` as an estimator, if it is one.
    fn as_estimator(&self) -> Option<&dyn Estimator> {
        None
    }

    /// Returns `self` as a layered network, if it is one.
    fn as_layered_network(&self) -> Option<&dyn LayeredNetwork> {
        None
    }

    /// Returns `self` as a tensor module, if it is one.
    fn as_tensor_module(&self) -> Option<&dyn TensorModule> {
        None
    }

    /// Name used in error messages when the model is unsupported.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A model classified by capability.
#[derive(Clone, Copy)]
pub enum ModelKind<'a> {
    /// Encoded directly; tagged `sklearn`.
    Estimator(&'a dyn Estimator),
    /// Exported and archived; tagged `tensorflow`.
    LayeredNetwork(&'a dyn LayeredNetwork),
    /// Scripted to one file; tagged `pytorch`.
    TensorModule(&'a dyn TensorModule),
    /// None of the above. Saving it fails.
    Unsupported {
        /// Rust type name of the model.
        type_name: &'static str,
    },
}

impl<'a> ModelKind<'a> {
    /// Classifies `model`: estimator, then layered network, then tensor module.
    pub fn of(model: &'a dyn TrainedModel) -> Self {
        if let Some(estimator) = model.as_estimator() {
            ModelKind::Estimator(estimator)
        } else if let Some(network) = model.as_layered_network() {
            ModelKind::LayeredNetwork(network)
        } else if let Some(module) = model.as_tensor_module() {
            ModelKind::TensorModule(module)
        } else {
            ModelKind::Unsupported {
                type_name: model.type_name(),
            }
        }
    }

    /// Short label for log events.
    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::Estimator(_) => "estimator",
            ModelKind::LayeredNetwork(_) => "layered_network",
            ModelKind::TensorModule(_) => "tensor_module",
            ModelKind::Unsupported { .. } => "unsupported",
        }
    }
}

impl std::fmt::Debug for ModelKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelKind::Unsupported { type_name } => {
                f.debug_struct("Unsupported").field("type_name", type_name).finish()
            }
            other => f.write_str(other.label()),
        }
    }
}

/// The bytes uploaded for a model, with the framework tag that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedModel {
    pub bytes: Vec<u8>,
    pub framework: Framework,
}
