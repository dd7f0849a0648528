//! NTCore model serializer.
//!
//! Turns a classified model ([`registry::ModelKind`]) into the bytes uploaded
//! to the registry, tagged with the framework that produced them:
//!
//! - **Estimators** are encoded in memory. No file is touched.
//! - **Layered networks** export into a fresh temporary directory, which is
//!   archived as `model/` inside a gzip'd tar written to a temporary
//!   `.tar.gz` file; the archive bytes are read back.
//! - **Tensor modules** are scripted into a temporary `.pt` file whose bytes
//!   are read back.
//!
//! Temporary directories and files are owned by RAII guards local to each
//! strategy, so they are deleted on every exit path, including errors.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** All filesystem access for model packaging lives here.

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use registry::{
    Estimator, Framework, LayeredNetwork, ModelKind, SerializeError, SerializedModel,
    TensorModule, TrainedModel,
};
use tempfile::{Builder, NamedTempFile, TempDir};
use tracing::debug;

/// Directory name the exported network is stored under inside the archive.
pub const ARCHIVE_ROOT: &str = "model";

/// Classifies `model` and serializes it.
pub fn serialize_model(model: &dyn TrainedModel) -> Result<SerializedModel, SerializeError> {
    serialize(ModelKind::of(model))
}

/// Serializes an already-classified model.
pub fn serialize(kind: ModelKind<'_>) -> Result<SerializedModel, SerializeError> {
    let serialized = match kind {
        ModelKind::Estimator(estimator) => SerializedModel {
            bytes: encode_estimator(estimator)?,
            framework: Framework::Sklearn,
        },
        ModelKind::LayeredNetwork(network) => SerializedModel {
            bytes: archive_network(network)?,
            framework: Framework::Tensorflow,
        },
        ModelKind::TensorModule(module) => SerializedModel {
            bytes: script_module(module)?,
            framework: Framework::Pytorch,
        },
        ModelKind::Unsupported { type_name } => {
            return Err(SerializeError::UnsupportedModel { type_name });
        }
    };

    debug!(
        framework = %serialized.framework,
        bytes = serialized.bytes.len(),
        "Model serialized"
    );
    Ok(serialized)
}

fn encode_estimator(estimator: &dyn Estimator) -> Result<Vec<u8>, SerializeError> {
    estimator.dump().map_err(|e| SerializeError::Encode {
        message: e.to_string(),
    })
}

fn archive_network(network: &dyn LayeredNetwork) -> Result<Vec<u8>, SerializeError> {
    let export_dir: TempDir = tempfile::tempdir().map_err(SerializeError::io("creating export directory"))?;
    network
        .export(export_dir.path())
        .map_err(SerializeError::io("exporting layered network"))?;

    let archive = temp_file(".tar.gz")?;
    write_archive(export_dir.path(), archive.as_file())
        .map_err(SerializeError::io("archiving model directory"))?;

    read_back(&archive)
}

fn write_archive(dir: &Path, out: &fs::File) -> std::io::Result<()> {
    let encoder = GzEncoder::new(out, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.append_dir_all(ARCHIVE_ROOT, dir)?;
    let mut encoder = builder.into_inner()?;
    encoder.flush()?;
    encoder.finish()?;
    Ok(())
}

fn script_module(module: &dyn TensorModule) -> Result<Vec<u8>, SerializeError> {
    let script = temp_file(".pt")?;
    module
        .script(script.path())
        .map_err(SerializeError::io("scripting tensor module"))?;

    read_back(&script)
}

fn temp_file(suffix: &str) -> Result<NamedTempFile, SerializeError> {
    Builder::new()
        .prefix("ntcore-")
        .suffix(suffix)
        .tempfile()
        .map_err(SerializeError::io("creating temporary file"))
}

// Read by path: the strategy may have replaced the file rather than written
// through our handle.
fn read_back(file: &NamedTempFile) -> Result<Vec<u8>, SerializeError> {
    fs::read(file.path()).map_err(SerializeError::io("reading serialized model"))
}
