//! Model serializer tests.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use flate2::read::GzDecoder;
use registry::{
    load_estimator, Estimator, Framework, LayeredNetwork, SerializeError, TensorModule,
    TrainedModel,
};
use serde::{Deserialize, Serialize};
use serializer::{serialize_model, ARCHIVE_ROOT};

// =============================================================================
// Test models
// =============================================================================

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct DecisionStump {
    feature: usize,
    threshold: f64,
    labels: [String; 2],
}

impl TrainedModel for DecisionStump {
    fn as_estimator(&self) -> Option<&dyn Estimator> {
        Some(self)
    }
}

/// Writes a saved-model style layout and remembers where it was asked to export.
#[derive(Default)]
struct SequentialNet {
    exported_to: Mutex<Option<PathBuf>>,
    fail: bool,
}

impl LayeredNetwork for SequentialNet {
    fn export(&self, dir: &Path) -> std::io::Result<()> {
        *self.exported_to.lock().unwrap() = Some(dir.to_path_buf());
        fs::write(dir.join("saved_model.pb"), b"graph")?;
        fs::create_dir(dir.join("variables"))?;
        fs::write(dir.join("variables").join("variables.index"), b"weights")?;
        if self.fail {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "export interrupted"));
        }
        Ok(())
    }
}

impl TrainedModel for SequentialNet {
    fn as_layered_network(&self) -> Option<&dyn LayeredNetwork> {
        Some(self)
    }
}

#[derive(Default)]
struct ScriptedModule {
    scripted_to: Mutex<Option<PathBuf>>,
}

impl TensorModule for ScriptedModule {
    fn script(&self, path: &Path) -> std::io::Result<()> {
        *self.scripted_to.lock().unwrap() = Some(path.to_path_buf());
        fs::write(path, b"PK\x03\x04torchscript")
    }
}

impl TrainedModel for ScriptedModule {
    fn as_tensor_module(&self) -> Option<&dyn TensorModule> {
        Some(self)
    }
}

struct Unknown;

impl TrainedModel for Unknown {}

// =============================================================================
// Estimator
// =============================================================================

#[test]
fn test_estimator_is_tagged_sklearn_and_round_trips() {
    let model = DecisionStump {
        feature: 2,
        threshold: 0.75,
        labels: ["no".into(), "yes".into()],
    };

    let serialized = serialize_model(&model).unwrap();

    assert_eq!(serialized.framework, Framework::Sklearn);
    let restored: DecisionStump = load_estimator(&serialized.bytes).unwrap();
    assert_eq!(restored, model);
}

// =============================================================================
// Layered network
// =============================================================================

#[test]
fn test_network_is_archived_under_model_root() {
    let net = SequentialNet::default();

    let serialized = serialize_model(&net).unwrap();
    assert_eq!(serialized.framework, Framework::Tensorflow);

    let mut archive = tar::Archive::new(GzDecoder::new(serialized.bytes.as_slice()));
    let mut entries = Vec::new();
    let mut graph = Vec::new();
    for entry in archive.entries().unwrap() {
        let mut entry = entry.unwrap();
        let path = entry.path().unwrap().to_string_lossy().trim_end_matches('/').to_string();
        if path == format!("{ARCHIVE_ROOT}/saved_model.pb") {
            entry.read_to_end(&mut graph).unwrap();
        }
        entries.push(path);
    }

    assert!(entries.iter().all(|p| p.starts_with(ARCHIVE_ROOT)));
    assert!(entries.contains(&format!("{ARCHIVE_ROOT}/variables/variables.index")));
    assert_eq!(graph, b"graph");
}

#[test]
fn test_network_export_directory_is_removed() {
    let net = SequentialNet::default();

    serialize_model(&net).unwrap();

    let dir = net.exported_to.lock().unwrap().clone().unwrap();
    assert!(!dir.exists(), "export directory {} leaked", dir.display());
}

#[test]
fn test_failed_export_is_reported_and_cleaned_up() {
    let net = SequentialNet { fail: true, ..SequentialNet::default() };

    let err = serialize_model(&net).unwrap_err();

    assert!(matches!(err, SerializeError::Io { context: "exporting layered network", .. }));
    let dir = net.exported_to.lock().unwrap().clone().unwrap();
    assert!(!dir.exists());
}

// =============================================================================
// Tensor module
// =============================================================================

#[test]
fn test_module_script_bytes_are_returned() {
    let module = ScriptedModule::default();

    let serialized = serialize_model(&module).unwrap();

    assert_eq!(serialized.framework, Framework::Pytorch);
    assert_eq!(serialized.bytes, b"PK\x03\x04torchscript");
}

#[test]
fn test_module_temp_file_is_removed() {
    let module = ScriptedModule::default();

    serialize_model(&module).unwrap();

    let path = module.scripted_to.lock().unwrap().clone().unwrap();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pt"));
    assert!(!path.exists(), "script file {} leaked", path.display());
}

// =============================================================================
// Unsupported
// =============================================================================

#[test]
fn test_unsupported_model_is_an_error() {
    let err = serialize_model(&Unknown).unwrap_err();

    match err {
        SerializeError::UnsupportedModel { type_name } => assert!(type_name.ends_with("Unknown")),
        other => panic!("expected UnsupportedModel, got {other:?}"),
    }
}
