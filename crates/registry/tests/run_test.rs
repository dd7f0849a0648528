//! Run handle and pending-run queue tests.

use registry::{Framework, Metadata, RegistryError, Run, RunQueue, RuntimeVersion};
use serde_json::json;

fn metadata(value: serde_json::Value) -> Metadata {
    value.as_object().cloned().expect("metadata must be an object")
}

#[test]
fn test_new_run_starts_empty() {
    let run = Run::new("ws-1");

    assert_eq!(run.workspace_id().map(|w| w.as_str()), Some("ws-1"));
    assert!(run.pretraining_metadata().is_empty());
    assert!(run.posttraining_metadata().is_empty());
    assert!(run.framework().is_none());
    assert!(run.runtime().is_none());
    assert!(!run.has_model());
}

#[test]
fn test_empty_workspace_id_is_unset() {
    let run = Run::new("");
    assert!(run.workspace_id().is_none());
}

#[test]
fn test_runs_get_distinct_ids() {
    assert_ne!(Run::new("ws").id(), Run::new("ws").id());
}

#[test]
fn test_logging_replaces_metadata() {
    let mut run = Run::new("ws-1");
    run.log_pretraining_metadata(metadata(json!({"lr": 0.1, "epochs": 3})));
    run.log_pretraining_metadata(metadata(json!({"lr": 0.01})));
    run.log_posttraining_metadata(metadata(json!({"accuracy": 0.93})));

    assert_eq!(run.pretraining_metadata(), &metadata(json!({"lr": 0.01})));
    assert_eq!(run.posttraining_metadata(), &metadata(json!({"accuracy": 0.93})));
}

#[test]
fn test_mark_serialized_records_framework_and_runtime() {
    let mut run = Run::new("ws-1");
    run.mark_serialized(RuntimeVersion::current(), Framework::Pytorch);

    assert_eq!(run.framework(), Some(Framework::Pytorch));
    assert_eq!(run.runtime(), Some(&RuntimeVersion::current()));
}

#[test]
fn test_queue_empty_errors() {
    let mut queue = RunQueue::new();

    assert!(matches!(queue.head(), Err(RegistryError::EmptyRunQueue)));
    assert!(matches!(queue.head_mut(), Err(RegistryError::EmptyRunQueue)));
    assert!(matches!(queue.pop_head(), Err(RegistryError::EmptyRunQueue)));
}

#[test]
fn test_queue_is_first_in_first_out() {
    let mut queue = RunQueue::new();
    let first = queue.push(Run::new("ws-a")).id();
    let second = queue.push(Run::new("ws-b")).id();

    assert_eq!(queue.len(), 2);
    assert_eq!(queue.head().unwrap().id(), first);
    assert_eq!(queue.pop_head().unwrap().id(), first);
    assert_eq!(queue.pop_head().unwrap().id(), second);
    assert!(queue.is_empty());
}

#[test]
fn test_push_returns_the_new_tail() {
    let mut queue = RunQueue::new();
    queue.push(Run::new("ws-a"));
    let tail = queue.push(Run::new("ws-b"));
    tail.log_posttraining_metadata(metadata(json!({"loss": 0.2})));

    assert!(queue.head().unwrap().posttraining_metadata().is_empty());
    queue.pop_head().unwrap();
    assert_eq!(queue.head().unwrap().posttraining_metadata(), &metadata(json!({"loss": 0.2})));
}
