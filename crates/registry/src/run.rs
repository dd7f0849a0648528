//! Experiment runs and the pending-run queue.
//!
//! A [`Run`] is one training attempt tracked on the client until it is saved.
//! Runs are plain owned values: saving one moves it, so a saved run cannot be
//! logged to or saved again.
//!
//! [`RunQueue`] keeps the runs started through the client facade in start
//! order. Facade-level metadata logging and `save_model` always address the
//! oldest pending run.

use std::collections::VecDeque;

use crate::{
    Framework, Metadata, RegistryError, RunId, RuntimeVersion, Timestamp, TrainedModel,
    WorkspaceId,
};

/// One in-flight experiment run.
pub struct Run {
    id: RunId,
    workspace_id: Option<WorkspaceId>,
    runtime: Option<RuntimeVersion>,
    framework: Option<Framework>,
    pretraining_metadata: Metadata,
    posttraining_metadata: Metadata,
    started_at: Timestamp,
    model: Option<Box<dyn TrainedModel + Send + Sync>>,
}

impl Run {
    /// Starts a run bound to `workspace_id`.
    ///
    /// An empty id leaves the run without a workspace; saving it then fails
    /// with [`RegistryError::MissingWorkspace`].
    pub fn new(workspace_id: impl Into<String>) -> Self {
        Self {
            id: RunId::new_random(),
            workspace_id: WorkspaceId::new(workspace_id),
            runtime: None,
            framework: None,
            pretraining_metadata: Metadata::new(),
            posttraining_metadata: Metadata::new(),
            started_at: Timestamp::now(),
            model: None,
        }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    /// The workspace this run uploads into. Fixed at creation.
    pub fn workspace_id(&self) -> Option<&WorkspaceId> {
        self.workspace_id.as_ref()
    }

    /// Runtime recorded when the run was serialized, if it has been.
    pub fn runtime(&self) -> Option<&RuntimeVersion> {
        self.runtime.as_ref()
    }

    /// Framework tag chosen when the model was serialized, if it has been.
    pub fn framework(&self) -> Option<Framework> {
        self.framework
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn pretraining_metadata(&self) -> &Metadata {
        &self.pretraining_metadata
    }

    pub fn posttraining_metadata(&self) -> &Metadata {
        &self.posttraining_metadata
    }

    /// Replaces the metadata recorded before training.
    pub fn log_pretraining_metadata(&mut self, metadata: Metadata) {
        self.pretraining_metadata = metadata;
    }

    /// Replaces the metadata recorded after training.
    pub fn log_posttraining_metadata(&mut self, metadata: Metadata) {
        self.posttraining_metadata = metadata;
    }

    /// Attaches the model to upload when the run is saved with `save_run`.
    pub fn set_model(&mut self, model: Box<dyn TrainedModel + Send + Sync>) {
        self.model = Some(model);
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Detaches the model, leaving the run without one.
    pub fn take_model(&mut self) -> Option<Box<dyn TrainedModel + Send + Sync>> {
        self.model.take()
    }

    /// Records what the serializer produced for this run.
    pub fn mark_serialized(&mut self, runtime: RuntimeVersion, framework: Framework) {
        self.runtime = Some(runtime);
        self.framework = Some(framework);
    }
}

impl std::fmt::Debug for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Run")
            .field("id", &self.id)
            .field("workspace_id", &self.workspace_id)
            .field("runtime", &self.runtime)
            .field("framework", &self.framework)
            .field("pretraining_metadata", &self.pretraining_metadata)
            .field("posttraining_metadata", &self.posttraining_metadata)
            .field("started_at", &self.started_at)
            .field("has_model", &self.model.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Pending-run queue
// ---------------------------------------------------------------------------

/// Runs started but not yet saved, oldest first.
#[derive(Debug, Default)]
pub struct RunQueue {
    runs: VecDeque<Run>,
}

impl RunQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `run` at the tail and returns it for direct mutation.
    pub fn push(&mut self, run: Run) -> &mut Run {
        self.runs.push_back(run);
        let last = self.runs.len() - 1;
        &mut self.runs[last]
    }

    /// The oldest pending run.
    pub fn head(&self) -> Result<&Run, RegistryError> {
        self.runs.front().ok_or(RegistryError::EmptyRunQueue)
    }

    /// The oldest pending run, mutably.
    pub fn head_mut(&mut self) -> Result<&mut Run, RegistryError> {
        self.runs.front_mut().ok_or(RegistryError::EmptyRunQueue)
    }

    /// Removes and returns the oldest pending run.
    pub fn pop_head(&mut self) -> Result<Run, RegistryError> {
        self.runs.pop_front().ok_or(RegistryError::EmptyRunQueue)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
