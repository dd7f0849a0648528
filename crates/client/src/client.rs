//! The client facade.

use registry::{
    path, ClientConfig, CreateWorkspaceRequest, ExperimentPayload, Metadata, ModelVersion,
    RegisterExperimentRequest, RegistryError, Run, RunQueue, RuntimeVersion, TrainedModel,
    Transport, WorkspaceId,
};
use serde_json::Value;
use tracing::{debug, info, instrument};
use transport::HttpTransport;

/// Entry point of the SDK.
///
/// Workspace and registry operations are one request each and return the
/// server's decoded response body.
///
/// Runs are tracked in a first-in-first-out queue owned by the client:
/// [`start_run`](Self::start_run) appends, while the metadata logging calls
/// and [`save_model`](Self::save_model) always address the oldest run that
/// has not been saved. Callers that want to hold a run themselves build one
/// with [`Run::new`] and hand it to [`save_run`](Self::save_run).
pub struct Client<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
    runs: RunQueue,
}

impl Client<HttpTransport> {
    /// Creates a client that talks HTTP to `config.server`.
    pub fn new(config: ClientConfig) -> Result<Self, RegistryError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client over an arbitrary transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            runs: RunQueue::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -----------------------------------------------------------------------
    // Workspaces
    // -----------------------------------------------------------------------

    /// Creates an API workspace named `name`.
    #[instrument(skip(self))]
    pub async fn create_workspace(&self, name: &str) -> Result<Value, RegistryError> {
        let body = to_body(&CreateWorkspaceRequest::api(name))?;
        Ok(self.transport.post(&path!("workspace"), &body).await?)
    }

    #[instrument(skip_all, fields(workspace_id = %workspace_id))]
    pub async fn get_workspace(&self, workspace_id: &WorkspaceId) -> Result<Value, RegistryError> {
        Ok(self.transport.get(&path!("workspace", workspace_id)).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_workspaces(&self) -> Result<Value, RegistryError> {
        Ok(self.transport.get(&path!("workspaces")).await?)
    }

    #[instrument(skip_all, fields(workspace_id = %workspace_id))]
    pub async fn delete_workspace(&self, workspace_id: &WorkspaceId) -> Result<Value, RegistryError> {
        Ok(self.transport.delete(&path!("workspace", workspace_id)).await?)
    }

    // -----------------------------------------------------------------------
    // Registry and deployment
    // -----------------------------------------------------------------------

    /// Points the workspace's registry at model `version`.
    #[instrument(skip_all, fields(workspace_id = %workspace_id, version = %version))]
    pub async fn register_experiment(
        &self,
        workspace_id: &WorkspaceId,
        version: ModelVersion,
    ) -> Result<Value, RegistryError> {
        let body = to_body(&RegisterExperimentRequest { version })?;
        Ok(self
            .transport
            .post(&path!("workspace", workspace_id, "registry"), &body)
            .await?)
    }

    #[instrument(skip_all, fields(workspace_id = %workspace_id))]
    pub async fn get_registered_experiment(&self, workspace_id: &WorkspaceId) -> Result<Value, RegistryError> {
        Ok(self
            .transport
            .get(&path!("workspaces", workspace_id, "registry"))
            .await?)
    }

    #[instrument(skip_all, fields(workspace_id = %workspace_id))]
    pub async fn unregister_experiment(&self, workspace_id: &WorkspaceId) -> Result<Value, RegistryError> {
        Ok(self
            .transport
            .delete(&path!("workspace", workspace_id, "registry"))
            .await?)
    }

    /// Deploys model `version` of the workspace as an API.
    #[instrument(skip_all, fields(workspace_id = %workspace_id, version = %version))]
    pub async fn deploy_model(
        &self,
        workspace_id: &WorkspaceId,
        version: ModelVersion,
    ) -> Result<Value, RegistryError> {
        let body = Value::Object(Metadata::new());
        Ok(self
            .transport
            .post(&path!("workspace", workspace_id, "model", version, "deploy"), &body)
            .await?)
    }

    #[instrument(skip_all, fields(workspace_id = %workspace_id, version = %version))]
    pub async fn download_model(
        &self,
        workspace_id: &WorkspaceId,
        version: ModelVersion,
    ) -> Result<Value, RegistryError> {
        Ok(self
            .transport
            .get(&path!("workspace", workspace_id, "model", version))
            .await?)
    }

    // -----------------------------------------------------------------------
    // Runs
    // -----------------------------------------------------------------------

    /// Starts a run in `workspace_id` and queues it behind any unsaved runs.
    ///
    /// The returned handle may be mutated directly. Note that
    /// [`log_pretraining_metadata`](Self::log_pretraining_metadata) and
    /// friends target the oldest unsaved run, which is only this one when the
    /// queue was empty.
    pub fn start_run(&mut self, workspace_id: impl Into<String>) -> &mut Run {
        let run = self.runs.push(Run::new(workspace_id));
        info!(
            run_id = %run.id(),
            workspace_id = run.workspace_id().map(WorkspaceId::as_str).unwrap_or_default(),
            "Run started"
        );
        run
    }

    /// Number of runs started but not yet saved.
    pub fn pending_runs(&self) -> usize {
        self.runs.len()
    }

    /// Replaces the pre-training metadata of the oldest unsaved run.
    pub fn log_pretraining_metadata(&mut self, metadata: Metadata) -> Result<(), RegistryError> {
        let run = self.runs.head_mut()?;
        debug!(run_id = %run.id(), keys = metadata.len(), "Logging pre-training metadata");
        run.log_pretraining_metadata(metadata);
        Ok(())
    }

    /// Replaces the post-training metadata of the oldest unsaved run.
    pub fn log_posttraining_metadata(&mut self, metadata: Metadata) -> Result<(), RegistryError> {
        let run = self.runs.head_mut()?;
        debug!(run_id = %run.id(), keys = metadata.len(), "Logging post-training metadata");
        run.log_posttraining_metadata(metadata);
        Ok(())
    }

    /// Saves the oldest unsaved run with `model` and uploads it.
    ///
    /// The run leaves the queue before anything else happens. If any later
    /// step fails, including the upload itself, the run is gone and has to be
    /// started again.
    pub async fn save_model(&mut self, model: &dyn TrainedModel) -> Result<Value, RegistryError> {
        let run = self.runs.pop_head()?;
        self.upload(run, model).await
    }

    /// Saves a run owned by the caller, using the model attached to it.
    pub async fn save_run(&self, mut run: Run) -> Result<Value, RegistryError> {
        let model = run
            .take_model()
            .ok_or(RegistryError::MissingModel { run_id: run.id() })?;
        self.upload(run, &*model).await
    }

    #[instrument(skip_all, fields(run_id = %run.id()))]
    async fn upload(&self, mut run: Run, model: &dyn TrainedModel) -> Result<Value, RegistryError> {
        let workspace_id = run
            .workspace_id()
            .cloned()
            .ok_or(RegistryError::MissingWorkspace { run_id: run.id() })?;

        let serialized = serializer::serialize_model(model)?;
        let runtime = RuntimeVersion::current();
        run.mark_serialized(runtime.clone(), serialized.framework);

        let payload = ExperimentPayload::new(
            runtime,
            run.pretraining_metadata(),
            run.posttraining_metadata(),
            &serialized,
        )?;
        let body = to_body(&payload)?;

        let response = self
            .transport
            .post(&path!("workspace", workspace_id, "experiment"), &body)
            .await?;
        info!(
            workspace_id = %workspace_id,
            framework = %serialized.framework,
            bytes = serialized.bytes.len(),
            "Run saved"
        );
        Ok(response)
    }
}

fn to_body<S: serde::Serialize>(value: &S) -> Result<Value, RegistryError> {
    serde_json::to_value(value).map_err(|e| RegistryError::Payload {
        message: e.to_string(),
    })
}
