//! One user's session: access state plus the pipeline state machine.

use mfw_core::generation::GenerationClient;
use mfw_core::{MfwError, PipelineError, SessionPhase, SessionState, SessionView};
use thiserror::Error;
use uuid::Uuid;

use crate::script_pipeline::ScriptPipeline;

#[derive(Error, Debug)]
pub enum WorkbenchError {
    /// A pipeline call was attempted before unlocking.
    #[error("workbench is locked; log in with an access code first")]
    Locked,

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Access gate, configuration or secret loading failed.
    #[error(transparent)]
    Setup(#[from] MfwError),
}

/// Session owned by a single user.
///
/// Holds a pipeline only while unlocked. Locking ends the session: the
/// pipeline (and with it the credential) is dropped and the state machine
/// returns to `Empty`.
pub struct WorkbenchSession<C> {
    id: Uuid,
    pipeline: Option<ScriptPipeline<C>>,
    state: SessionState,
}

impl<C: GenerationClient> WorkbenchSession<C> {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            pipeline: None,
            state: SessionState::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_unlocked(&self) -> bool {
        self.pipeline.is_some()
    }

    pub fn unlock(&mut self, pipeline: ScriptPipeline<C>) {
        tracing::info!(session = %self.id, client = %pipeline.client().describe(), "Session unlocked");
        self.pipeline = Some(pipeline);
    }

    pub fn lock(&mut self) {
        tracing::info!(session = %self.id, "Session locked");
        self.pipeline = None;
        self.state = SessionState::new();
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> SessionView {
        self.state.view()
    }

    pub fn back(&mut self) -> SessionPhase {
        let phase = self.state.back();
        tracing::debug!(session = %self.id, %phase, "Stepped back");
        phase
    }

    pub async fn submit_raw_material(&mut self, material: &str) -> Result<SessionView, WorkbenchError> {
        let pipeline = self.pipeline.as_ref().ok_or(WorkbenchError::Locked)?;
        Ok(pipeline.generate_topics(&mut self.state, material).await?)
    }

    /// `index` is zero-based.
    pub async fn select_topic(&mut self, index: usize) -> Result<SessionView, WorkbenchError> {
        let pipeline = self.pipeline.as_ref().ok_or(WorkbenchError::Locked)?;
        Ok(pipeline.select_topic(&mut self.state, index).await?)
    }
}

impl<C: GenerationClient> Default for WorkbenchSession<C> {
    fn default() -> Self {
        Self::new()
    }
}
