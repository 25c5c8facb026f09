//! Process-level bootstrap.
//!
//! Loads configuration and the access gate once, and hands out pipelines to
//! sessions that present a valid access code. The API key is read only at
//! unlock time.

use std::sync::Arc;

use mfw_core::access::AccessGate;
use mfw_core::config::RootConfig;
use mfw_core::error::Result;
use mfw_core::secret::SecretService;
use mfw_infrastructure::{ConfigService, MfwPaths, SecretServiceImpl};
use mfw_interaction::GeminiApiAgent;

use crate::script_pipeline::ScriptPipeline;
use crate::workbench_session::{WorkbenchError, WorkbenchSession};

pub struct Workbench {
    paths: MfwPaths,
    config: RootConfig,
    secrets: Arc<dyn SecretService>,
    gate: AccessGate,
}

impl Workbench {
    /// Loads `config.toml` and `secret.json` from `paths`.
    pub async fn load(paths: MfwPaths) -> Result<Self> {
        let config = ConfigService::new(&paths)?.get_config()?;
        let secrets: Arc<dyn SecretService> = Arc::new(SecretServiceImpl::new(&paths)?);
        Self::with_services(paths, config, secrets).await
    }

    pub async fn with_services(
        paths: MfwPaths,
        config: RootConfig,
        secrets: Arc<dyn SecretService>,
    ) -> Result<Self> {
        let loaded = secrets.load_secrets().await?;
        let gate = AccessGate::from_config(loaded.access_codes.as_ref());
        if config.workbench.require_access_code && !gate.is_configured() {
            tracing::warn!("Access codes are required but none are configured");
        }
        Ok(Self {
            paths,
            config,
            secrets,
            gate,
        })
    }

    pub fn paths(&self) -> &MfwPaths {
        &self.paths
    }

    pub fn config(&self) -> &RootConfig {
        &self.config
    }

    pub fn requires_access_code(&self) -> bool {
        self.config.workbench.require_access_code
    }

    /// Checks `code` against the gate when the workbench requires one.
    pub fn verify_access(&self, code: &str) -> Result<()> {
        if self.requires_access_code() {
            self.gate.verify(code)
        } else {
            Ok(())
        }
    }

    /// Builds a Gemini-backed pipeline from the configured settings.
    pub async fn pipeline(&self) -> Result<ScriptPipeline<GeminiApiAgent>> {
        let api_key = self.secrets.gemini_api_key().await?;
        let agent = GeminiApiAgent::from_settings(api_key, &self.config.gemini);
        Ok(ScriptPipeline::new(agent))
    }

    /// Verifies `code` and, on success, unlocks `session` with a fresh
    /// pipeline.
    pub async fn unlock(
        &self,
        session: &mut WorkbenchSession<GeminiApiAgent>,
        code: &str,
    ) -> std::result::Result<(), WorkbenchError> {
        if let Err(err) = self.verify_access(code) {
            tracing::warn!(session = %session.id(), "Access denied: {}", err);
            return Err(err.into());
        }
        let pipeline = self.pipeline().await?;
        session.unlock(pipeline);
        Ok(())
    }
}
