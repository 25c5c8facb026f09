//! Unified path management for workbench configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/mfw/               # Config directory (platform default)
//! ├── config.toml              # Application configuration
//! ├── secret.json              # API key and access codes
//! └── logs/                    # Application logs
//!     └── mfw-repl.log.YYYY-MM-DD
//! ```
//!
//! `MFW_CONFIG_DIR` replaces the platform directory when set.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "MFW_CONFIG_DIR";

const APP_DIR_NAME: &str = "mfw";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home/config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for mfw_core::MfwError {
    fn from(err: PathError) -> Self {
        mfw_core::MfwError::config(err.to_string())
    }
}

/// Resolves the files the workbench reads.
#[derive(Debug, Clone)]
pub struct MfwPaths {
    base: Option<PathBuf>,
}

impl MfwPaths {
    /// `base` pins the config directory; `None` uses the environment
    /// override or the platform default.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

impl Default for MfwPaths {
    fn default() -> Self {
        Self::new(None)
    }
}
