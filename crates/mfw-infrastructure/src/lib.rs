//! File-backed configuration and secrets for the MF Workbench.

pub mod config_service;
pub mod paths;
pub mod secret_service;

pub use crate::config_service::ConfigService;
pub use crate::paths::MfwPaths;
pub use crate::secret_service::SecretServiceImpl;
