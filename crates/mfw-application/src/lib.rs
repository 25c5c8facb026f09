//! Application layer for the MF Workbench.
//!
//! Coordinates the domain (`mfw-core`), the Gemini client
//! (`mfw-interaction`) and file-backed configuration (`mfw-infrastructure`).

pub mod script_pipeline;
pub mod workbench;
pub mod workbench_session;

pub use script_pipeline::ScriptPipeline;
pub use workbench::Workbench;
pub use workbench_session::{WorkbenchError, WorkbenchSession};
