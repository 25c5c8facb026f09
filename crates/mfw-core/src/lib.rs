//! Domain layer for the MF Workbench.
//!
//! Holds everything that does not touch the network or the file system:
//! prompt templates, the topic parser, the per-session state machine,
//! error types, configuration models and the generation client seam.

pub mod access;
pub mod config;
pub mod error;
pub mod generation;
pub mod secret;
pub mod session;
pub mod template;
pub mod topic;

pub use error::{MfwError, PipelineError, PipelineErrorKind};
pub use generation::{GenerationClient, GenerationError};
pub use session::{SessionPhase, SessionState, SessionView};
pub use template::{TaskTemplate, render};
pub use topic::{TopicCandidate, parse as parse_topics};
