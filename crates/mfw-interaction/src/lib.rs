//! Remote model clients for the MF Workbench.

pub mod gemini_api_agent;

pub use gemini_api_agent::GeminiApiAgent;
