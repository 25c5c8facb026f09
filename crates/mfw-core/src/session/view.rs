use serde::{Deserialize, Serialize};

use super::state::{SelectedTopic, SessionPhase};

/// Read-only snapshot of a session for presentation adapters.
///
/// Carries plain text only; any markup (line breaks, styling) is the
/// adapter's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub topics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_topic: Option<SelectedTopic>,
}

impl SessionView {
    /// Topics paired with their 1-based display numbers.
    pub fn numbered_topics(&self) -> impl Iterator<Item = (usize, &str)> {
        self.topics
            .iter()
            .enumerate()
            .map(|(i, topic)| (i + 1, topic.as_str()))
    }
}
