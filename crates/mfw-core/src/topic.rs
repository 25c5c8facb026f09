//! Topic candidates and the parser that extracts them from model output.

use serde::{Deserialize, Serialize};

/// Separator the topic template asks the model to place between topics.
pub const TOPIC_DELIMITER: &str = "|||";

/// One trimmed, non-empty topic produced by the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TopicCandidate(String);

impl TopicCandidate {
    /// Trims `text`; returns `None` when nothing is left.
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TopicCandidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TopicCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TopicCandidate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| "topic must not be empty".to_string())
    }
}

impl From<TopicCandidate> for String {
    fn from(topic: TopicCandidate) -> Self {
        topic.0
    }
}

/// Splits raw model output into topics.
///
/// Segments are trimmed and empty ones dropped; order is preserved. Any
/// number of topics is accepted, including zero, which callers must treat
/// as a format failure.
pub fn parse(raw: &str) -> Vec<TopicCandidate> {
    raw.split(TOPIC_DELIMITER)
        .filter_map(TopicCandidate::new)
        .collect()
}
