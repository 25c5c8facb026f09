//! Per-session state machine.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::view::SessionView;
use crate::error::PipelineError;
use crate::topic::TopicCandidate;

/// Where a session currently stands, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No topics and no script.
    Empty,
    /// Topics populated, no script yet.
    TopicsReady,
    /// Topics populated and a script generated from one of them.
    ScriptReady,
}

/// The topic a live script was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTopic {
    /// Zero-based position in the topic list.
    pub index: usize,
    pub label: String,
}

/// State owned by exactly one user session.
///
/// Mutations only happen through [`SessionState::replace_topics`],
/// [`SessionState::replace_script`] and [`SessionState::back`]; each either
/// applies completely or leaves the state untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    topics: Vec<TopicCandidate>,
    script: Option<String>,
    selected: Option<SelectedTopic>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.topics.is_empty(), self.script.is_some()) {
            (true, _) => SessionPhase::Empty,
            (false, false) => SessionPhase::TopicsReady,
            (false, true) => SessionPhase::ScriptReady,
        }
    }

    pub fn topics(&self) -> &[TopicCandidate] {
        &self.topics
    }

    pub fn topic(&self, index: usize) -> Option<&TopicCandidate> {
        self.topics.get(index)
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn selected_topic(&self) -> Option<&SelectedTopic> {
        self.selected.as_ref()
    }

    /// Installs a fresh topic list.
    ///
    /// Any live script and selection are dropped with the old list. An empty
    /// list is a format failure and changes nothing.
    pub fn replace_topics(&mut self, topics: Vec<TopicCandidate>) -> Result<(), PipelineError> {
        if topics.is_empty() {
            return Err(PipelineError::format(
                "model output contained no topics",
            ));
        }
        self.topics = topics;
        self.script = None;
        self.selected = None;
        Ok(())
    }

    /// Checks that `index` addresses a topic and returns it.
    pub fn require_topic(&self, index: usize) -> Result<&TopicCandidate, PipelineError> {
        self.topics.get(index).ok_or_else(|| {
            if self.topics.is_empty() {
                PipelineError::validation("no topics available; generate topics first")
            } else {
                PipelineError::validation(format!(
                    "topic {} does not exist (choose 1-{})",
                    index + 1,
                    self.topics.len()
                ))
            }
        })
    }

    /// Replaces the live script with one generated from topic `index`.
    pub fn replace_script(
        &mut self,
        index: usize,
        script: impl Into<String>,
    ) -> Result<(), PipelineError> {
        let label = self.require_topic(index)?.as_str().to_string();
        let script = script.into();
        if script.trim().is_empty() {
            return Err(PipelineError::format("model returned an empty script"));
        }
        self.script = Some(script);
        self.selected = Some(SelectedTopic { index, label });
        Ok(())
    }

    /// Steps back one phase and returns the phase reached.
    ///
    /// Leaving a script keeps the topics; leaving the topics clears them.
    pub fn back(&mut self) -> SessionPhase {
        match self.phase() {
            SessionPhase::ScriptReady => {
                self.script = None;
                self.selected = None;
            }
            SessionPhase::TopicsReady => {
                self.topics.clear();
                self.selected = None;
            }
            SessionPhase::Empty => {}
        }
        self.phase()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase(),
            topics: self.topics.iter().map(|t| t.as_str().to_string()).collect(),
            script: self.script.clone(),
            selected_topic: self.selected.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineErrorKind;
    use crate::topic::parse;

    fn topics(raw: &str) -> Vec<TopicCandidate> {
        parse(raw)
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = SessionState::new();
        assert_eq!(state.phase(), SessionPhase::Empty);
        assert!(state.topics().is_empty());
        assert!(state.script().is_none());
        assert!(state.selected_topic().is_none());
    }

    #[test]
    fn test_replace_topics_from_empty() {
        let mut state = SessionState::new();
        state.replace_topics(topics("t1|||t2|||t3")).unwrap();
        assert_eq!(state.phase(), SessionPhase::TopicsReady);
        assert_eq!(state.view().topics, vec!["t1", "t2", "t3"]);
        assert!(state.script().is_none());
    }

    #[test]
    fn test_replace_topics_clears_script() {
        let mut state = SessionState::new();
        state.replace_topics(topics("t1|||t2")).unwrap();
        state.replace_script(1, "script for t2").unwrap();
        assert_eq!(state.phase(), SessionPhase::ScriptReady);

        state.replace_topics(topics("n1")).unwrap();
        assert_eq!(state.phase(), SessionPhase::TopicsReady);
        assert!(state.script().is_none());
        assert!(state.selected_topic().is_none());
        assert_eq!(state.view().topics, vec!["n1"]);
    }

    #[test]
    fn test_empty_topics_leave_state_untouched() {
        let mut state = SessionState::new();
        state.replace_topics(topics("t1|||t2")).unwrap();
        state.replace_script(0, "s").unwrap();
        let before = state.clone();

        let err = state.replace_topics(Vec::new()).unwrap_err();
        assert_eq!(err.kind(), PipelineErrorKind::Format);
        assert_eq!(state, before);
    }

    #[test]
    fn test_replace_script_overwrites() {
        let mut state = SessionState::new();
        state.replace_topics(topics("t1|||t2")).unwrap();

        state.replace_script(0, "first").unwrap();
        assert_eq!(state.script(), Some("first"));
        assert_eq!(state.selected_topic().unwrap().label, "t1");

        state.replace_script(1, "second").unwrap();
        assert_eq!(state.script(), Some("second"));
        assert_eq!(
            state.selected_topic(),
            Some(&SelectedTopic {
                index: 1,
                label: "t2".to_string()
            })
        );
        assert_eq!(state.view().topics, vec!["t1", "t2"]);
    }

    #[test]
    fn test_replace_script_out_of_range() {
        let mut state = SessionState::new();
        let err = state.replace_script(0, "s").unwrap_err();
        assert_eq!(err.kind(), PipelineErrorKind::Validation);

        state.replace_topics(topics("only")).unwrap();
        let err = state.replace_script(3, "s").unwrap_err();
        assert_eq!(err.kind(), PipelineErrorKind::Validation);
        assert!(err.to_string().contains("choose 1-1"));
        assert_eq!(state.phase(), SessionPhase::TopicsReady);
    }

    #[test]
    fn test_blank_script_is_format_error() {
        let mut state = SessionState::new();
        state.replace_topics(topics("t1")).unwrap();
        let err = state.replace_script(0, "  \n ").unwrap_err();
        assert_eq!(err.kind(), PipelineErrorKind::Format);
        assert!(state.script().is_none());
    }

    #[test]
    fn test_back_walks_phases() {
        let mut state = SessionState::new();
        state.replace_topics(topics("t1|||t2")).unwrap();
        state.replace_script(0, "s").unwrap();

        assert_eq!(state.back(), SessionPhase::TopicsReady);
        assert_eq!(state.topics().len(), 2);
        assert!(state.selected_topic().is_none());

        assert_eq!(state.back(), SessionPhase::Empty);
        assert!(state.topics().is_empty());

        assert_eq!(state.back(), SessionPhase::Empty);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(SessionPhase::TopicsReady.to_string(), "topics_ready");
    }
}
