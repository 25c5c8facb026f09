//! Two-stage prompt pipeline.
//!
//! Stage one turns raw material into topic candidates, stage two turns one
//! candidate into a script. Both stages take the session state by `&mut`, so
//! a session can never have two requests in flight, and both commit to the
//! state only after every check has passed.

use mfw_core::generation::GenerationClient;
use mfw_core::template::{REQUESTED_TOPIC_COUNT, TaskTemplate, render};
use mfw_core::topic::parse;
use mfw_core::{PipelineError, SessionState, SessionView};

/// Runs the topic and script stages against a generation client.
pub struct ScriptPipeline<C> {
    client: C,
}

impl<C: GenerationClient> ScriptPipeline<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Generates topics from `material` and installs them in `state`.
    ///
    /// On success the previous topics, script and selection are gone. On any
    /// failure `state` is untouched.
    pub async fn generate_topics(
        &self,
        state: &mut SessionState,
        material: &str,
    ) -> Result<SessionView, PipelineError> {
        if material.trim().is_empty() {
            return Err(PipelineError::validation("raw material is empty"));
        }

        let prompt = render(TaskTemplate::Topic, material);
        let raw = self.call(TaskTemplate::Topic, &prompt).await?;

        let topics = parse(&raw);
        if topics.is_empty() {
            tracing::warn!("Topic output contained no usable segments");
            return Err(PipelineError::format(
                "model output contained no topics; try again",
            ));
        }
        if topics.len() != REQUESTED_TOPIC_COUNT {
            tracing::warn!(
                "Expected {} topics, model returned {}; keeping all",
                REQUESTED_TOPIC_COUNT,
                topics.len()
            );
        }

        let count = topics.len();
        state.replace_topics(topics)?;
        tracing::info!(count, phase = %state.phase(), "Topics generated");
        Ok(state.view())
    }

    /// Generates a script for topic `index` and makes it the live script.
    pub async fn select_topic(
        &self,
        state: &mut SessionState,
        index: usize,
    ) -> Result<SessionView, PipelineError> {
        let topic = state.require_topic(index)?.as_str().to_string();

        let script = self.generate_script(&topic).await?;

        state.replace_script(index, script)?;
        tracing::info!(topic = index + 1, phase = %state.phase(), "Script generated");
        Ok(state.view())
    }

    /// Script stage on its own, for a topic that did not come from a session.
    pub async fn generate_script(&self, topic: &str) -> Result<String, PipelineError> {
        if topic.trim().is_empty() {
            return Err(PipelineError::validation("selected topic is empty"));
        }
        let prompt = render(TaskTemplate::Script, topic);
        let script = self.call(TaskTemplate::Script, &prompt).await?;
        if script.trim().is_empty() {
            tracing::warn!("Script output was blank");
            return Err(PipelineError::format("model returned an empty script; try again"));
        }
        Ok(script)
    }

    async fn call(&self, task: TaskTemplate, prompt: &str) -> Result<String, PipelineError> {
        tracing::debug!(%task, client = %self.client.describe(), prompt_len = prompt.len(), "Calling model");
        self.client.generate(prompt).await.map_err(|err| {
            tracing::error!(%task, "Generation failed: {}", err);
            PipelineError::from(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mfw_core::generation::GenerationError;
    use mfw_core::{PipelineErrorKind, SessionPhase};

    struct Echo;

    #[async_trait]
    impl GenerationClient for Echo {
        fn describe(&self) -> String {
            "echo".to_string()
        }

        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            Ok(prompt.lines().last().unwrap_or_default().to_string())
        }
    }

    struct Blank;

    #[async_trait]
    impl GenerationClient for Blank {
        fn describe(&self) -> String {
            "blank".to_string()
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Ok("  \n ".to_string())
        }
    }

    #[tokio::test]
    async fn test_topic_prompt_carries_material() {
        let pipeline = ScriptPipeline::new(Echo);
        let mut state = SessionState::new();

        let view = pipeline
            .generate_topics(&mut state, "x|||y")
            .await
            .unwrap();
        assert_eq!(view.topics, vec!["x", "y"]);
        assert_eq!(view.phase, SessionPhase::TopicsReady);
    }

    #[tokio::test]
    async fn test_script_prompt_carries_topic() {
        let pipeline = ScriptPipeline::new(Echo);
        let mut state = SessionState::new();
        pipeline.generate_topics(&mut state, "x|||y").await.unwrap();

        let view = pipeline.select_topic(&mut state, 1).await.unwrap();
        assert_eq!(view.script.as_deref(), Some("y"));
    }

    #[tokio::test]
    async fn test_blank_material_is_validation() {
        let pipeline = ScriptPipeline::new(Echo);
        let mut state = SessionState::new();
        let err = pipeline
            .generate_topics(&mut state, " \n\t")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), PipelineErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_blank_standalone_topic_is_validation() {
        let pipeline = ScriptPipeline::new(Echo);
        let err = pipeline.generate_script("  ").await.unwrap_err();
        assert_eq!(err.kind(), PipelineErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_blank_script_is_format_error() {
        let err = ScriptPipeline::new(Blank)
            .generate_script("topic")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), PipelineErrorKind::Format);
    }

    #[tokio::test]
    async fn test_blank_script_leaves_selection_untouched() {
        let mut state = SessionState::new();
        ScriptPipeline::new(Echo)
            .generate_topics(&mut state, "x|||y")
            .await
            .unwrap();

        let err = ScriptPipeline::new(Blank)
            .select_topic(&mut state, 0)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), PipelineErrorKind::Format);
        assert_eq!(state.phase(), SessionPhase::TopicsReady);
        assert!(state.script().is_none());
    }
}
