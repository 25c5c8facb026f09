//! Prompt templates and rendering.
//!
//! A prompt is the persona, the stage instructions, a blank line, the stage's
//! section header and finally the user text, verbatim. Nothing is escaped or
//! truncated and no per-call data (timestamps, ids) is injected, so rendering
//! is a pure function of its inputs.

mod persona;
mod task;

pub use persona::{CORE_PERSONA, PersonaTemplate};
pub use task::{REQUESTED_TOPIC_COUNT, TaskTemplate};

/// Builds the outbound prompt for `task` around `material`.
pub fn render(task: TaskTemplate, material: &str) -> String {
    format!(
        "{persona}\n{instructions}\n\n{header}\n{material}",
        persona = CORE_PERSONA.text(),
        instructions = task.instructions(),
        header = task.section_header(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_ends_with_material() {
        let material = "今天读到一篇关于讨好型人格的研报";
        let prompt = render(TaskTemplate::Topic, material);
        assert!(prompt.ends_with(material));
        assert!(prompt.starts_with(CORE_PERSONA.text()));
    }

    #[test]
    fn test_render_keeps_material_verbatim() {
        let material = "  leading spaces, {braces}, <tags> and a trailing newline\n";
        let prompt = render(TaskTemplate::Script, material);
        assert!(prompt.ends_with(material));
    }

    #[test]
    fn test_render_places_header_before_material() {
        let prompt = render(TaskTemplate::Topic, "raw");
        assert!(prompt.ends_with("\n\n【Input】\nraw"));

        let prompt = render(TaskTemplate::Script, "topic");
        assert!(prompt.ends_with("\n\nSelected:\ntopic"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let first = render(TaskTemplate::Script, "same input");
        let second = render(TaskTemplate::Script, "same input");
        assert_eq!(first, second);
    }

    #[test]
    fn test_templates_differ_by_task() {
        assert_ne!(
            render(TaskTemplate::Topic, "x"),
            render(TaskTemplate::Script, "x")
        );
    }
}
