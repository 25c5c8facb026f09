//! The fixed persona shared by every prompt.

/// Tone and role description placed at the top of every prompt.
///
/// There is exactly one persona and it never changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonaTemplate {
    text: &'static str,
}

/// Content expert for the female-growth niche.
pub const CORE_PERSONA: PersonaTemplate = PersonaTemplate {
    text: "**Role**: 你是专为女性成长赛道打造的【高维认知内容专家】。\n\
           **Tone**: 真诚、通透、温柔的一刀、肉身解题。\n\
           **Mission**: 辅助创作者输出“打破思维惯性、具备心理学深度”的短视频内容。",
};

impl PersonaTemplate {
    pub fn text(&self) -> &'static str {
        self.text
    }
}
