//! Per-stage task instructions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Number of topics the topic template asks the model for.
pub const REQUESTED_TOPIC_COUNT: usize = 3;

/// Instruction block for one pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskTemplate {
    /// Distil raw material into candidate topics.
    Topic,
    /// Write a five-part spoken script for one topic.
    Script,
}

const TOPIC_INSTRUCTIONS: &str = "**任务**：基于用户资料，提炼 3 个具有“高认知觉醒”的选题。\n\
                                  **格式要求**：直接输出 3 个选题，用 '|||' 分隔。";

const SCRIPT_INSTRUCTIONS: &str = "**任务**：遵循【MF·5步高转化结构】撰写口播逐字稿。\n\
                                   1. Hook (撕开假象)\n\
                                   2. Analysis (深度归因)\n\
                                   3. Insight (认知翻转)\n\
                                   4. Action (行为交付)\n\
                                   5. Close (结尾引流)";

impl TaskTemplate {
    pub fn instructions(&self) -> &'static str {
        match self {
            Self::Topic => TOPIC_INSTRUCTIONS,
            Self::Script => SCRIPT_INSTRUCTIONS,
        }
    }

    /// Literal line that introduces the user-supplied text.
    pub fn section_header(&self) -> &'static str {
        match self {
            Self::Topic => "【Input】",
            Self::Script => "Selected:",
        }
    }
}
