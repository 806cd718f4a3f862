// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// Project metadata used to render the system prompt persona.
/// All fields are optional; the full persona is only used when the first
/// three are all present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectContext {
    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default)]
    pub project_language: Option<String>,

    #[serde(default)]
    pub project_description: Option<String>,

    #[serde(default)]
    pub commit_guidelines: Option<String>,
}

impl ProjectContext {
    pub fn is_complete(&self) -> bool {
        self.project_name.is_some()
            && self.project_language.is_some()
            && self.project_description.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmojiSteps {
    /// Emoji guidance is folded into the single generation prompt.
    #[default]
    Single,
    /// Reserved: emoji selection as a separate pass. Adds nothing at
    /// prompt time since one invocation makes one backend call.
    TwoStep,
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmojiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub emoji_steps: EmojiSteps,

    /// "simple", "full", or any other string used literally as a custom
    /// convention text.
    #[serde(default = "default_convention")]
    pub emoji_convention: String,
}

fn default_true() -> bool {
    true
}

fn default_convention() -> String {
    "simple".into()
}

impl Default for EmojiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            emoji_steps: EmojiSteps::default(),
            emoji_convention: default_convention(),
        }
    }
}
