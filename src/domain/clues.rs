// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

/// A user-supplied hint about the nature of a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clue {
    /// Bare flag: render the built-in label for the slot.
    Enabled,
    /// Flag with text: render "<label>: <text>", or the raw text for
    /// slots without a built-in label.
    Text(String),
}

const BUG_LABEL: &str = "Bug fix";
const FEAT_LABEL: &str = "New feature";
const DOCS_LABEL: &str = "Documentation";
const REFACT_LABEL: &str = "Refactor";

/// Fixed clue slots. Absent slots are omitted from the expansion entirely;
/// the user-prompt template tolerates the missing fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClueSet {
    pub bug: Option<Clue>,
    pub feat: Option<Clue>,
    pub docs: Option<Clue>,
    pub refact: Option<Clue>,
    pub custom: Option<Clue>,
}

impl ClueSet {
    pub fn is_empty(&self) -> bool {
        self.bug.is_none()
            && self.feat.is_none()
            && self.docs.is_none()
            && self.refact.is_none()
            && self.custom.is_none()
    }

    /// Expand present slots to text fragments, in slot order.
    pub fn expand(&self) -> Vec<(&'static str, String)> {
        let slots = [
            ("bug", &self.bug, Some(BUG_LABEL)),
            ("feat", &self.feat, Some(FEAT_LABEL)),
            ("docs", &self.docs, Some(DOCS_LABEL)),
            ("refact", &self.refact, Some(REFACT_LABEL)),
            ("custom", &self.custom, None),
        ];

        let mut fragments = Vec::new();
        for (name, clue, label) in slots {
            let rendered = match (clue, label) {
                (None, _) => continue,
                (Some(Clue::Enabled), Some(label)) => label.to_string(),
                // A bare flag on a label-less slot carries no information
                (Some(Clue::Enabled), None) => continue,
                (Some(Clue::Text(text)), Some(label)) => format!("{label}: {text}"),
                (Some(Clue::Text(text)), None) => text.clone(),
            };
            fragments.push((name, rendered));
        }
        fragments
    }
}
