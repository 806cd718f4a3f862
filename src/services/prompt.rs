// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::domain::{ClueSet, EmojiConfig, EmojiSteps, ModelProfile, ProjectContext};
use crate::error::{Error, Result};

/// System and user prompts, built once per invocation and dispatched once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    /// Inspectable form for `--show-prompt`.
    pub fn to_debug_text(&self) -> String {
        format!(
            "--- SYSTEM PROMPT ---\n{}\n--- USER PROMPT ---\n{}",
            self.system, self.user
        )
    }
}

const SYSTEM_TEMPLATE: &str = "\
# Purpose
You are a commit message helper for {project_name}, a project written in {project_language}, described as:
{project_description}

Your only task is to receive a git diff and return a sensible commit message following these guidelines:

- Never ask follow-up questions.
- Don't talk about yourself.
- Be concise and clear.
- Be informative.
- Don't explain row by row, just the global goal of the changes.
- Avoid unnecessary details and long explanations.
- Use action verbs.
- Use bullet points in the body if there are many changes.
- Do not talk about the hashes.
{commit_guidelines}";

const FALLBACK_TEMPLATE: &str = "\
You are a commit message helper. Your only task is to receive a git diff and return a sensible \
commit message describing it. Never ask follow-up questions and do not return anything other \
than the commit message itself.
{commit_guidelines}";

const DEFAULT_GUIDELINES: &str = "\
Create concise and understandable commit messages. Be direct about what changed and why, give a \
small summary of what has changed and how it may affect the rest of the project. Do not return \
any explanation other than the commit message itself.";

const USER_TEMPLATE: &str = "\
{clues}Write a commit message for the following staged changes:

{diff}";

const EMOJI_SIMPLE: &str = "\
Start the message with one emoji that fits the change, using the format \
\"emoji commit message title\" followed by the rest of the message:
    \u{2728} ; Introduce new features.
    \u{1F41B} ; Fix a bug.
    \u{1F4DD} ; Add or update documentation.
    \u{267B}\u{FE0F} ; Refactor code.
    \u{26A1}\u{FE0F} ; Improve performance.
    \u{2705} ; Add, update, or pass tests.
    \u{1F527} ; Add or update configuration files.
    \u{1F525} ; Remove code or files.
    \u{2B06}\u{FE0F} ; Upgrade dependencies.
    \u{1F3A8} ; Improve structure / format of the code.";

const EMOJI_FULL: &str = "\
Choose one of the following emoji to start your message, use just the emoji, and only if the \
description applies to the diff. Use the format \"emoji commit message title\" followed by the \
rest of the message:
    \u{1F3A8} ; Improve structure / format of the code.
    \u{26A1}\u{FE0F} ; Improve performance.
    \u{1F525} ; Remove code or files.
    \u{1F41B} ; Fix a bug.
    \u{1F691}\u{FE0F} ; Critical hotfix.
    \u{2728} ; Introduce new features.
    \u{1F4DD} ; Add or update documentation.
    \u{1F680} ; Deploy stuff.
    \u{1F484} ; Add or update the UI and style files.
    \u{1F389} ; Begin a project.
    \u{2705} ; Add, update, or pass tests.
    \u{1F512}\u{FE0F} ; Fix security or privacy issues.
    \u{1F510} ; Add or update secrets.
    \u{1F516} ; Release / version tags.
    \u{1F6A8} ; Fix compiler / linter warnings.
    \u{1F6A7} ; Work in progress.
    \u{1F49A} ; Fix CI build.
    \u{2B07}\u{FE0F} ; Downgrade dependencies.
    \u{2B06}\u{FE0F} ; Upgrade dependencies.
    \u{1F4CC} ; Pin dependencies to specific versions.
    \u{1F477} ; Add or update CI build system.
    \u{1F4C8} ; Add or update analytics or tracking code.
    \u{267B}\u{FE0F} ; Refactor code.
    \u{2795} ; Add a dependency.
    \u{2796} ; Remove a dependency.
    \u{1F527} ; Add or update configuration files.
    \u{1F528} ; Add or update development scripts.
    \u{1F310} ; Internationalization and localization.
    \u{270F}\u{FE0F} ; Fix typos.
    \u{23EA}\u{FE0F} ; Revert changes.
    \u{1F500} ; Merge branches.
    \u{1F4E6}\u{FE0F} ; Add or update compiled files or packages.
    \u{1F47D}\u{FE0F} ; Update code due to external API changes.
    \u{1F69A} ; Move or rename resources (e.g. files, paths, routes).
    \u{1F4C4} ; Add or update license.
    \u{1F4A5} ; Introduce breaking changes.
    \u{1F371} ; Add or update assets.
    \u{267F}\u{FE0F} ; Improve accessibility.
    \u{1F4A1} ; Add or update comments in source code.
    \u{1F4AC} ; Add or update text and literals.
    \u{1F5C3}\u{FE0F} ; Perform database related changes.
    \u{1F50A} ; Add or update logs.
    \u{1F507} ; Remove logs.
    \u{1F6B8} ; Improve user experience / usability.
    \u{1F3D7}\u{FE0F} ; Make architectural changes.
    \u{1F4F1} ; Work on responsive design.
    \u{1F9EA} ; Add a failing test.
    \u{1F6C2} ; Work on code related to authorization, roles and permissions.
    \u{1FA79} ; Simple fix for a non-critical issue.
    \u{26B0}\u{FE0F} ; Remove dead code.
    \u{1F9F5} ; Add or update code related to multithreading or concurrency.
    \u{1F9BA} ; Add or update code related to validation.";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("valid placeholder regex"));

/// Render `{name}` placeholders from `vars`; unresolved placeholders
/// render as empty. The required-placeholder check happens before this.
fn render(template: &str, vars: &BTreeMap<&str, &str>) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            vars.get(&caps[1]).copied().unwrap_or("")
        })
        .into_owned()
}

/// Context window estimate from combined prompt length. A fixed
/// per-character multiplier approximates worst-case tokenizer expansion;
/// the bounds keep the window minimally useful and capped at a
/// representative backend maximum.
pub fn estimate_context_size(system: &str, user: &str) -> u64 {
    let input_len = (system.chars().count() + user.chars().count()) as f64;
    (input_len * 2.64).round().clamp(1024.0, 128_000.0) as u64
}

pub struct PromptBuilder<'a> {
    profile: &'a ModelProfile,
    context: Option<&'a ProjectContext>,
    emoji: &'a EmojiConfig,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(
        profile: &'a ModelProfile,
        context: Option<&'a ProjectContext>,
        emoji: &'a EmojiConfig,
    ) -> Self {
        Self {
            profile,
            context,
            emoji,
        }
    }

    pub fn build(&self, clues: &ClueSet, diff: &str) -> Result<PromptPair> {
        Ok(PromptPair {
            system: self.system_prompt(),
            user: user_prompt(USER_TEMPLATE, clues, diff)?,
        })
    }

    fn system_prompt(&self) -> String {
        let guidelines = self
            .context
            .and_then(|c| c.commit_guidelines.as_deref())
            .unwrap_or(DEFAULT_GUIDELINES);

        let mut vars: BTreeMap<&str, &str> = BTreeMap::new();
        vars.insert("commit_guidelines", guidelines);
        if let Some(context) = self.context {
            if let Some(ref name) = context.project_name {
                vars.insert("project_name", name);
            }
            if let Some(ref language) = context.project_language {
                vars.insert("project_language", language);
            }
            if let Some(ref description) = context.project_description {
                vars.insert("project_description", description);
            }
        }

        // Profile override wins but is still rendered against the context
        let template = match self.profile.system_prompt.as_deref() {
            Some(custom) => custom,
            None if self.context.is_some_and(ProjectContext::is_complete) => SYSTEM_TEMPLATE,
            None => FALLBACK_TEMPLATE,
        };

        let mut system = render(template, &vars).trim().to_string();

        if self.emoji.enabled && self.emoji.emoji_steps == EmojiSteps::Single {
            system.push_str("\n\n");
            system.push_str(match self.emoji.emoji_convention.as_str() {
                "simple" => EMOJI_SIMPLE,
                "full" => EMOJI_FULL,
                custom => custom,
            });
        }

        system
    }
}

fn user_prompt(template: &str, clues: &ClueSet, diff: &str) -> Result<String> {
    if !template.contains("{diff}") {
        return Err(Error::Template {
            template: "user_prompt".into(),
            message: "missing required {diff} placeholder".into(),
        });
    }

    let fragments = clues.expand();
    let clues_text = if fragments.is_empty() {
        String::new()
    } else {
        let mut text = String::from("Hints about this change:\n");
        for (_, fragment) in &fragments {
            text.push_str("- ");
            text.push_str(fragment);
            text.push('\n');
        }
        text.push('\n');
        text
    };

    let mut vars: BTreeMap<&str, &str> = BTreeMap::new();
    vars.insert("clues", &clues_text);
    vars.insert("diff", diff);
    Ok(render(template, &vars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_fills_known_and_blanks_unknown() {
        let mut vars = BTreeMap::new();
        vars.insert("name", "demo");
        assert_eq!(render("hi {name}{missing}!", &vars), "hi demo!");
    }

    #[test]
    fn user_prompt_requires_diff_placeholder() {
        let err = user_prompt("no placeholder here", &ClueSet::default(), "x").unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
    }
}
