// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::{ModelOptions, ModelProfile, Provider};
use crate::error::{Error, Result};
use crate::services::prompt::{PromptPair, estimate_context_size};

pub mod google;
pub mod ollama;
pub mod openai;

/// Backend reply after post-processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutput {
    pub message: String,
    /// Delimited reasoning segment extracted from the raw reply, if any.
    pub reasoning: Option<String>,
}

static THINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>(.*?)</think>").expect("valid think regex"));

/// Separate `<think>...</think>` segments from the final message.
/// Every segment is removed; the first one becomes the reasoning.
/// Works on the raw text regardless of which backend produced it.
pub fn split_reasoning(raw: &str) -> GenerationOutput {
    match THINK_RE.captures(raw) {
        Some(caps) => GenerationOutput {
            message: THINK_RE.replace_all(raw, "").trim().to_string(),
            reasoning: caps.get(1).map(|m| m.as_str().trim().to_string()),
        },
        None => GenerationOutput {
            message: raw.trim().to_string(),
            reasoning: None,
        },
    }
}

/// Pin `num_ctx` when the caller gave an explicit non-zero value;
/// otherwise estimate it from the prompt length. Zero means "auto".
pub fn resolve_options(options: &ModelOptions, prompts: &PromptPair) -> ModelOptions {
    let mut resolved = options.clone();
    if !matches!(resolved.num_ctx, Some(n) if n > 0) {
        resolved.num_ctx = Some(estimate_context_size(&prompts.system, &prompts.user));
    }
    resolved
}

/// Single outbound call to the selected backend. Errors propagate
/// unmodified; there are no retries.
pub async fn dispatch(profile: &ModelProfile, prompts: &PromptPair) -> Result<GenerationOutput> {
    let options = resolve_options(&profile.options, prompts);
    debug!(
        provider = %profile.provider,
        model = %profile.model,
        num_ctx = options.num_ctx,
        "dispatching generation request"
    );

    let raw = match profile.provider {
        Provider::Ollama => ollama::generate(profile, prompts, &options).await?,
        Provider::Openai => {
            openai::generate(profile, prompts, &options, openai::OPENAI_BASE_URL).await?
        }
        Provider::Groq => {
            openai::generate(profile, prompts, &options, openai::GROQ_BASE_URL).await?
        }
        Provider::CustomOpenaiCompatible => {
            // Host presence is a profile invariant, checked at construction
            let host = profile.host.as_deref().ok_or_else(|| Error::Config(
                "provider 'custom_openai_compatible' requires a host URL".into(),
            ))?;
            openai::generate(profile, prompts, &options, host).await?
        }
        Provider::Google => google::generate(profile, prompts, &options).await?,
    };

    let output = split_reasoning(&raw);
    if let Some(ref reasoning) = output.reasoning {
        debug!(chars = reasoning.len(), "reasoning segment stripped from reply");
    }
    Ok(output)
}
