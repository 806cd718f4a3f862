// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{ModelOptions, ModelProfile};
use crate::error::{Error, Result};
use crate::services::prompt::PromptPair;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// One non-streaming chat-completions call. Serves openai, groq, and
/// custom OpenAI-compatible hosts; only the base URL differs.
pub async fn generate(
    profile: &ModelProfile,
    prompts: &PromptPair,
    options: &ModelOptions,
    base_url: &str,
) -> Result<String> {
    let provider = profile.provider.to_string();
    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
    let hosted = options.to_hosted();

    let mut request = Client::new().post(&url);
    // Keyless endpoints (local gateways) get no Authorization header
    if let Some(key) = profile.api_key.as_deref() {
        request = request.header("Authorization", format!("Bearer {key}"));
    }

    let response = request
        .json(&ChatRequest {
            model: &profile.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &prompts.system,
                },
                Message {
                    role: "user",
                    content: &prompts.user,
                },
            ],
            temperature: hosted.temperature,
            max_tokens: hosted.max_tokens,
            top_p: hosted.top_p,
        })
        .send()
        .await
        .map_err(|e| Error::Provider {
            provider: provider.clone(),
            message: e.to_string(),
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Provider {
            provider,
            message: format!("HTTP {status}: {body}"),
        });
    }

    let body: ChatResponse = response.json().await.map_err(|e| Error::Provider {
        provider: provider.clone(),
        message: format!("malformed response: {e}"),
    })?;

    body.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(Error::Provider {
            provider,
            message: "response contained no choices".into(),
        })
}
