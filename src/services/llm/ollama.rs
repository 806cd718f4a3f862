// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{ModelOptions, ModelProfile};
use crate::error::{Error, Result};
use crate::services::prompt::PromptPair;

const DEFAULT_HOST: &str = "http://localhost:11434";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    /// Full options map, free-form extras included.
    options: Map<String, Value>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

pub async fn generate(
    profile: &ModelProfile,
    prompts: &PromptPair,
    options: &ModelOptions,
) -> Result<String> {
    // Sanitize: remove trailing slashes to avoid //api/generate
    let host = profile
        .host
        .as_deref()
        .unwrap_or(DEFAULT_HOST)
        .trim_end_matches('/');
    let url = format!("{host}/api/generate");

    let response = Client::new()
        .post(&url)
        .json(&GenerateRequest {
            model: &profile.model,
            system: &prompts.system,
            prompt: &prompts.user,
            stream: false,
            options: options.to_full_map(),
        })
        .send()
        .await
        .map_err(|e| Error::Provider {
            provider: "ollama".into(),
            message: e.to_string(),
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Provider {
            provider: "ollama".into(),
            message: format!("HTTP {status}: {body}"),
        });
    }

    let body: GenerateResponse = response.json().await.map_err(|e| Error::Provider {
        provider: "ollama".into(),
        message: format!("malformed response: {e}"),
    })?;

    Ok(body.response)
}
