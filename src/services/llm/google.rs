// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{ModelOptions, ModelProfile};
use crate::error::{Error, Result};
use crate::services::prompt::PromptPair;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

pub async fn generate(
    profile: &ModelProfile,
    prompts: &PromptPair,
    options: &ModelOptions,
) -> Result<String> {
    let url = format!("{BASE_URL}/models/{}:generateContent", profile.model);
    let hosted = options.to_hosted();

    let mut request = Client::new().post(&url);
    // Key goes in a header so it never shows up in logged URLs
    if let Some(key) = profile.api_key.as_deref() {
        request = request.header("x-goog-api-key", key);
    }

    let response = request
        .json(&GenerateContentRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: &prompts.system,
                }],
            },
            contents: vec![Content {
                parts: vec![Part {
                    text: &prompts.user,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: hosted.temperature,
                max_output_tokens: hosted.max_tokens,
                top_p: hosted.top_p,
            },
        })
        .send()
        .await
        .map_err(|e| Error::Provider {
            provider: "google".into(),
            message: e.to_string(),
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Provider {
            provider: "google".into(),
            message: format!("HTTP {status}: {body}"),
        });
    }

    let body: GenerateContentResponse =
        response.json().await.map_err(|e| Error::Provider {
            provider: "google".into(),
            message: format!("malformed response: {e}"),
        })?;

    let text = body
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(Error::Provider {
            provider: "google".into(),
            message: "response contained no candidates".into(),
        });
    }

    Ok(text)
}
