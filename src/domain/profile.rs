// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// The five supported backends. Anything else is rejected at profile
/// construction, before any network call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    #[default]
    Ollama,
    Openai,
    Google,
    Groq,
    CustomOpenaiCompatible,
}

impl Provider {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "ollama" => Some(Self::Ollama),
            "openai" => Some(Self::Openai),
            "google" => Some(Self::Google),
            "groq" => Some(Self::Groq),
            "custom_openai_compatible" => Some(Self::CustomOpenaiCompatible),
            _ => None,
        }
    }

    /// Environment variable holding the API key for standard providers.
    /// Nicknamed profiles derive their own variable name instead.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::Ollama => None,
            Self::Openai => Some("OPENAI_API_KEY"),
            Self::Google => Some("GOOGLE_API_KEY"),
            Self::Groq => Some("GROQ_API_KEY"),
            Self::CustomOpenaiCompatible => Some("CUSTOM_API_KEY"),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ollama => write!(f, "ollama"),
            Self::Openai => write!(f, "openai"),
            Self::Google => write!(f, "google"),
            Self::Groq => write!(f, "groq"),
            Self::CustomOpenaiCompatible => write!(f, "custom_openai_compatible"),
        }
    }
}

/// Model options: a small fixed set of meaningful keys plus free-form
/// extras. Extras pass through to backends that accept arbitrary options
/// and are dropped by those that don't.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelOptions {
    /// Context window size. Zero or absent means "estimate from prompt length".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_ctx: Option<u64>,

    /// Sampling temperature in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Maximum number of tokens to generate (>= 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Hosted-completion projection: the only option keys the hosted chat
/// backends accept. Context sizing is managed server-side there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostedOptions {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u64>,
    pub top_p: Option<f64>,
}

impl ModelOptions {
    /// Fields set on `self` win; the rest fall back to `base`.
    pub fn overriding(&self, base: &ModelOptions) -> ModelOptions {
        let mut extra = base.extra.clone();
        extra.extend(self.extra.clone());
        ModelOptions {
            num_ctx: self.num_ctx.or(base.num_ctx),
            temperature: self.temperature.or(base.temperature),
            max_tokens: self.max_tokens.or(base.max_tokens),
            extra,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(t) = self.temperature {
            if !(0.0..=1.0).contains(&t) {
                return Err(Error::Config(format!(
                    "temperature must be 0.0-1.0, got {t}"
                )));
            }
        }
        if self.max_tokens == Some(0) {
            return Err(Error::Config("max_tokens must be at least 1".into()));
        }
        Ok(())
    }

    /// Full options map for backends that accept arbitrary keys (ollama).
    pub fn to_full_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(n) = self.num_ctx {
            map.insert("num_ctx".into(), Value::from(n));
        }
        if let Some(t) = self.temperature {
            map.insert("temperature".into(), Value::from(t));
        }
        if let Some(m) = self.max_tokens {
            map.insert("max_tokens".into(), Value::from(m));
        }
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        map
    }

    /// Intersection with the keys hosted chat backends understand.
    /// Everything else, including `num_ctx`, is dropped.
    pub fn to_hosted(&self) -> HostedOptions {
        HostedOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.extra.get("top_p").and_then(Value::as_f64),
        }
    }
}

/// The resolved, validated description of which backend to call and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelProfile {
    #[serde(default)]
    pub provider: Provider,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub system_prompt: Option<String>,

    #[serde(default)]
    pub options: ModelOptions,

    /// Resolved from the environment at construction time, never read
    /// from or written back to config files.
    #[serde(skip)]
    pub api_key: Option<String>,
}

pub fn default_model() -> String {
    "gemma2".into()
}

impl Default for ModelProfile {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: default_model(),
            host: None,
            system_prompt: None,
            options: ModelOptions::default(),
            api_key: None,
        }
    }
}

impl ModelProfile {
    /// Check profile invariants. `key_env` names the environment variable
    /// the API key was looked up in, for the missing-key log hint.
    pub fn validate(&self, key_env: Option<&str>) -> Result<()> {
        if self.provider == Provider::CustomOpenaiCompatible {
            if self.model.trim().is_empty() {
                return Err(Error::Config(
                    "provider 'custom_openai_compatible' requires a model name".into(),
                ));
            }
            if self.host.is_none() {
                return Err(Error::Config(
                    "provider 'custom_openai_compatible' requires a host URL".into(),
                ));
            }
        }

        if let Some(ref host) = self.host {
            let url = Url::parse(host)
                .map_err(|e| Error::Config(format!("invalid host URL '{host}': {e}")))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(Error::Config(format!(
                    "host URL must use http or https, got '{host}'"
                )));
            }
        }

        // A missing key is not a construction error: keyless endpoints
        // exist (local gateways), and hosted backends report their own
        // auth failures. Leave a trace for the 401 that may follow.
        if self.provider != Provider::Ollama && self.api_key.is_none() {
            let hint = key_env.unwrap_or("the provider's API key variable");
            debug!(provider = %self.provider, "no API key found; set {hint} if the endpoint needs one");
        }

        self.options.validate()
    }
}
