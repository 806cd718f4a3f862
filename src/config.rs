// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::cli::Cli;
use crate::domain::{EmojiConfig, ModelOptions, ModelProfile, ProjectContext, Provider, profile};
use crate::error::{Error, Result};

/// Config directory name, used under both the home and working directory.
pub const CONFIG_DIR: &str = ".commitcraft";

const API_KEY_SUFFIX: &str = "_API_KEY";

/// A raw `models` or `providers.<nickname>` block, before provider-name
/// validation. Unknown provider strings are rejected when the profile is
/// built, not at parse time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelSection {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub options: Option<ModelOptions>,
}

/// The merged configuration mapping, after layer resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub context: Option<ProjectContext>,
    #[serde(default)]
    pub models: Option<ModelSection>,
    #[serde(default)]
    pub emoji: Option<EmojiConfig>,
    #[serde(default)]
    pub providers: Option<BTreeMap<String, ModelSection>>,
}

/// Everything the pipeline needs for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub profile: ModelProfile,
    pub context: Option<ProjectContext>,
    pub emoji: EmojiConfig,
}

/// Deep-merge ordered layers, lowest priority first. Higher layers win
/// per key; two maps merge recursively; null never erases a set value.
pub fn merge_layers(layers: &[Value]) -> Value {
    let mut merged = Value::Object(serde_json::Map::new());
    for layer in layers {
        merge_value(&mut merged, layer);
    }
    merged
}

fn merge_value(base: &mut Value, incoming: &Value) {
    if incoming.is_null() {
        return;
    }
    if let (Value::Object(base_map), Value::Object(incoming_map)) = (&mut *base, incoming) {
        for (key, value) in incoming_map {
            if value.is_null() {
                continue;
            }
            match base_map.get_mut(key) {
                Some(slot) => merge_value(slot, value),
                None => {
                    base_map.insert(key.clone(), value.clone());
                }
            }
        }
        return;
    }
    *base = incoming.clone();
}

/// Parse a structured config file, format picked by extension.
pub fn load_value_file(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "toml" => toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid TOML in {}: {e}", path.display()))),
        "yaml" | "yml" => serde_yaml::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid YAML in {}: {e}", path.display()))),
        "json" => serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid JSON in {}: {e}", path.display()))),
        other => Err(Error::Config(format!(
            "unsupported config format '{other}' for {}",
            path.display()
        ))),
    }
}

fn find_section_file(dir: &Path, stem: &str) -> Option<PathBuf> {
    ["toml", "yaml", "yml", "json"]
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|path| path.is_file())
}

/// Config layer for one scope directory: a combined `config.*` file, or
/// the split `context.*`/`models.*`/`emoji.*` files when none exists.
pub fn layer_for_dir(dir: &Path) -> Result<Option<Value>> {
    if let Some(path) = find_section_file(dir, "config") {
        debug!(path = %path.display(), "loading config file");
        return load_value_file(&path).map(Some);
    }

    let mut layer = serde_json::Map::new();
    for stem in ["context", "models", "emoji"] {
        if let Some(path) = find_section_file(dir, stem) {
            debug!(path = %path.display(), "loading split config section");
            layer.insert(stem.to_string(), load_value_file(&path)?);
        }
    }

    if layer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Value::Object(layer)))
    }
}

fn global_config_dir() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_DIR))
}

impl Settings {
    /// Resolve the layered configuration plus CLI overrides into one
    /// validated settings record.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut layers: Vec<Value> = Vec::new();

        if let Some(ref path) = cli.config_file {
            // An explicit config file replaces the scope discovery
            layers.push(load_value_file(path)?);
        } else {
            if let Some(dir) = global_config_dir() {
                if let Some(layer) = layer_for_dir(&dir)? {
                    layers.push(layer);
                }
            }
            if let Some(layer) = layer_for_dir(Path::new(CONFIG_DIR))? {
                layers.push(layer);
            }
        }

        let merged = merge_layers(&layers);
        let file: ConfigFile = serde_json::from_value(merged)
            .map_err(|e| Error::Config(e.to_string()))?;

        Settings::from_parts(file, cli)
    }

    /// Apply CLI overrides to an already-merged config mapping. Split out
    /// so nickname and override semantics are testable without files.
    pub fn from_parts(file: ConfigFile, cli: &Cli) -> Result<Self> {
        let models = file.models.unwrap_or_default();
        let providers = file.providers.unwrap_or_default();

        let profile = match cli.provider.as_deref() {
            Some(name) => {
                if let Some(provider) = Provider::from_name(name) {
                    build_standard_profile(provider, &models, cli)?
                } else if let Some(block) = providers.get(name) {
                    // Nickname: profile comes from the named block; the
                    // nickname string never lands in the provider field
                    build_nickname_profile(name, block, cli)?
                } else {
                    return Err(Error::UnsupportedProvider(name.to_string()));
                }
            }
            None => {
                let provider = match models.provider.as_deref() {
                    Some(name) => Provider::from_name(name)
                        .ok_or_else(|| Error::UnsupportedProvider(name.to_string()))?,
                    None => Provider::default(),
                };
                build_standard_profile(provider, &models, cli)?
            }
        };

        Ok(Settings {
            profile,
            context: file.context,
            emoji: file.emoji.unwrap_or_default(),
        })
    }

    /// Write a commented default project config, `init` subcommand.
    pub fn create_default() -> Result<PathBuf> {
        let dir = PathBuf::from(CONFIG_DIR);
        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# CommitCraft configuration

[context]
# project_name = "my-project"
# project_language = "Rust"
# project_description = "What the project does"
# commit_guidelines = "Follow conventional commits"

[models]
# Provider: ollama, openai, google, groq, custom_openai_compatible
provider = "ollama"
model = "gemma2"
# host = "http://localhost:11434"

[models.options]
# num_ctx = 0          # 0 = estimate from prompt length
temperature = 0.7
# max_tokens = 256

[emoji]
enabled = true
emoji_steps = "single"
# Convention: "simple", "full", or free text with your own rules
emoji_convention = "simple"

# Named provider profiles, selectable with --provider <nickname>.
# The API key comes from the <NICKNAME>_API_KEY environment variable.
# [providers.workllm]
# provider = "custom_openai_compatible"
# model = "qwen2.5-coder"
# host = "https://llm.internal.example.com/v1"
"#;

        fs::write(&path, content)?;
        Ok(path)
    }
}

fn cli_options(cli: &Cli) -> ModelOptions {
    ModelOptions {
        num_ctx: cli.num_ctx,
        temperature: cli.temperature,
        max_tokens: cli.max_tokens,
        extra: BTreeMap::new(),
    }
}

fn build_standard_profile(
    provider: Provider,
    section: &ModelSection,
    cli: &Cli,
) -> Result<ModelProfile> {
    let options = cli_options(cli).overriding(section.options.as_ref().unwrap_or(&ModelOptions::default()));
    let key_env = provider.api_key_env();

    let profile = ModelProfile {
        provider,
        model: cli
            .model
            .clone()
            .or_else(|| section.model.clone())
            .unwrap_or_else(profile::default_model),
        host: cli.host.clone().or_else(|| section.host.clone()),
        system_prompt: cli
            .system_prompt
            .clone()
            .or_else(|| section.system_prompt.clone()),
        options,
        api_key: key_env.and_then(|var| std::env::var(var).ok()),
    };

    profile.validate(key_env)?;
    Ok(profile)
}

fn build_nickname_profile(nickname: &str, block: &ModelSection, cli: &Cli) -> Result<ModelProfile> {
    let provider = match block.provider.as_deref() {
        Some(name) => Provider::from_name(name)
            .ok_or_else(|| Error::UnsupportedProvider(name.to_string()))?,
        None => Provider::default(),
    };

    let key_env = format!("{}{API_KEY_SUFFIX}", nickname.to_uppercase());

    // Only --model/--host/--system-prompt override fields of the
    // nicknamed block; option flags do not reach into it. The key,
    // once attached, survives reconstruction
    let profile = ModelProfile {
        provider,
        model: cli
            .model
            .clone()
            .or_else(|| block.model.clone())
            .unwrap_or_else(profile::default_model),
        host: cli.host.clone().or_else(|| block.host.clone()),
        system_prompt: cli
            .system_prompt
            .clone()
            .or_else(|| block.system_prompt.clone()),
        options: block.options.clone().unwrap_or_default(),
        api_key: std::env::var(&key_env).ok(),
    };

    profile.validate(Some(&key_env))?;
    Ok(profile)
}
