// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{Clue, ClueSet};

#[derive(Parser, Debug, Default)]
#[command(name = "commitcraft")]
#[command(version)]
#[command(about = "AI-powered commit message generator", long_about = None)]
pub struct Cli {
    /// LLM provider (ollama, openai, google, groq, custom_openai_compatible)
    /// or a [providers.*] nickname from the config
    #[arg(short, long, env = "COMMITCRAFT_PROVIDER")]
    pub provider: Option<String>,

    /// Model name (e.g. 'gemma2', 'llama3.1:70b')
    #[arg(short, long, env = "COMMITCRAFT_MODEL")]
    pub model: Option<String>,

    /// HTTP(S) host for the provider; required for custom_openai_compatible
    #[arg(long)]
    pub host: Option<String>,

    /// System prompt override (rendered against the project context)
    #[arg(long)]
    pub system_prompt: Option<String>,

    /// Context window size; 0 means estimate from prompt length
    #[arg(long)]
    pub num_ctx: Option<u64>,

    /// Sampling temperature (0.0-1.0)
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Maximum number of tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u64>,

    /// Path to a config file (TOML, YAML, or JSON); skips scope discovery
    #[arg(short, long)]
    pub config_file: Option<PathBuf>,

    /// Hint: this change fixes a bug (optionally say which)
    #[arg(long, num_args = 0..=1, default_missing_value = "", value_name = "TEXT")]
    pub bug: Option<String>,

    /// Hint: this change adds a feature (optionally say which)
    #[arg(long, num_args = 0..=1, default_missing_value = "", value_name = "TEXT")]
    pub feat: Option<String>,

    /// Hint: this change updates documentation
    #[arg(long, num_args = 0..=1, default_missing_value = "", value_name = "TEXT")]
    pub docs: Option<String>,

    /// Hint: this change is a refactor
    #[arg(long, num_args = 0..=1, default_missing_value = "", value_name = "TEXT")]
    pub refact: Option<String>,

    /// Free-form hint about the change
    #[arg(long, value_name = "TEXT")]
    pub custom: Option<String>,

    /// Glob patterns of files to drop from the diff
    /// (replaces .commitcraftignore for this run)
    #[arg(long, value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// Print the prompts instead of calling the provider
    #[arg(long)]
    pub show_prompt: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Write a commented default config to ./.commitcraft/config.toml
    Init,
    /// Show the resolved configuration
    Config,
}

impl Cli {
    pub fn clues(&self) -> ClueSet {
        ClueSet {
            bug: clue_flag(&self.bug),
            feat: clue_flag(&self.feat),
            docs: clue_flag(&self.docs),
            refact: clue_flag(&self.refact),
            custom: clue_flag(&self.custom),
        }
    }
}

// A bare flag arrives as an empty string via default_missing_value
fn clue_flag(value: &Option<String>) -> Option<Clue> {
    match value.as_deref() {
        None => None,
        Some("") => Some(Clue::Enabled),
        Some(text) => Some(Clue::Text(text.to_string())),
    }
}
