// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use std::path::Path;

use console::style;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::services::filter::{self, DiffFilter, IGNORE_FILE};
use crate::services::git::GitService;
use crate::services::llm;
use crate::services::prompt::PromptBuilder;

pub struct App {
    cli: Cli,
    settings: Settings,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        // Secrets may live in a project-local .env, like the config files
        dotenvy::from_path(Path::new(".env")).ok();

        let settings = Settings::resolve(&cli)?;
        debug!(
            provider = %settings.profile.provider,
            model = %settings.profile.model,
            "config resolved"
        );
        Ok(Self { cli, settings })
    }

    pub async fn run(&self) -> Result<()> {
        if let Some(ref cmd) = self.cli.command {
            return self.handle_command(cmd);
        }
        self.generate_message().await
    }

    async fn generate_message(&self) -> Result<()> {
        let raw_diff = GitService::staged_diff().await?;

        let patterns = self.ignore_patterns()?;
        let diff = DiffFilter::new(&patterns)?.filter(&raw_diff);
        if diff.trim().is_empty() {
            return Err(Error::NoStagedChanges);
        }
        debug!(
            raw_chars = raw_diff.len(),
            filtered_chars = diff.len(),
            patterns = patterns.len(),
            "diff filtered"
        );

        let clues = self.cli.clues();
        let builder = PromptBuilder::new(
            &self.settings.profile,
            self.settings.context.as_ref(),
            &self.settings.emoji,
        );
        let prompts = builder.build(&clues, &diff)?;

        if self.cli.show_prompt {
            println!("{}", prompts.to_debug_text());
            return Ok(());
        }

        eprintln!(
            "{} Contacting {} ({})...",
            style("→").cyan(),
            self.settings.profile.provider,
            self.settings.profile.model
        );

        let output = llm::dispatch(&self.settings.profile, &prompts).await?;
        println!("{}", output.message);
        Ok(())
    }

    fn ignore_patterns(&self) -> Result<Vec<String>> {
        if !self.cli.ignore.is_empty() {
            return Ok(self.cli.ignore.clone());
        }
        let path = Path::new(IGNORE_FILE);
        if path.is_file() {
            filter::load_ignore_file(path)
        } else {
            Ok(Vec::new())
        }
    }

    fn handle_command(&self, cmd: &Commands) -> Result<()> {
        match cmd {
            Commands::Init => {
                let path = Settings::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Commands::Config => {
                let profile = &self.settings.profile;
                println!("Provider: {}", profile.provider);
                println!("Model: {}", profile.model);
                if let Some(ref host) = profile.host {
                    println!("Host: {host}");
                }
                println!(
                    "API key: {}",
                    if profile.api_key.is_some() {
                        "configured"
                    } else {
                        "not set"
                    }
                );
                println!(
                    "Context size: {}",
                    match profile.options.num_ctx {
                        Some(n) if n > 0 => n.to_string(),
                        _ => "auto".into(),
                    }
                );
                if let Some(t) = profile.options.temperature {
                    println!("Temperature: {t}");
                }
                if let Some(m) = profile.options.max_tokens {
                    println!("Max tokens: {m}");
                }
                println!();
                println!("[emoji]");
                println!("  enabled: {}", self.settings.emoji.enabled);
                println!("  convention: {}", self.settings.emoji.emoji_convention);
                if let Some(ref context) = self.settings.context {
                    println!();
                    println!("[context]");
                    if let Some(ref name) = context.project_name {
                        println!("  project_name: {name}");
                    }
                    if let Some(ref language) = context.project_language {
                        println!("  project_language: {language}");
                    }
                }
                Ok(())
            }
        }
    }
}
