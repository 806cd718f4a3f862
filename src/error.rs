// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("No staged changes found")]
    #[diagnostic(
        code(commitcraft::git::no_staged),
        help("Stage files with: git add <files>")
    )]
    NoStagedChanges,

    #[error("Not a git repository")]
    #[diagnostic(
        code(commitcraft::git::not_repo),
        help("Run this command inside a git repository")
    )]
    NotAGitRepo,

    #[error("Git error: {0}")]
    #[diagnostic(code(commitcraft::git::error))]
    Git(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(commitcraft::config::error))]
    Config(String),

    #[error("Unsupported provider '{0}'")]
    #[diagnostic(
        code(commitcraft::provider::unsupported),
        help(
            "Supported providers: ollama, openai, google, groq, custom_openai_compatible, or a [providers.*] nickname"
        )
    )]
    UnsupportedProvider(String),

    #[error("Template '{template}' error: {message}")]
    #[diagnostic(code(commitcraft::prompt::template))]
    Template { template: String, message: String },

    #[error("Provider '{provider}' error: {message}")]
    #[diagnostic(code(commitcraft::provider::error))]
    Provider { provider: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
