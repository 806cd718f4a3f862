// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Error, Result};

/// Default ignore file, looked up in the working directory.
pub const IGNORE_FILE: &str = ".commitcraftignore";

/// Drops whole file blocks from a unified diff when the target path
/// matches any ignore pattern. Tolerant of malformed input: lines before
/// the first block marker pass through unchanged.
#[derive(Debug)]
pub struct DiffFilter {
    rules: GlobSet,
    is_identity: bool,
}

impl DiffFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                Error::Config(format!("invalid ignore pattern '{pattern}': {e}"))
            })?;
            builder.add(glob);
        }
        let rules = builder
            .build()
            .map_err(|e| Error::Config(format!("invalid ignore patterns: {e}")))?;
        Ok(Self {
            rules,
            is_identity: patterns.is_empty(),
        })
    }

    /// Filter a raw diff, keeping block order and line order of retained
    /// blocks. Idempotent for a fixed rule set.
    pub fn filter(&self, diff: &str) -> String {
        if self.is_identity {
            return diff.to_string();
        }

        let mut out = String::with_capacity(diff.len());
        let mut keep = true;

        for line in diff.lines() {
            if let Some(path) = block_target(line) {
                keep = !self.rules.is_match(path);
            }
            if keep {
                out.push_str(line);
                out.push('\n');
            }
        }

        if !diff.ends_with('\n') && out.ends_with('\n') {
            out.pop();
        }
        out
    }
}

/// Target path of a `diff --git a/<path> b/<path>` marker line, taken
/// from the second reference with its structural prefix stripped.
fn block_target(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("diff --git ")?;
    let target = rest.rsplit(' ').next()?;
    Some(target.strip_prefix("b/").unwrap_or(target))
}

/// Read newline-separated glob patterns, skipping blanks and `#` comments.
pub fn load_ignore_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}
