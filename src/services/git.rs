// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use tokio::process::Command;

use crate::error::{Error, Result};

pub struct GitService;

impl GitService {
    /// Diff of the staged changes, with rename detection.
    pub async fn staged_diff() -> Result<String> {
        let output = Command::new("git")
            .args(["diff", "--staged", "-M"])
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not a git repository") {
                return Err(Error::NotAGitRepo);
            }
            return Err(Error::Git(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
