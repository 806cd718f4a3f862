// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

pub mod filter;
pub mod git;
pub mod llm;
pub mod prompt;
