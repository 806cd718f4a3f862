// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

pub mod clues;
pub mod context;
pub mod profile;

pub use clues::{Clue, ClueSet};
pub use context::{EmojiConfig, EmojiSteps, ProjectContext};
pub use profile::{HostedOptions, ModelOptions, ModelProfile, Provider};
