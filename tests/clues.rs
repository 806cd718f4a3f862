// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use commitcraft::cli::Cli;
use commitcraft::domain::{Clue, ClueSet};

#[test]
fn boolean_true_renders_built_in_label() {
    let clues = ClueSet {
        bug: Some(Clue::Enabled),
        ..Default::default()
    };
    assert_eq!(clues.expand(), vec![("bug", "Bug fix".to_string())]);
}

#[test]
fn free_text_renders_label_prefix() {
    let clues = ClueSet {
        bug: Some(Clue::Text("off-by-one in pagination".into())),
        ..Default::default()
    };
    assert_eq!(
        clues.expand(),
        vec![("bug", "Bug fix: off-by-one in pagination".to_string())]
    );
}

#[test]
fn custom_text_passes_through_unlabelled() {
    let clues = ClueSet {
        custom: Some(Clue::Text("part of the Q3 migration".into())),
        ..Default::default()
    };
    assert_eq!(
        clues.expand(),
        vec![("custom", "part of the Q3 migration".to_string())]
    );
}

#[test]
fn absent_slots_are_omitted_entirely() {
    let clues = ClueSet {
        feat: Some(Clue::Enabled),
        docs: Some(Clue::Text("readme".into())),
        ..Default::default()
    };
    let expanded = clues.expand();
    assert_eq!(expanded.len(), 2);
    assert_eq!(expanded[0], ("feat", "New feature".to_string()));
    assert_eq!(expanded[1], ("docs", "Documentation: readme".to_string()));
}

#[test]
fn bare_custom_flag_carries_no_fragment() {
    let clues = ClueSet {
        custom: Some(Clue::Enabled),
        ..Default::default()
    };
    assert!(clues.expand().is_empty());
}

#[test]
fn empty_set_expands_to_nothing() {
    assert!(ClueSet::default().expand().is_empty());
    assert!(ClueSet::default().is_empty());
}

// ─── CLI flag mapping ────────────────────────────────────────────────────────

#[test]
fn cli_flags_map_to_clue_slots() {
    let cli = Cli {
        bug: Some(String::new()),
        feat: Some("dark mode".into()),
        ..Default::default()
    };
    let clues = cli.clues();
    assert_eq!(clues.bug, Some(Clue::Enabled));
    assert_eq!(clues.feat, Some(Clue::Text("dark mode".into())));
    assert!(clues.docs.is_none());
    assert!(clues.refact.is_none());
    assert!(clues.custom.is_none());
}
