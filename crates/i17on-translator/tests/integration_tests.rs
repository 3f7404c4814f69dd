/*
 * integration_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for i17on-translator using test fixtures.
 */

use i17on_translator::{Document, TranslateOptions, Translator, squash_whitespace, translate};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::path::Path;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> std::path::PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Helper to load a fixture document
fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

fn translate_fixture(name: &str, tags: &[&str]) -> String {
    translate(&load_fixture(name), tags.iter().copied()).unwrap()
}

#[test]
fn test_paragraphs_default_clause() {
    let result = translate_fixture("paragraphs.md", &[]);
    assert_eq!(
        result,
        "Some leading text.\n\n\
         This is the default with no conditions.\n\n\
         It's got internal tabs but we just ignore them.\n\n\
         TODO: explicit syntax for code embeds!\n\n\
         Some trailing text."
    );
}

#[test]
fn test_paragraphs_nested_branch_joins_paragraph() {
    let result = translate_fixture("paragraphs.md", &["foo"]);
    assert_eq!(
        result,
        "Some leading text.\n\n\
         (P1)Hello this is some text, it's got some trailing space \
         and it indents to its base indent level when a new line is \
         found. but it also has multiple paragraphs, so double \
         linebreaks should be preserved.\n\n\
         (P2)This is a second paragraph. (P2)This is a nested branch, \
         same rules.  This will show up as part of the previous paragraph.\n\n\
         Some trailing text."
    );
}

#[test]
fn test_paragraphs_outer_clause_only() {
    let result = translate_fixture("paragraphs.md", &["bar"]);
    assert_eq!(
        result,
        "Some leading text.\n\n\
         (P1)Hello this is some text, it's got some trailing space \
         and it indents to its base indent level when a new line is \
         found. but it also has multiple paragraphs, so double \
         linebreaks should be preserved.\n\n\
         (P2)This is a second paragraph.\n\n\
         Some trailing text."
    );
}

#[test]
fn test_getting_started_for_unix_users() {
    let result = translate_fixture("getting-started.md", &["mac", "linux"]);
    assert_eq!(
        result,
        "# Getting started\n\n\
         Install the tool for macOS and Linux.\n\n\
         Ask your administrator for access.\n\n\
         Download mac.dmg or linux.tgz to begin."
    );
}

#[test]
fn test_getting_started_for_windows_admins() {
    let result = translate_fixture("getting-started.md", &["windows", "admin"]);
    assert_eq!(
        result,
        "# Getting started\n\n\
         Install the tool for Windows.\n\n\
         As an administrator, you can also manage users.\n\n\
         Download win.exe to begin."
    );
}

#[test]
fn test_getting_started_referenced_tags() {
    let document = Document::parse(&load_fixture("getting-started.md")).unwrap();
    let tags: Vec<String> = document.referenced_tags().into_iter().collect();
    assert_eq!(tags, vec!["admin", "linux", "mac", "windows"]);
}

#[test]
fn test_fixtures_translate_identically_in_debug_mode() {
    for name in ["paragraphs.md", "getting-started.md"] {
        let source = load_fixture(name);
        let mut plain = Translator::new();
        plain.add_tags(["foo", "mac"]);
        let mut debug = Translator::with_options(TranslateOptions::new().with_debug(true));
        debug.add_tags(["foo", "mac"]);
        assert_eq!(plain.translate(&source), debug.translate(&source), "{}", name);
    }
}

#[test]
fn test_deep_nesting_fails_predictably() {
    let depth = 200;
    let source = format!("{}x{}", "{a:".repeat(depth), "}".repeat(depth));
    let translator = Translator::with_options(TranslateOptions::new().with_max_depth(100));
    assert!(translator.translate(&source).is_err());
}

proptest! {
    #[test]
    fn prop_brace_free_text_translates_to_squashed_text(text in "[a-z .,!?\n]{0,64}") {
        let result = translate(&text, ["foo"]).unwrap();
        prop_assert_eq!(result, squash_whitespace(&text));
    }

    #[test]
    fn prop_translation_is_deterministic(
        tags in proptest::collection::vec("foo|bar|bizz", 0..3)
    ) {
        let source = load_fixture("getting-started.md");
        let first = translate(&source, tags.iter().cloned()).unwrap();
        let second = translate(&source, tags.iter().rev().cloned()).unwrap();
        prop_assert_eq!(first, second);
    }
}
