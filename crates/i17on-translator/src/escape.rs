/*
 * escape.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Nesting-aware scanning of directive interiors.
//!
//! A directive body may itself contain directives, and their `|-` separators
//! and `:` condition markers belong to the inner directive. Instead of hiding
//! those characters behind placeholders and restoring them afterwards, the
//! scanners here track `{`/`}` depth and only recognise syntax at depth 0.

use crate::braces::{CLOSE_BRACE, OPEN_BRACE};

/// Separator between the clauses of a branch and between filter parameters.
pub const CLAUSE_SEPARATOR: &str = "|-";

/// Separator between a clause condition and its body.
pub const CONDITION_SEPARATOR: char = ':';

/// Walks `text` calling `visit(offset, rest)` for every character outside any
/// brace pair. `visit` returns how many bytes to consume, or `None` for the
/// current character only.
fn scan_unnested(text: &str, mut visit: impl FnMut(usize, &str) -> Option<usize>) {
    let mut depth = 0usize;
    let mut offset = 0;

    while let Some(c) = text[offset..].chars().next() {
        if c == OPEN_BRACE {
            depth += 1;
        } else if c == CLOSE_BRACE {
            depth = depth.saturating_sub(1);
        } else if depth == 0 {
            if let Some(consumed) = visit(offset, &text[offset..]) {
                offset += consumed.max(c.len_utf8());
                continue;
            }
        }
        offset += c.len_utf8();
    }
}

/// Byte offset of the first `needle` that is not inside a nested `{...}`.
pub fn find_unnested(text: &str, needle: char) -> Option<usize> {
    let mut found = None;
    scan_unnested(text, |offset, rest| {
        if found.is_none() && rest.starts_with(needle) {
            found = Some(offset);
        }
        None
    });
    found
}

/// Split `text` on every `separator` that is not inside a nested `{...}`.
///
/// Always yields at least one piece, like [`str::split`].
pub fn split_unnested<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut piece_start = 0;

    scan_unnested(text, |offset, rest| {
        if !separator.is_empty() && rest.starts_with(separator) {
            pieces.push(&text[piece_start..offset]);
            piece_start = offset + separator.len();
            Some(separator.len())
        } else {
            None
        }
    });

    pieces.push(&text[piece_start..]);
    pieces
}
