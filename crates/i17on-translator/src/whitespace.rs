/*
 * whitespace.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Whitespace normalization for literal text runs.
//!
//! Documents are written with directives indented like code, so the raw text
//! between directives is full of indentation and hard line wraps. Squashing
//! joins wrapped lines with single spaces and keeps Markdown paragraph breaks
//! (`\n\n`). A single blank line at the very start or end of a run is an
//! artifact of indentation and is not treated as a break.

/// A Markdown paragraph break.
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// Characters that attach to the previous line without a space.
const TERMINAL_PUNCTUATION: [char; 4] = ['.', ',', '?', '!'];

/// One emitted piece of squashed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit<'a> {
    Break,
    Line(&'a str),
    Continuation(&'a str),
}

/// Collapse indentation and line wraps in a raw text run.
///
/// Returns an empty string when nothing but whitespace remains, which callers
/// take to mean "no text node".
pub fn squash_whitespace(raw: &str) -> String {
    let all_lines: Vec<&str> = raw.split('\n').map(str::trim).collect();
    let mut lines: &[&str] = &all_lines;
    let mut units: Vec<Unit<'_>> = Vec::new();

    // A paragraph break at the start takes two blank lines, because the first
    // one comes from indenting the text under its directive.
    if lines.len() > 1 && lines[0].is_empty() {
        if lines.len() > 2 && lines[1].is_empty() {
            units.push(Unit::Break);
            lines = &lines[2..];
        } else {
            lines = &lines[1..];
        }
    }

    for &line in lines {
        let last = units.last().copied();
        if line.is_empty() {
            if last != Some(Unit::Break) {
                units.push(Unit::Break);
            }
        } else if matches!(last, Some(Unit::Line(_) | Unit::Continuation(_)))
            && !line.starts_with(TERMINAL_PUNCTUATION)
        {
            units.push(Unit::Continuation(line));
        } else {
            units.push(Unit::Line(line));
        }
    }

    // Likewise at the end: one trailing blank line is just the newline before
    // the closing brace.
    if units.last() == Some(&Unit::Break) && lines.len() > 1 && !lines[lines.len() - 2].is_empty()
    {
        units.pop();
    }

    let mut output = String::new();
    for unit in units {
        match unit {
            Unit::Break => output.push_str(PARAGRAPH_BREAK),
            Unit::Line(line) => output.push_str(line),
            Unit::Continuation(line) => {
                output.push(' ');
                output.push_str(line);
            }
        }
    }

    if output.trim().is_empty() {
        String::new()
    } else {
        output
    }
}
