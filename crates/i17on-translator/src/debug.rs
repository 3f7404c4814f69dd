/*
 * debug.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Terminal highlighting for debug output.

use crossterm::style::{StyledContent, Stylize};

use crate::braces::Span;

fn highlight(c: char) -> StyledContent<char> {
    c.bold().cyan()
}

/// Render `text` with the two delimiters of `span` highlighted.
///
/// Single-line text also gets a caret line underneath pointing at them.
pub fn highlight_span(text: &str, span: Span) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    for (offset, c) in text.char_indices() {
        if offset == span.start || offset == span.end {
            out.push_str(&highlight(c).to_string());
        } else {
            out.push(c);
        }
    }

    if !text.contains('\n') {
        out.push('\n');
        let mut column = 0;
        for (index, (offset, _)) in text.char_indices().enumerate() {
            if offset == span.start || offset == span.end {
                out.push_str(&" ".repeat(index - column));
                out.push_str(&highlight('^').to_string());
                column = index + 1;
            }
        }
    }
    out
}
