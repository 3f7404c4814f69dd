/*
 * braces.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Outer delimiter matching.
//!
//! Directive spans may nest, so a span is found by counting openers and
//! closers rather than by looking for the next closer.

use crate::error::{TranslateError, TranslateResult};

/// Default directive opener.
pub const OPEN_BRACE: char = '{';
/// Default directive closer.
pub const CLOSE_BRACE: char = '}';

/// Byte offsets of a matched delimiter pair.
///
/// `start` is the offset of the opener and `end` the offset of its balancing
/// closer, so `&text[start + 1..end]` is the interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// The text strictly between the delimiters.
    pub fn interior<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start + 1..self.end]
    }

    /// The text after the closing delimiter.
    pub fn trailing<'a>(&self, text: &'a str, closer: char) -> &'a str {
        &text[self.end + closer.len_utf8()..]
    }
}

/// Find the first balanced top-level `opener`/`closer` span in `text`.
///
/// Returns `Ok(None)` when neither delimiter occurs at all. A span is reported
/// as soon as the running closer count catches up with a non-zero opener
/// count, so nested pairs are included in the outer span.
///
/// # Errors
/// [`TranslateError::UnbalancedBraces`] when the counts never reconcile. That
/// covers dangling openers, dangling closers and a closer that appears before
/// any opener.
pub fn outer_braces(text: &str, opener: char, closer: char) -> TranslateResult<Option<Span>> {
    if !text.contains(opener) && !text.contains(closer) {
        return Ok(None);
    }

    let mut start = None;
    let mut openings = 0usize;
    let mut closings = 0usize;

    for (cursor, c) in text.char_indices() {
        if c == opener {
            if openings == 0 {
                start = Some(cursor);
            }
            openings += 1;
        } else if c == closer {
            closings += 1;
            if closings > openings {
                break;
            }
        }

        if openings > 0 && openings == closings {
            if let Some(start) = start {
                return Ok(Some(Span { start, end: cursor }));
            }
        }
    }

    Err(TranslateError::UnbalancedBraces {
        text: text.to_string(),
    })
}

/// Find the first balanced `{`/`}` span.
pub fn outer_curly_braces(text: &str) -> TranslateResult<Option<Span>> {
    outer_braces(text, OPEN_BRACE, CLOSE_BRACE)
}
