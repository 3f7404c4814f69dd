/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Translation settings.

/// Default limit on directive nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options threaded through parsing and expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Log the compiled AST and every matched brace span.
    ///
    /// Debug output goes through `tracing` and never changes the result.
    pub debug: bool,

    /// Maximum directive nesting depth before parsing fails with
    /// [`TranslateError::NestingTooDeep`](crate::TranslateError::NestingTooDeep).
    pub max_depth: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            debug: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
