/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for document parsing and expansion.

use thiserror::Error;

/// Errors that can occur while translating a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// A directive span whose delimiters never balance.
    #[error("Unbalanced braces: {text}")]
    UnbalancedBraces { text: String },

    /// A filter directive naming a filter that has no handler.
    #[error("Unknown filter: {name}")]
    UnknownFilter { name: String },

    /// A built-in filter was given parameters it cannot use.
    #[error("Invalid parameters for filter '{filter}': {message}")]
    InvalidFilterParams { filter: String, message: String },

    /// Directives nested deeper than the configured limit.
    #[error("Directive nesting exceeds maximum depth of {max_depth}")]
    NestingTooDeep { max_depth: usize },
}

/// Result type for translation operations.
pub type TranslateResult<T> = Result<T, TranslateError>;
