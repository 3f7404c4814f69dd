/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Conditional-content translation for audience-tagged documents.
//!
//! A single source document carries inline directives, and translating it for
//! a set of active tags keeps only the text meant for that audience:
//!
//! - Branches: `{foo:text for foo|-bar,!baz:text for bar without baz|-default}`
//! - Conditions: `,` for AND, `;` for OR, `!` for NOT
//! - Filters over every matching clause: `{@list:{...}}`, `{@join(/):{...}}`
//! - Directives nest freely; literal text is whitespace-squashed so that
//!   directives can be indented like code without affecting Markdown output.
//!
//! # Example
//!
//! ```ignore
//! use i17on_translator::translate;
//!
//! let output = translate("{@list:{foo:foo|-bar:bar|-bizz}}", ["foo", "bar"])?;
//! assert_eq!(output, "foo, bar, and bizz");
//! ```

pub mod ast;
pub mod braces;
pub mod condition;
pub mod config;
pub mod context;
pub mod debug;
pub mod error;
pub mod escape;
pub mod evaluator;
pub mod filters;
pub mod parser;
pub mod translator;
pub mod whitespace;

// Re-export main types at crate root
pub use ast::{Branch, Clause, Filter, Node, Text};
pub use condition::{Condition, TagAtom};
pub use config::TranslateOptions;
pub use context::TagSet;
pub use error::{TranslateError, TranslateResult};
pub use parser::Document;
pub use translator::{Translator, translate};
pub use whitespace::squash_whitespace;
