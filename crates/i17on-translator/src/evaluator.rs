/*
 * evaluator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Document expansion.
//!
//! Expansion walks the AST depth-first against an active tag set. Branches
//! take the first clause whose condition holds; filters take every such
//! clause and hand the expanded bodies to a built-in filter.

use crate::ast::{Branch, Filter, Node, Text};
use crate::context::TagSet;
use crate::error::TranslateResult;
use crate::filters;
use crate::parser::Document;

impl Document {
    /// Expand this document for the given tags.
    ///
    /// # Errors
    /// [`TranslateError::UnknownFilter`](crate::TranslateError::UnknownFilter)
    /// when a filter with matching clauses has no handler, or whatever the
    /// filter reports.
    pub fn expand(&self, tags: &TagSet) -> TranslateResult<String> {
        expand_tree(&self.nodes, tags)
    }
}

/// Expand a node sequence, dropping empty fragments and putting a single
/// space between fragments that would otherwise run two words together.
pub fn expand_tree(nodes: &[Node], tags: &TagSet) -> TranslateResult<String> {
    let mut output = String::new();
    for node in nodes {
        let Some(fragment) = expand_node(node, tags)? else {
            continue;
        };
        if needs_space(&output, &fragment) {
            output.push(' ');
        }
        output.push_str(&fragment);
    }
    Ok(output)
}

/// Expand a single node. `None` means the node produced nothing.
pub fn expand_node(node: &Node, tags: &TagSet) -> TranslateResult<Option<String>> {
    let text = match node {
        Node::Text(Text { content }) => content.clone(),
        Node::Branch(branch) => expand_branch(branch, tags)?,
        Node::Filter(filter) => expand_filter(filter, tags)?,
    };
    Ok((!text.is_empty()).then_some(text))
}

fn expand_branch(branch: &Branch, tags: &TagSet) -> TranslateResult<String> {
    match branch
        .clauses
        .iter()
        .find(|clause| clause.condition.evaluate(tags))
    {
        Some(clause) => expand_tree(&clause.body, tags),
        None => Ok(String::new()),
    }
}

fn expand_filter(filter: &Filter, tags: &TagSet) -> TranslateResult<String> {
    let matched = filter
        .body
        .clauses
        .iter()
        .filter(|clause| clause.condition.evaluate(tags))
        .map(|clause| expand_tree(&clause.body, tags))
        .collect::<TranslateResult<Vec<_>>>()?;

    if matched.is_empty() {
        return Ok(String::new());
    }
    tracing::trace!(filter = %filter.name, items = matched.len(), "applying filter");
    filters::apply(&filter.name, &filter.params, matched)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Characters that end a word or sentence.
fn ends_word(c: char) -> bool {
    is_word_char(c) || matches!(c, '.' | '!' | '?' | ',' | '(' | ')' | '*' | '#')
}

/// Characters that may start a word.
fn starts_word(c: char) -> bool {
    is_word_char(c) || matches!(c, '(' | ')' | '_' | '*' | '#')
}

fn needs_space(output: &str, fragment: &str) -> bool {
    match (output.chars().next_back(), fragment.chars().next()) {
        (Some(last), Some(first)) => ends_word(last) && starts_word(first),
        _ => false,
    }
}
