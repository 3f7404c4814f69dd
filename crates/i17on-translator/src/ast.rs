/*
 * ast.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Document AST types.
//!
//! A parsed document is a flat sequence of [`Node`]s. Directive nodes own the
//! clause bodies nested inside them, so the whole document forms a tree.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::condition::Condition;

/// A node in the document AST.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    /// Literal, already whitespace-normalized text.
    Text(Text),

    /// First-match-wins alternative: `{cond:...|-cond:...|-default}`
    Branch(Branch),

    /// Aggregation over every matching clause: `{@name(params):{...}}`
    Filter(Filter),
}

/// Literal text node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub content: String,
}

/// An ordered list of conditional clauses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    pub clauses: Vec<Clause>,
}

/// A named filter applied to the bodies of all matching clauses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    /// Filter name (e.g. `list`, `join`).
    pub name: String,
    /// Parameters from the `(a|-b)` list; empty when there was none.
    pub params: Vec<String>,
    /// The clauses whose bodies are collected.
    pub body: Branch,
}

/// A condition together with the nodes it guards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clause {
    pub condition: Condition,
    pub body: Vec<Node>,
}

impl Node {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(Text {
            content: content.into(),
        })
    }

    /// Create a branch node from its clauses.
    pub fn branch(clauses: Vec<Clause>) -> Self {
        Node::Branch(Branch { clauses })
    }

    /// Create a filter node.
    pub fn filter(name: impl Into<String>, params: Vec<String>, body: Branch) -> Self {
        Node::Filter(Filter {
            name: name.into(),
            params,
            body,
        })
    }

    /// Clauses held by this node (none for text).
    pub fn clauses(&self) -> &[Clause] {
        match self {
            Node::Text(_) => &[],
            Node::Branch(branch) => &branch.clauses,
            Node::Filter(filter) => &filter.body.clauses,
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "    ".repeat(indent);
        match self {
            Node::Text(Text { content }) => writeln!(f, "{}TEXT {:?}", pad, content),
            Node::Branch(branch) => {
                writeln!(f, "{}BRANCH", pad)?;
                write_clauses(f, &branch.clauses, indent + 1)
            }
            Node::Filter(Filter { name, params, body }) => {
                writeln!(f, "{}FILTER {} {:?}", pad, name, params)?;
                write_clauses(f, &body.clauses, indent + 1)
            }
        }
    }
}

impl Clause {
    pub fn new(condition: Condition, body: Vec<Node>) -> Self {
        Self { condition, body }
    }
}

fn write_clauses(f: &mut fmt::Formatter<'_>, clauses: &[Clause], indent: usize) -> fmt::Result {
    let pad = "    ".repeat(indent);
    for clause in clauses {
        writeln!(f, "{}WHEN {}", pad, clause.condition)?;
        for node in &clause.body {
            node.write_tree(f, indent + 1)?;
        }
    }
    Ok(())
}

/// Indented tree rendering, one node or clause per line.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// Collect every tag name mentioned by a condition anywhere under `nodes`.
pub fn referenced_tags(nodes: &[Node]) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    collect_tags(nodes, &mut tags);
    tags
}

fn collect_tags(nodes: &[Node], tags: &mut BTreeSet<String>) {
    for node in nodes {
        for clause in node.clauses() {
            tags.extend(
                clause
                    .condition
                    .atoms()
                    .map(|atom| atom.tag())
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string),
            );
            collect_tags(&clause.body, tags);
        }
    }
}
