/*
 * condition.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Clause conditions.
//!
//! A condition is written in disjunctive normal form: `;` separates
//! alternatives, `,` joins the tags that must hold together and `!` negates a
//! tag. For example `foo,!bar;bizz` reads "foo and not bar, or bizz".

use std::fmt;

use serde::Serialize;

use crate::context::TagSet;

/// Separator between alternative groups (OR).
pub const OR_SEPARATOR: char = ';';
/// Separator between tags within a group (AND).
pub const AND_SEPARATOR: char = ',';
/// Prefix negating a tag.
pub const NEGATION: char = '!';

/// A single signed tag test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "tag")]
pub enum TagAtom {
    /// Satisfied when the tag is active.
    Present(String),
    /// Satisfied when the tag is not active.
    Absent(String),
}

impl TagAtom {
    /// Parse `tag` or `!tag`.
    pub fn parse(atom: &str) -> Self {
        let atom = atom.trim();
        match atom.strip_prefix(NEGATION) {
            Some(tag) => TagAtom::Absent(tag.to_string()),
            None => TagAtom::Present(atom.to_string()),
        }
    }

    /// The tag name, without any negation.
    pub fn tag(&self) -> &str {
        match self {
            TagAtom::Present(tag) | TagAtom::Absent(tag) => tag,
        }
    }

    pub fn is_satisfied(&self, tags: &TagSet) -> bool {
        match self {
            TagAtom::Present(tag) => tags.contains(tag),
            TagAtom::Absent(tag) => !tags.contains(tag),
        }
    }
}

impl fmt::Display for TagAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagAtom::Present(tag) => write!(f, "{}", tag),
            TagAtom::Absent(tag) => write!(f, "{}{}", NEGATION, tag),
        }
    }
}

/// The condition guarding a clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Condition {
    /// Unconditional (default) clause.
    Always,
    /// OR across groups, AND within each group.
    AnyOf(Vec<Vec<TagAtom>>),
}

impl Condition {
    /// Compile a condition expression such as `foo,!bar;bizz`.
    ///
    /// Syntax is not validated: empty atoms are kept as-is and simply never
    /// match a present-tag test.
    pub fn compile(expression: &str) -> Self {
        let groups = expression
            .trim()
            .split(OR_SEPARATOR)
            .map(|group| group.split(AND_SEPARATOR).map(TagAtom::parse).collect())
            .collect();
        Condition::AnyOf(groups)
    }

    /// Test the condition against the active tags.
    pub fn evaluate(&self, tags: &TagSet) -> bool {
        match self {
            Condition::Always => true,
            Condition::AnyOf(groups) => groups
                .iter()
                .any(|group| group.iter().all(|atom| atom.is_satisfied(tags))),
        }
    }

    /// Every atom of the condition, in source order.
    pub fn atoms(&self) -> impl Iterator<Item = &TagAtom> {
        let groups: &[Vec<TagAtom>] = match self {
            Condition::Always => &[],
            Condition::AnyOf(groups) => groups,
        };
        groups.iter().flatten()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Always => write!(f, "*"),
            Condition::AnyOf(groups) => {
                for (i, group) in groups.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", OR_SEPARATOR)?;
                    }
                    for (j, atom) in group.iter().enumerate() {
                        if j > 0 {
                            write!(f, "{}", AND_SEPARATOR)?;
                        }
                        write!(f, "{}", atom)?;
                    }
                }
                Ok(())
            }
        }
    }
}
