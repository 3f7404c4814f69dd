/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Document parser.
//!
//! Documents are split recursively. The first balanced `{...}` span becomes a
//! directive node, the text before it becomes a text node and the text after
//! it is parsed the same way. Directive interiors are split into clauses, and
//! each clause body is parsed again as a document.
//!
//! Directive syntax:
//!
//! - Branch: `{cond:body|-cond:body|-default}`
//! - Filter: `{@name:{...}}` or `{@name(param|-param):{...}}`

use std::collections::BTreeSet;
use std::fmt;

use crate::ast::{Branch, Clause, Node, referenced_tags};
use crate::braces::{CLOSE_BRACE, Span, outer_braces, outer_curly_braces};
use crate::condition::Condition;
use crate::config::TranslateOptions;
use crate::debug::highlight_span;
use crate::error::{TranslateError, TranslateResult};
use crate::escape::{CLAUSE_SEPARATOR, CONDITION_SEPARATOR, find_unnested, split_unnested};
use crate::whitespace::squash_whitespace;

/// Marks a directive as a filter.
pub const FILTER_SIGIL: char = '@';

/// A parsed document ready for expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
}

impl Document {
    /// Parse a document with default options.
    pub fn parse(text: &str) -> TranslateResult<Self> {
        Self::parse_with_options(text, TranslateOptions::default())
    }

    /// Parse a document.
    ///
    /// # Errors
    /// [`TranslateError::UnbalancedBraces`] for any unbalanced directive and
    /// [`TranslateError::NestingTooDeep`] when directives nest deeper than
    /// `options.max_depth`.
    pub fn parse_with_options(text: &str, options: TranslateOptions) -> TranslateResult<Self> {
        let nodes = Parser { options }.get_blocks(text, 0)?;
        tracing::trace!(nodes = nodes.len(), "parsed document");
        Ok(Document { nodes })
    }

    /// Get the top-level nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// Every tag name any condition in the document refers to.
    pub fn referenced_tags(&self) -> BTreeSet<String> {
        referenced_tags(&self.nodes)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

struct Parser {
    options: TranslateOptions,
}

impl Parser {
    /// Partition `text` into nodes. `depth` is the number of directives
    /// enclosing `text`.
    fn get_blocks(&self, text: &str, depth: usize) -> TranslateResult<Vec<Node>> {
        let mut nodes = Vec::new();
        let mut rest = text;

        loop {
            let Some(span) = outer_curly_braces(rest)? else {
                push_text(&mut nodes, rest);
                return Ok(nodes);
            };
            if self.options.debug {
                tracing::debug!("matched directive:\n{}", highlight_span(rest, span));
            }

            push_text(&mut nodes, &rest[..span.start]);
            nodes.push(self.compile_tag(span.interior(rest), depth + 1)?);
            rest = span.trailing(rest, CLOSE_BRACE);
        }
    }

    /// Compile a directive interior. `depth` is the directive's own nesting
    /// level, starting at 1.
    fn compile_tag(&self, interior: &str, depth: usize) -> TranslateResult<Node> {
        if depth > self.options.max_depth {
            return Err(TranslateError::NestingTooDeep {
                max_depth: self.options.max_depth,
            });
        }

        match filter_head(interior) {
            Some(head) => self.compile_filter(head, depth),
            None => Ok(Node::Branch(self.compile_branch(interior, depth)?)),
        }
    }

    fn compile_filter(&self, head: FilterHead<'_>, depth: usize) -> TranslateResult<Node> {
        let body = self.compile_branch(unwrap_filter_body(head.body), depth)?;
        tracing::trace!(filter = head.name, params = head.params.len(), "compiled filter");
        Ok(Node::filter(head.name, head.params, body))
    }

    fn compile_branch(&self, interior: &str, depth: usize) -> TranslateResult<Branch> {
        let clauses = split_unnested(interior, CLAUSE_SEPARATOR)
            .into_iter()
            .map(|raw| self.compile_clause(raw, depth))
            .collect::<TranslateResult<Vec<_>>>()?;
        tracing::trace!(clauses = clauses.len(), depth, "compiled branch");
        Ok(Branch { clauses })
    }

    /// A clause is `condition:body` when its first line has a colon outside
    /// any nested directive, otherwise the whole clause is an unconditional
    /// body.
    fn compile_clause(&self, raw: &str, depth: usize) -> TranslateResult<Clause> {
        let trimmed = raw.trim_start();
        let first_line = trimmed.split('\n').next().unwrap_or_default();

        let (condition, body) = match find_unnested(first_line, CONDITION_SEPARATOR) {
            Some(colon) => (
                Condition::compile(&trimmed[..colon]),
                &trimmed[colon + CONDITION_SEPARATOR.len_utf8()..],
            ),
            None => (Condition::Always, raw),
        };

        Ok(Clause::new(condition, self.get_blocks(body, depth)?))
    }
}

fn push_text(nodes: &mut Vec<Node>, raw: &str) {
    let content = squash_whitespace(raw);
    if !content.is_empty() {
        nodes.push(Node::text(content));
    }
}

/// The pieces of a `@name(params):body` directive.
#[derive(Debug, PartialEq)]
struct FilterHead<'a> {
    name: &'a str,
    params: Vec<String>,
    body: &'a str,
}

/// Recognise `@identifier`, an optional balanced `(...)` parameter list and a
/// `:`. Anything else is not a filter.
fn filter_head(interior: &str) -> Option<FilterHead<'_>> {
    let rest = interior.strip_prefix(FILTER_SIGIL)?;
    let name_len = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if name_len == 0 {
        return None;
    }
    let (name, mut rest) = rest.split_at(name_len);

    let mut params = Vec::new();
    if rest.starts_with('(') {
        let span = outer_braces(rest, '(', ')').ok().flatten()?;
        params = span
            .interior(rest)
            .split(CLAUSE_SEPARATOR)
            .map(str::to_string)
            .collect();
        rest = span.trailing(rest, ')');
    }

    let body = rest.strip_prefix(CONDITION_SEPARATOR)?;
    Some(FilterHead { name, params, body })
}

/// Strip one `{...}` or `[...]` pair wrapping the whole filter body.
fn unwrap_filter_body(body: &str) -> &str {
    let body = body.trim();
    for (opener, closer) in [('{', '}'), ('[', ']')] {
        if !body.starts_with(opener) {
            continue;
        }
        if let Ok(Some(span @ Span { start: 0, .. })) = outer_braces(body, opener, closer) {
            if span.end + closer.len_utf8() == body.len() {
                return span.interior(body);
            }
        }
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blocks(text: &str) -> Vec<Node> {
        Document::parse(text).unwrap().into_nodes()
    }

    fn text(content: &str) -> Node {
        Node::text(content)
    }

    fn when(condition: &str, body: Vec<Node>) -> Clause {
        Clause::new(Condition::compile(condition), body)
    }

    fn always(body: Vec<Node>) -> Clause {
        Clause::new(Condition::Always, body)
    }

    fn not_bar_branch() -> Node {
        Node::branch(vec![
            when("!bar", vec![text("not bar")]),
            always(vec![text("bar")]),
        ])
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(blocks("  just\n  text  "), vec![text("just text")]);
        assert_eq!(blocks("\n\n   \n"), vec![]);
        assert_eq!(blocks(""), vec![]);
    }

    #[test]
    fn test_simple_compile() {
        assert_eq!(blocks("{!bar:not bar|-bar}"), vec![not_bar_branch()]);
    }

    #[test]
    fn test_compile_leading() {
        assert_eq!(
            blocks("leading {!bar:not bar|-bar}"),
            vec![text("leading"), not_bar_branch()]
        );
    }

    #[test]
    fn test_compile_trailing() {
        assert_eq!(
            blocks("{!bar:not bar|-bar}, trailing"),
            vec![not_bar_branch(), text(", trailing")]
        );
    }

    #[test]
    fn test_compile_compound() {
        assert_eq!(
            blocks("{bar;foo,bar:not bar|-bar}, trailing"),
            vec![
                Node::branch(vec![
                    when("bar;foo,bar", vec![text("not bar")]),
                    always(vec![text("bar")]),
                ]),
                text(", trailing"),
            ]
        );
    }

    #[test]
    fn test_compile_multiple_branches() {
        assert_eq!(
            blocks("leading {!bar:not bar|-bar}, trailing {foo:bar}"),
            vec![
                text("leading"),
                not_bar_branch(),
                text(", trailing"),
                Node::branch(vec![when("foo", vec![text("bar")])]),
            ]
        );
    }

    #[test]
    fn test_compile_squash_whitespace() {
        let source = "
        {bizz:Bizz
        |-
            {foo:(P3)But this is part of the previous paragraph.}
        }
        ";
        assert_eq!(
            blocks(source),
            vec![Node::branch(vec![
                when("bizz", vec![text("Bizz")]),
                always(vec![Node::branch(vec![when(
                    "foo",
                    vec![text("(P3)But this is part of the previous paragraph.")]
                )])]),
            ])]
        );
    }

    #[test]
    fn test_compile_clauses_multiline() {
        let source = "
        {
            foo:Hello,
                this is a nested clause.
                It has a colon: because why not?  And a semicolon; because those are cool, too.
            |-bar:
                It's formatted oddly for some reason, but should still work.

                It's got a colon: because colons are cool.
            |-
                This clause's condition is always True.

                There's a colon here: because colons should be allowed in text.
        }";
        assert_eq!(
            blocks(source),
            vec![Node::branch(vec![
                when(
                    "foo",
                    vec![text(
                        "Hello, this is a nested clause. It has a colon: because why not?  \
                         And a semicolon; because those are cool, too."
                    )]
                ),
                when(
                    "bar",
                    vec![text(
                        "It's formatted oddly for some reason, but should still work.\n\n\
                         It's got a colon: because colons are cool."
                    )]
                ),
                always(vec![text(
                    "This clause's condition is always True.\n\n\
                     There's a colon here: because colons should be allowed in text."
                )]),
            ])]
        );
    }

    #[test]
    fn test_nested_colon_does_not_become_condition() {
        assert_eq!(
            blocks("{x:{y:inner} outer|-{z:other}}"),
            vec![Node::branch(vec![
                when(
                    "x",
                    vec![
                        Node::branch(vec![when("y", vec![text("inner")])]),
                        text("outer"),
                    ]
                ),
                always(vec![Node::branch(vec![when("z", vec![text("other")])])]),
            ])]
        );
    }

    #[test]
    fn test_compile_filter() {
        let expected = vec![Node::filter(
            "list",
            vec![],
            Branch {
                clauses: vec![
                    when("foo", vec![text("foo")]),
                    when("bar", vec![text("bar")]),
                    when("bizz", vec![text("bizz")]),
                    always(vec![text("bazz")]),
                ],
            },
        )];
        assert_eq!(blocks("{@list:{foo:foo|-bar:bar|-bizz:bizz|-bazz}}"), expected);
        assert_eq!(blocks("{@list:[foo:foo|-bar:bar|-bizz:bizz|-bazz]}"), expected);
        assert_eq!(blocks("{@list: foo:foo|-bar:bar|-bizz:bizz|-bazz}"), expected);
    }

    #[test]
    fn test_compile_filter_params() {
        let nodes = blocks("{@join(/):{foo:foo|-bazz}}");
        let Node::Filter(filter) = &nodes[0] else {
            panic!("expected a filter, got {:?}", nodes[0]);
        };
        assert_eq!(filter.name, "join");
        assert_eq!(filter.params, vec!["/".to_string()]);
        assert_eq!(filter.body.clauses.len(), 2);
    }

    #[test]
    fn test_filter_params_may_contain_syntax() {
        let head = filter_head("@join(: |-{x}):{a:1}").unwrap();
        assert_eq!(
            head,
            FilterHead {
                name: "join",
                params: vec![": ".to_string(), "{x}".to_string()],
                body: "{a:1}",
            }
        );
    }

    #[test]
    fn test_not_a_filter() {
        assert_eq!(filter_head("foo:bar"), None);
        assert_eq!(filter_head("@:bar"), None);
        assert_eq!(filter_head("@list bar"), None);
        assert_eq!(filter_head("@join(/:bar"), None);
        // Falls back to a branch whose condition is "@list bar".
        assert_eq!(
            blocks("{@list bar:x}"),
            vec![Node::branch(vec![when("@list bar", vec![text("x")])])]
        );
    }

    #[test]
    fn test_unwrap_filter_body() {
        assert_eq!(unwrap_filter_body(" {a:1|-b} "), "a:1|-b");
        assert_eq!(unwrap_filter_body("[a:1]"), "a:1");
        assert_eq!(unwrap_filter_body("{a:1} and {b:2}"), "{a:1} and {b:2}");
        assert_eq!(unwrap_filter_body("a:1|-b"), "a:1|-b");
    }

    #[test]
    fn test_unbalanced_is_an_error() {
        assert!(matches!(
            Document::parse("leading {foo:bar"),
            Err(TranslateError::UnbalancedBraces { .. })
        ));
        assert!(matches!(
            Document::parse("{foo:bar} trailing }"),
            Err(TranslateError::UnbalancedBraces { .. })
        ));
    }

    #[test]
    fn test_max_depth() {
        let options = TranslateOptions::default().with_max_depth(2);
        assert!(Document::parse_with_options("{a:{b:x}}", options).is_ok());
        assert_eq!(
            Document::parse_with_options("{a:{b:{c:x}}}", options),
            Err(TranslateError::NestingTooDeep { max_depth: 2 })
        );
        // Siblings do not count towards depth.
        assert!(Document::parse_with_options("{a:x}{b:y}{c:z}", options).is_ok());
    }

    #[test]
    fn test_debug_does_not_change_ast() {
        let source = "leading {!bar:not bar|-bar}, trailing";
        let plain = Document::parse(source).unwrap();
        let debug =
            Document::parse_with_options(source, TranslateOptions::default().with_debug(true))
                .unwrap();
        assert_eq!(plain, debug);
    }

    #[test]
    fn test_referenced_tags() {
        let document = Document::parse("{foo:{bar:{!bizz:buzz{bazz:hello}}}}").unwrap();
        let tags: Vec<String> = document.referenced_tags().into_iter().collect();
        assert_eq!(tags, vec!["bar", "bazz", "bizz", "foo"]);
    }
}
