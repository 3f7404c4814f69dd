/*
 * translator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The translation facade.

use std::collections::BTreeSet;

use crate::config::TranslateOptions;
use crate::context::TagSet;
use crate::error::TranslateResult;
use crate::parser::Document;

/// Translates documents for a fixed set of active tags.
///
/// Tags are added up front with [`Translator::add_tags`]; translation itself
/// never changes them.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    tags: TagSet,
    options: TranslateOptions,
}

impl Translator {
    /// Create a translator with no active tags and default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TranslateOptions) -> Self {
        Self {
            tags: TagSet::new(),
            options,
        }
    }

    /// Activate tags. Tags that are already active are ignored.
    pub fn add_tags<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags);
        self
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// Parse `text` without expanding it.
    pub fn parse(&self, text: &str) -> TranslateResult<Document> {
        Document::parse_with_options(text, self.options)
    }

    /// Parse and expand `text` for the active tags.
    pub fn translate(&self, text: &str) -> TranslateResult<String> {
        let document = self.parse(text)?;
        if self.options.debug {
            tracing::debug!("compiled document:\n{}", document);
        }
        let output = document.expand(&self.tags)?;
        tracing::debug!(
            nodes = document.nodes().len(),
            tags = self.tags.len(),
            bytes = output.len(),
            "translated document"
        );
        Ok(output)
    }

    /// Every tag the conditions in `text` refer to, whether active or not.
    pub fn referenced_tags(&self, text: &str) -> TranslateResult<BTreeSet<String>> {
        Ok(self.parse(text)?.referenced_tags())
    }
}

/// Translate `text` for the given active tags with default options.
pub fn translate<I, S>(text: &str, tags: I) -> TranslateResult<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut translator = Translator::new();
    translator.add_tags(tags);
    translator.translate(text)
}
