/*
 * translate.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Translate command implementation
 */

//! Translate command implementation.
//!
//! Reads a document from a file or stdin, translates it for the tags given on
//! the command line and writes the result to stdout.

use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::debug;

use i17on_translator::{TranslateOptions, Translator};

/// What to print for the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// The translated document
    Text,
    /// The compiled AST as JSON
    Ast,
    /// Every referenced tag, one per line
    Tags,
}

/// Arguments for the translate command
#[derive(Debug)]
pub struct TranslateArgs {
    /// Explicit input file
    pub input: Option<PathBuf>,
    /// Positional arguments: tags, possibly preceded by the input file
    pub args: Vec<String>,
    /// Log the compiled document and matched directives
    pub debug: bool,
    /// Maximum directive nesting depth
    pub max_depth: usize,
    /// What to print
    pub output: OutputMode,
}

/// Where the document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    File(PathBuf),
    Stdin,
}

/// Execute the translate command
pub fn execute(args: TranslateArgs) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    execute_to(args, &mut stdout)
}

/// Execute the translate command, writing the result to `out`.
pub fn execute_to<W: Write>(args: TranslateArgs, out: &mut W) -> Result<()> {
    let stdin_is_terminal = std::io::stdin().is_terminal();
    let (source, tags) = resolve_source(args.input, args.args, stdin_is_terminal)?;
    debug!(?source, ?tags, "resolved input");

    let text = match &source {
        Source::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        Source::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read document from stdin")?;
            text
        }
    };

    let options = TranslateOptions::new()
        .with_debug(args.debug)
        .with_max_depth(args.max_depth);
    let output = render(&text, tags, options, args.output)?;

    out.write_all(output.as_bytes())
        .context("Failed to write output")?;
    out.flush().context("Failed to write output")?;
    Ok(())
}

/// Pick the input source. Without `--input`, piped stdin wins; otherwise the
/// first positional argument names the file and the rest are tags.
fn resolve_source(
    input: Option<PathBuf>,
    mut args: Vec<String>,
    stdin_is_terminal: bool,
) -> Result<(Source, Vec<String>)> {
    if let Some(path) = input {
        return Ok((Source::File(path), args));
    }
    if !stdin_is_terminal {
        return Ok((Source::Stdin, args));
    }
    if args.is_empty() {
        bail!("No input document: pass a file path or pipe a document on stdin");
    }
    let path = PathBuf::from(args.remove(0));
    Ok((Source::File(path), args))
}

/// Produce the command output for a document.
fn render(text: &str, tags: Vec<String>, options: TranslateOptions, mode: OutputMode) -> Result<String> {
    let mut translator = Translator::with_options(options);
    translator.add_tags(tags);

    match mode {
        OutputMode::Text => translator
            .translate(text)
            .context("Failed to translate document"),
        OutputMode::Ast => {
            let document = translator.parse(text).context("Failed to parse document")?;
            let mut json = serde_json::to_string_pretty(document.nodes())
                .context("Failed to serialize document")?;
            json.push('\n');
            Ok(json)
        }
        OutputMode::Tags => {
            let tags = translator
                .referenced_tags(text)
                .context("Failed to parse document")?;
            Ok(tags.into_iter().map(|tag| tag + "\n").collect())
        }
    }
}
