//! i17on CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use i17on_translator::config::DEFAULT_MAX_DEPTH;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod translate;

#[derive(Debug, Parser)]
#[command(name = "i17on")]
#[command(version)]
#[command(about = "Translate a tagged document for an audience", long_about = None)]
struct Cli {
    /// Input document (defaults to stdin, or the first positional argument
    /// when stdin is a terminal)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Log the compiled document and every matched directive
    #[arg(long)]
    debug: bool,

    /// Print the compiled document as JSON instead of translating it
    #[arg(long, conflicts_with = "list_tags")]
    ast: bool,

    /// Print every tag the document refers to, one per line
    #[arg(long)]
    list_tags: bool,

    /// Maximum directive nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Active tags
    #[arg(value_name = "TAGS")]
    args: Vec<String>,
}

impl From<Cli> for translate::TranslateArgs {
    fn from(cli: Cli) -> Self {
        let output = if cli.ast {
            translate::OutputMode::Ast
        } else if cli.list_tags {
            translate::OutputMode::Tags
        } else {
            translate::OutputMode::Text
        };
        translate::TranslateArgs {
            input: cli.input,
            args: cli.args,
            debug: cli.debug,
            max_depth: cli.max_depth,
            output,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the translated document
    let default_filter = if cli.debug {
        "i17on=debug,i17on_translator=debug"
    } else {
        "i17on=warn,i17on_translator=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    translate::execute(cli.into())
}
