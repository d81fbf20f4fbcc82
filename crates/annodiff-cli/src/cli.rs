use std::path::PathBuf;

use annodiff_diff::WordBreakKind;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "annodiff",
    about = "annodiff: structural diff for annotated documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum WordBreakArg {
    Unicode,
    Element,
}

impl From<WordBreakArg> for WordBreakKind {
    fn from(arg: WordBreakArg) -> Self {
        match arg {
            WordBreakArg::Unicode => WordBreakKind::Unicode,
            WordBreakArg::Element => WordBreakKind::Element,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the changes between two documents
    Diff(DiffArgs),
    /// Summarize and validate a document
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Print the minimal edit script without cleaning it
    #[arg(long)]
    pub raw: bool,
    /// TOML file with diff settings
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub word_break: Option<WordBreakArg>,
    #[arg(long)]
    pub max_elements: Option<usize>,
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Args)]
pub struct InspectArgs {
    pub doc: PathBuf,
}
