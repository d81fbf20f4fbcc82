use std::path::Path;

use annodiff_diff::{Diff, DiffConfig, DiffOp, DiffSession, DiffStats};
use annodiff_store::{Sequence, StoreResult};
use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::cli::*;
use crate::input::{load_config, load_document};
use crate::render;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args, cli.format),
        Command::Inspect(args) => cmd_inspect(args, cli.format),
    }
}

#[derive(Serialize)]
struct DiffReport<'a> {
    raw: bool,
    stats: DiffStats,
    ops: &'a [DiffOp],
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = diff_config(&args)?;
    let diff = diff_files(&args.old, &args.new, config, args.raw)?;
    let stats = diff.stats();

    match format {
        OutputFormat::Json => {
            let report = DiffReport {
                raw: args.raw,
                stats,
                ops: &diff.ops,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            if diff.is_identity() {
                println!("{}", "No changes.".green());
            } else {
                println!("{}", render::render_diff(&diff));
                println!("{}", render::render_stats(&stats).dimmed());
            }
        }
    }
    Ok(())
}

/// Settings from `--config` (or the defaults) with command-line overrides.
fn diff_config(args: &DiffArgs) -> anyhow::Result<DiffConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => DiffConfig::default(),
    };
    if let Some(word_break) = args.word_break {
        config.word_break = word_break.into();
    }
    if let Some(limit) = args.max_elements {
        config.max_elements = Some(limit);
    }
    if let Some(timeout) = args.timeout_ms {
        config.timeout_ms = Some(timeout);
    }
    debug!(?config, "diff config resolved");
    Ok(config)
}

fn load_valid(path: &Path) -> anyhow::Result<Sequence> {
    let sequence = load_document(path)?;
    check_document(&sequence).with_context(|| format!("invalid document {}", path.display()))?;
    Ok(sequence)
}

/// Stored annotations must hash to their keys and the structure must nest.
fn check_document(sequence: &Sequence) -> StoreResult<()> {
    sequence.store.verify()?;
    sequence.validate()
}

fn diff_files(old: &Path, new: &Path, config: DiffConfig, raw: bool) -> anyhow::Result<Diff> {
    let old = load_valid(old)?;
    let new = load_valid(new)?;
    let session = DiffSession::new(&old.store, &new.store, config)
        .context("annotation stores cannot be merged")?;
    let diff = if raw {
        Diff::new(session.raw_diff(&old.elements, &new.elements)?)
    } else {
        session.diff(&old.elements, &new.elements)?
    };
    Ok(diff)
}

#[derive(Serialize)]
struct InspectReport {
    elements: usize,
    text: String,
    annotations: usize,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn cmd_inspect(args: InspectArgs, format: OutputFormat) -> anyhow::Result<()> {
    let sequence = load_document(&args.doc)?;
    let validation = check_document(&sequence);

    match format {
        OutputFormat::Json => {
            let report = InspectReport {
                elements: sequence.len(),
                text: sequence.text(),
                annotations: sequence.store.len(),
                valid: validation.is_ok(),
                error: validation.as_ref().err().map(ToString::to_string),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            print!("{}", render::render_summary(&sequence));
            match &validation {
                Ok(()) => println!("{} Document is valid", "✓".green().bold()),
                Err(e) => println!("{} {}", "✗".red().bold(), e),
            }
        }
    }
    Ok(())
}
