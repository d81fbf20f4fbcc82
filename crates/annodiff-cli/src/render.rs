//! Human-readable rendering of diffs and documents.

use std::fmt::Write;

use annodiff_diff::{AnnotationChange, Diff, DiffAction, DiffOp, DiffStats};
use annodiff_store::Sequence;
use annodiff_types::{Annotation, Element};
use colored::Colorize;

/// Inline rendering of a diff: retained text as is, deletions as `[-..-]`,
/// insertions as `{+..+}`, formatting changes in yellow.
pub fn render_diff(diff: &Diff) -> String {
    let mut out = String::new();
    for op in &diff.ops {
        out.push_str(&render_op(op));
    }
    out
}

fn render_op(op: &DiffOp) -> String {
    let body = render_elements(&op.data);
    let rendered = match op.action {
        DiffAction::Retain => body.normal(),
        DiffAction::Delete => format!("[-{body}-]").red(),
        DiffAction::Insert => format!("{{+{body}+}}").green(),
        DiffAction::ChangeDelete => format!("[-{body}-]").yellow(),
        DiffAction::ChangeInsert => format!("{{+{body}+}}").yellow(),
    };
    let mut out = rendered.to_string();
    for change in &op.annotation_changes {
        let _ = write!(out, "{}", format!("(~{}~)", render_change(change)).yellow().dimmed());
    }
    out
}

/// Text with structural markers shown as `<tag>` and `</tag>`.
pub fn render_elements(data: &[Element]) -> String {
    let mut out = String::new();
    for element in data {
        match element {
            Element::Text { ch, .. } => out.push(*ch),
            Element::Open { tag, .. } => {
                let _ = write!(out, "<{tag}>");
            }
            Element::Close { tag } => {
                let _ = write!(out, "</{tag}>");
            }
        }
    }
    out
}

fn render_change(change: &AnnotationChange) -> String {
    format!(
        "{} -> {}",
        render_annotation(&change.old),
        render_annotation(&change.new)
    )
}

/// `name key=value ...`, with JSON-formatted values.
pub fn render_annotation(annotation: &Annotation) -> String {
    let mut out = annotation.name.clone();
    for (key, value) in &annotation.attributes {
        let _ = write!(out, " {key}={value}");
    }
    out
}

pub fn render_stats(stats: &DiffStats) -> String {
    format!(
        "{} retained, {} deleted, {} inserted, {} changed ({} annotation changes)",
        stats.retained, stats.deleted, stats.inserted, stats.changed, stats.annotation_changes
    )
}

/// Multi-line summary of a document.
pub fn render_summary(sequence: &Sequence) -> String {
    let structural = sequence.elements.iter().filter(|e| e.is_structural()).count();
    let mut out = String::new();
    let _ = writeln!(out, "Elements: {}", sequence.len().to_string().bold());
    let _ = writeln!(out, "  text: {}", sequence.len() - structural);
    let _ = writeln!(out, "  structural: {structural}");
    let _ = writeln!(out, "Annotations: {}", sequence.store.len().to_string().bold());
    for (key, annotation) in sequence.store.iter() {
        let _ = writeln!(out, "  {} {}", key.short_hex().dimmed(), render_annotation(annotation));
    }
    out
}
