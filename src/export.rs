//! Raw-text export and print-ready HTML output.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::types::LawEntry;
use crate::search::highlight::{escape_text, render_highlighted};
use crate::search::matcher::MatchSpan;

/// Reduces a reference or title to a safe lowercase filename stem.
pub fn slugify(name: &str) -> String {
    let mut out = String::new();
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    if out.is_empty() { "law".to_string() } else { out }
}

/// Filename stem for an entry: the reference when present, else the title.
pub fn export_stem(entry: &LawEntry) -> String {
    slugify(entry.reference.as_deref().unwrap_or(&entry.title))
}

/// Writes the exact document bytes to `<stem>.txt`. Highlight state never
/// leaks into the export.
pub fn export_text(entry: &LawEntry, raw_text: &str, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(format!("{}.txt", export_stem(entry)));
    fs::write(&path, raw_text.as_bytes()).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Writes a standalone, print-ready HTML page carrying the current
/// highlights to `<stem>.html`.
pub fn write_print_html(
    entry: &LawEntry,
    raw_text: &str,
    matches: &[MatchSpan],
    cursor: Option<usize>,
    out_dir: &Path,
) -> Result<PathBuf> {
    let path = out_dir.join(format!("{}.html", export_stem(entry)));
    let html = print_html(entry, raw_text, matches, cursor);
    fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn print_html(
    entry: &LawEntry,
    raw_text: &str,
    matches: &[MatchSpan],
    cursor: Option<usize>,
) -> String {
    let title = escape_text(&entry.title);
    let body = render_highlighted(raw_text, matches, cursor);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font: 14px/1.5 Georgia, serif; margin: 2rem auto; max-width: 48rem; }}\n\
         pre {{ white-space: pre-wrap; }}\n\
         mark {{ background: #ffe08a; }}\n\
         mark.current {{ outline: 2px solid #ffa600; }}\n\
         header small {{ color: #555; }}\n\
         </style>\n</head>\n<body>\n\
         <header><h1>{title}</h1>\n\
         <small>{} · {} · {}</small></header>\n\
         <pre>{body}</pre>\n</body>\n</html>\n",
        escape_text(entry.jurisdiction_display()),
        escape_text(entry.reference_display()),
        escape_text(entry.source_display()),
    )
}
