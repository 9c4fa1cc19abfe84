//! Registry loading: candidate locations, shape validation, part flattening.

pub mod text;

use crate::model::types::LawEntry;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where to look for the registry, in priority order (root-relative).
pub const CANDIDATE_REGISTRIES: &[&str] = &[
    "data/laws/jersey/laws.json",
    "data/laws/laws.json",
    "laws.json",
];

/// Why one candidate location was rejected.
#[derive(Debug)]
pub enum AttemptFailure {
    NotFound(String),
    ParseError(String),
    UnexpectedShape(String),
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptFailure::NotFound(reason) => write!(f, "not found ({reason})"),
            AttemptFailure::ParseError(reason) => write!(f, "parse error: {reason}"),
            AttemptFailure::UnexpectedShape(reason) => write!(f, "unexpected shape: {reason}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Every candidate location failed; the message lists each one with its
    /// failure reason so a misplaced file is easy to spot.
    #[error("could not load a laws registry from any known location:\n{}", format_attempts(.attempts))]
    Unavailable { attempts: Vec<(PathBuf, AttemptFailure)> },
}

fn format_attempts(attempts: &[(PathBuf, AttemptFailure)]) -> String {
    attempts
        .iter()
        .map(|(path, failure)| format!("  {} — {failure}", path.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A successfully loaded registry and the location it came from.
#[derive(Debug)]
pub struct LoadedRegistry {
    pub path: PathBuf,
    pub entries: Vec<LawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    jurisdiction: Option<String>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    text_file: Option<String>,
    #[serde(default)]
    parts: Vec<RawPart>,
}

#[derive(Debug, Deserialize)]
struct RawPart {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    text_file: Option<String>,
}

/// Tries each candidate location in order and returns the first one that
/// parses into a structurally valid registry. A candidate that exists but is
/// broken falls through to the next.
pub fn load_registry(root: &Path) -> Result<LoadedRegistry, RegistryError> {
    let mut attempts: Vec<(PathBuf, AttemptFailure)> = Vec::new();

    for rel in CANDIDATE_REGISTRIES {
        let path = root.join(rel);
        let body = match std::fs::read_to_string(&path) {
            Ok(body) => body,
            Err(err) => {
                attempts.push((path, AttemptFailure::NotFound(err.to_string())));
                continue;
            }
        };
        match parse_registry(&body) {
            Ok(entries) => {
                tracing::info!(path = %path.display(), entries = entries.len(), "registry loaded");
                return Ok(LoadedRegistry { path, entries });
            }
            Err(failure) => {
                tracing::warn!(path = %path.display(), %failure, "candidate registry rejected");
                attempts.push((path, failure));
            }
        }
    }

    Err(RegistryError::Unavailable { attempts })
}

/// Parses a registry payload: either a bare JSON array of entries or an
/// object carrying a `laws` array.
fn parse_registry(body: &str) -> Result<Vec<LawEntry>, AttemptFailure> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|err| AttemptFailure::ParseError(err.to_string()))?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("laws") {
            Some(serde_json::Value::Array(items)) => items,
            Some(_) => {
                return Err(AttemptFailure::UnexpectedShape(
                    "`laws` is not an array".into(),
                ));
            }
            None => {
                return Err(AttemptFailure::UnexpectedShape(
                    "expected an array, or an object with a `laws` array".into(),
                ));
            }
        },
        other => {
            return Err(AttemptFailure::UnexpectedShape(format!(
                "expected an array, got {}",
                json_kind(&other)
            )));
        }
    };

    let mut raw = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<RawEntry>(item) {
            Ok(entry) => raw.push(entry),
            // One bad element should not take down the whole registry.
            Err(err) => tracing::warn!("skipping malformed registry entry: {err}"),
        }
    }
    Ok(flatten(raw))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

const UNTITLED: &str = "(untitled)";

/// Expands multi-part parents into one entry per part. Pure and
/// order-preserving: parts appear where their parent sat in the payload.
fn flatten(raw: Vec<RawEntry>) -> Vec<LawEntry> {
    let mut out = Vec::with_capacity(raw.len());
    for entry in raw {
        let parent_title = entry.title.unwrap_or_else(|| UNTITLED.to_string());
        if entry.parts.is_empty() {
            out.push(LawEntry {
                title: parent_title,
                jurisdiction: entry.jurisdiction,
                reference: entry.reference,
                source: entry.source,
                text_file: entry.text_file,
            });
            continue;
        }
        for part in entry.parts {
            let part_title = part.title.unwrap_or_else(|| UNTITLED.to_string());
            out.push(LawEntry {
                title: format!("{parent_title} — {part_title}"),
                jurisdiction: entry.jurisdiction.clone(),
                reference: part.reference.or_else(|| entry.reference.clone()),
                source: entry.source.clone(),
                text_file: part.text_file,
            });
        }
    }
    out
}

/// Case-insensitive substring filter over title/jurisdiction/reference.
/// Preserves registry order and never dedups.
pub fn filter_entries(entries: &[LawEntry], needle: &str) -> Vec<LawEntry> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return entries.to_vec();
    }
    entries
        .iter()
        .filter(|entry| {
            entry.title.to_lowercase().contains(&needle)
                || entry
                    .jurisdiction
                    .as_deref()
                    .is_some_and(|j| j.to_lowercase().contains(&needle))
                || entry
                    .reference
                    .as_deref()
                    .is_some_and(|r| r.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Looks an entry up by reference first, then by title (case-insensitive).
pub fn find_entry<'a>(entries: &'a [LawEntry], needle: &str) -> Option<&'a LawEntry> {
    entries
        .iter()
        .find(|entry| {
            entry
                .reference
                .as_deref()
                .is_some_and(|r| r.eq_ignore_ascii_case(needle))
        })
        .or_else(|| {
            entries
                .iter()
                .find(|entry| entry.title.eq_ignore_ascii_case(needle))
        })
}
