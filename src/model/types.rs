//! Registry entity structs.

use serde::{Deserialize, Serialize};

/// One selectable document in the registry, flattened (multi-part parents
/// expand to one entry per part before this type is built).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LawEntry {
    pub title: String,
    pub jurisdiction: Option<String>,
    pub reference: Option<String>,
    pub source: Option<String>,
    /// Locator for the plain-text body: a root-relative path or an http(s)
    /// URL. Absence is reported when the entry is opened, never a crash.
    pub text_file: Option<String>,
}

impl LawEntry {
    pub fn jurisdiction_display(&self) -> &str {
        self.jurisdiction.as_deref().unwrap_or("—")
    }

    pub fn reference_display(&self) -> &str {
        self.reference.as_deref().unwrap_or("—")
    }

    pub fn source_display(&self) -> &str {
        self.source.as_deref().unwrap_or("—")
    }
}

/// The currently loaded document body. Exactly one is current at a time;
/// selecting another entry replaces it wholesale, never patches it.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub entry: LawEntry,
    /// Exact bytes of the fetched text, decoded as UTF-8, never mutated.
    pub raw_text: String,
}
