//! Session state shared by the TUI and the headless commands.

use crate::model::types::{LawEntry, LoadedDocument};
use crate::registry::filter_entries;
use crate::search::SearchState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Typing edits the in-text search query.
    TextSearch,
    /// Typing narrows the law list.
    ListFilter,
}

/// The single mutable session: registry view, current document, search
/// state. All mutation funnels through these methods; the event loop owns
/// the one instance, so no locking is needed.
#[derive(Debug, Default)]
pub struct Session {
    entries: Vec<LawEntry>,
    pub list_filter: String,
    pub filtered: Vec<LawEntry>,
    pub selected: Option<usize>,
    pub document: Option<LoadedDocument>,
    /// Human-readable reason the viewer pane is empty, if it is.
    pub document_error: Option<String>,
    /// Entry whose last fetch failed. Remembered so the fetch is not retried
    /// on every loop pass; only an explicit reselect tries again.
    failed_entry: Option<LawEntry>,
    pub search: SearchState,
}

impl Session {
    pub fn set_entries(&mut self, entries: Vec<LawEntry>) {
        self.entries = entries;
        self.apply_filter();
    }

    pub fn entries(&self) -> &[LawEntry] {
        &self.entries
    }

    /// Re-derives the filtered view and keeps the selection on the same
    /// entry when it survives the filter; otherwise the first item of the
    /// filtered sequence becomes current (the canonical first-visible
    /// policy).
    pub fn apply_filter(&mut self) {
        let previous = self.selected_entry().cloned();
        self.filtered = filter_entries(&self.entries, &self.list_filter);
        self.selected = previous
            .and_then(|prev| self.filtered.iter().position(|e| *e == prev))
            .or(if self.filtered.is_empty() { None } else { Some(0) });
    }

    pub fn selected_entry(&self) -> Option<&LawEntry> {
        self.selected.and_then(|idx| self.filtered.get(idx))
    }

    /// True when the selection points at a different entry than the loaded
    /// document (or at nothing loaded at all) and a fetch is needed. An entry
    /// whose last fetch failed does not need a load until reselected.
    pub fn selection_needs_load(&self) -> bool {
        match (self.selected_entry(), &self.document) {
            (Some(entry), Some(doc)) => *entry != doc.entry,
            (Some(entry), None) => self.failed_entry.as_ref() != Some(entry),
            (None, _) => false,
        }
    }

    pub fn select(&mut self, idx: usize) {
        if idx < self.filtered.len() {
            self.selected = Some(idx);
            self.failed_entry = None;
        }
    }

    pub fn select_next(&mut self) {
        if let Some(idx) = self.selected
            && idx + 1 < self.filtered.len()
        {
            self.selected = Some(idx + 1);
            self.failed_entry = None;
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(idx) = self.selected
            && idx > 0
        {
            self.selected = Some(idx - 1);
            self.failed_entry = None;
        }
    }

    /// Installs a newly fetched document. Prior search results are discarded
    /// before the new text is visible; a pending query re-runs against the
    /// new text. Returns the match index to bring into view, if any.
    pub fn install_document(&mut self, doc: LoadedDocument) -> Option<usize> {
        self.document_error = None;
        self.failed_entry = None;
        let reveal = self.search.on_document_change(&doc.raw_text);
        self.document = Some(doc);
        reveal
    }

    /// Records a load failure. The rest of the session (list, other
    /// documents) stays usable; search state is reset so no stale highlights
    /// survive. The selected entry is remembered as failed, so there is no
    /// automatic retry; moving the selection clears the record.
    pub fn fail_document(&mut self, message: String) {
        self.document = None;
        self.failed_entry = self.selected_entry().cloned();
        self.search.on_document_change("");
        self.document_error = Some(message);
    }
}
