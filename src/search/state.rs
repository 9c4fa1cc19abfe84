//! Current-match cursor over a document's match set.

use crate::search::matcher::{MatchSpan, compute_matches};

/// Search state for the currently loaded document.
///
/// `matches` is always derived wholesale from the current document text and
/// `query`; the transitions below recompute it, never patch it. The cursor is
/// `None` exactly when `matches` is empty, otherwise it indexes into
/// `matches`. Transitions that move the cursor return the match index the
/// display should bring into view.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    pub matches: Vec<MatchSpan>,
    cursor: Option<usize>,
}

impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current_span(&self) -> Option<MatchSpan> {
        self.cursor.and_then(|idx| self.matches.get(idx).copied())
    }

    pub fn is_active(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Applies a new query against the current document text. The cursor
    /// resets to the first match.
    pub fn on_query_change(&mut self, query: &str, raw_text: &str) -> Option<usize> {
        self.query = query.trim().to_string();
        self.matches = compute_matches(raw_text, &self.query);
        self.cursor = if self.matches.is_empty() { None } else { Some(0) };
        self.cursor
    }

    /// Resets for a newly loaded document, then re-runs any pending query
    /// against the new text. The query surviving the switch is deliberate:
    /// it lets one term be chased across the parts of a law.
    pub fn on_document_change(&mut self, raw_text: &str) -> Option<usize> {
        let pending = std::mem::take(&mut self.query);
        self.matches.clear();
        self.cursor = None;
        if pending.is_empty() {
            return None;
        }
        self.on_query_change(&pending, raw_text)
    }

    /// Advances to the next match, wrapping past the last. No-op without matches.
    pub fn on_next(&mut self) -> Option<usize> {
        let n = self.matches.len();
        if n == 0 {
            return None;
        }
        let next = self.cursor.map(|c| (c + 1) % n).unwrap_or(0);
        self.cursor = Some(next);
        self.cursor
    }

    /// Steps back to the previous match, wrapping before the first. No-op
    /// without matches.
    pub fn on_previous(&mut self) -> Option<usize> {
        let n = self.matches.len();
        if n == 0 {
            return None;
        }
        let prev = self.cursor.map(|c| (c + n - 1) % n).unwrap_or(0);
        self.cursor = Some(prev);
        self.cursor
    }

    /// Status text for the current state. A cleared search reads differently
    /// from a query with zero results.
    pub fn status(&self) -> String {
        if self.query.is_empty() {
            "Cleared search.".to_string()
        } else if self.matches.is_empty() {
            format!("No results for “{}”.", self.query)
        } else {
            format!(
                "Matches: {}  —  Viewing {} of {}  —  Query: “{}”",
                self.matches.len(),
                self.cursor.map(|c| c + 1).unwrap_or(0),
                self.matches.len(),
                self.query,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "act one, act two, act three";

    #[test]
    fn query_change_resets_cursor_to_first_match() {
        let mut state = SearchState::default();
        let reveal = state.on_query_change("act", TEXT);
        assert_eq!(reveal, Some(0));
        assert_eq!(state.matches.len(), 3);
        assert_eq!(state.cursor(), Some(0));

        state.on_next();
        let reveal = state.on_query_change("two", TEXT);
        assert_eq!(reveal, Some(0));
        assert_eq!(state.matches.len(), 1);
    }

    #[test]
    fn wraparound_in_both_directions() {
        let mut state = SearchState::default();
        state.on_query_change("act", TEXT);

        assert_eq!(state.on_next(), Some(1));
        assert_eq!(state.on_next(), Some(2));
        assert_eq!(state.on_next(), Some(0));

        assert_eq!(state.on_previous(), Some(2));
        assert_eq!(state.on_previous(), Some(1));
        assert_eq!(state.on_previous(), Some(0));
        assert_eq!(state.on_previous(), Some(2));
    }

    #[test]
    fn navigation_is_a_noop_when_empty() {
        let mut state = SearchState::default();
        assert_eq!(state.on_next(), None);
        assert_eq!(state.on_previous(), None);

        state.on_query_change("absent", TEXT);
        assert_eq!(state.on_next(), None);
        assert_eq!(state.cursor(), None);
    }

    #[test]
    fn document_change_discards_matches_and_reruns_pending_query() {
        let mut state = SearchState::default();
        state.on_query_change("act", TEXT);
        state.on_next();

        let reveal = state.on_document_change("one act only");
        assert_eq!(reveal, Some(0));
        assert_eq!(state.matches.len(), 1);
        assert_eq!(state.cursor(), Some(0));
        assert_eq!(state.query(), "act");

        // New document without the term: state ends Empty, query retained.
        let reveal = state.on_document_change("nothing here");
        assert_eq!(reveal, None);
        assert!(state.matches.is_empty());
        assert_eq!(state.cursor(), None);
        assert_eq!(state.query(), "act");
    }

    #[test]
    fn document_change_without_query_resets_silently() {
        let mut state = SearchState::default();
        state.on_document_change(TEXT);
        assert!(state.matches.is_empty());
        assert_eq!(state.cursor(), None);
    }

    #[test]
    fn status_distinguishes_cleared_from_no_results() {
        let mut state = SearchState::default();
        state.on_query_change("", TEXT);
        assert_eq!(state.status(), "Cleared search.");

        state.on_query_change("   ", TEXT);
        assert_eq!(state.status(), "Cleared search.");

        state.on_query_change("zebra", TEXT);
        assert!(state.status().starts_with("No results for"));

        state.on_query_change("act", TEXT);
        state.on_next();
        assert!(state.status().contains("Viewing 2 of 3"));
    }
}
