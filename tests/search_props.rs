//! Property tests for the match engine and the highlighted rendering.

use laws_repo_viewer::search::highlight::render_highlighted;
use laws_repo_viewer::search::matcher::compute_matches;
use laws_repo_viewer::search::SearchState;
use proptest::prelude::*;

fn strip_and_unescape(rendered: &str) -> String {
    let rx = regex::Regex::new(r"</?mark[^>]*>").unwrap();
    rx.replace_all(rendered, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

proptest! {
    /// Spans are in-bounds, ordered left to right, non-overlapping, and on
    /// char boundaries.
    #[test]
    fn spans_are_ordered_and_disjoint(
        text in "\\PC{0,120}",
        query in "[ -~]{1,6}",
    ) {
        let matches = compute_matches(&text, &query);
        let mut prev_end = 0usize;
        for span in &matches {
            prop_assert!(span.start >= prev_end);
            prop_assert!(span.end <= text.len());
            prop_assert!(text.is_char_boundary(span.start));
            prop_assert!(text.is_char_boundary(span.end));
            prev_end = span.end;
        }
    }

    /// Stripping the marks and unescaping recovers the input byte for byte,
    /// whatever the cursor position.
    #[test]
    fn rendering_is_lossless(
        text in "\\PC{0,120}",
        query in "[ -~]{1,6}",
        cursor_seed in 0usize..8,
    ) {
        let matches = compute_matches(&text, &query);
        let cursor = if matches.is_empty() {
            None
        } else {
            Some(cursor_seed % matches.len())
        };
        let rendered = render_highlighted(&text, &matches, cursor);
        prop_assert_eq!(strip_and_unescape(&rendered), text);
    }

    /// Every matched slice of ASCII text equals the query up to ASCII case.
    #[test]
    fn ascii_matches_equal_the_query(
        text in "[ -~]{0,120}",
        query in "[a-zA-Z0-9 .()*]{1,6}",
    ) {
        prop_assume!(!query.trim().is_empty());
        let matches = compute_matches(&text, query.trim());
        let wanted = query.trim().to_ascii_lowercase();
        for span in &matches {
            prop_assert_eq!(
                text[span.start..span.end].to_ascii_lowercase(),
                wanted.clone()
            );
        }
    }

    /// Advancing through all n matches returns to the first; stepping back
    /// from the first lands on the last.
    #[test]
    fn cursor_wraps_in_both_directions(
        text in "[a-c\\n ]{1,80}",
        query in "[a-c]{1,2}",
    ) {
        let mut state = SearchState::default();
        state.on_query_change(&query, &text);
        let n = state.matches.len();
        prop_assume!(n > 0);

        prop_assert_eq!(state.cursor(), Some(0));
        for _ in 0..n {
            state.on_next();
        }
        prop_assert_eq!(state.cursor(), Some(0));

        state.on_previous();
        prop_assert_eq!(state.cursor(), Some(n - 1));
    }
}
