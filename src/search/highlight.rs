//! Lossless highlighted rendering of document text.
//!
//! `render_highlighted` is the canonical, display-agnostic rendering: escaped
//! text with `<mark>` annotations around each match. The print/HTML output
//! uses it directly; the TUI has its own span-based renderer over the same
//! match set.

use crate::search::matcher::MatchSpan;

/// Escapes text for literal display inside markup; nothing in the output is
/// ever interpreted as a tag or entity.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders `raw_text` with each match wrapped in a numbered `<mark>`; the
/// span at `cursor` additionally carries `class="current"`.
///
/// Annotation is purely additive: stripping the marks and unescaping yields
/// `raw_text` exactly. With no matches the output is just the escaped text.
pub fn render_highlighted(raw_text: &str, matches: &[MatchSpan], cursor: Option<usize>) -> String {
    let mut out = String::with_capacity(raw_text.len() + matches.len() * 24);
    let mut pos = 0;
    for (idx, span) in matches.iter().enumerate() {
        out.push_str(&escape_text(&raw_text[pos..span.start]));
        if cursor == Some(idx) {
            out.push_str(&format!("<mark data-hit=\"{idx}\" class=\"current\">"));
        } else {
            out.push_str(&format!("<mark data-hit=\"{idx}\">"));
        }
        out.push_str(&escape_text(&raw_text[span.start..span.end]));
        out.push_str("</mark>");
        pos = span.end;
    }
    out.push_str(&escape_text(&raw_text[pos..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::matcher::compute_matches;

    fn strip_and_unescape(rendered: &str) -> String {
        let rx = regex::Regex::new(r"</?mark[^>]*>").unwrap();
        rx.replace_all(rendered, "")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    #[test]
    fn no_matches_is_plain_escaped_text() {
        let out = render_highlighted("a < b & c", &[], None);
        assert_eq!(out, "a &lt; b &amp; c");
        assert!(!out.contains("<mark"));
    }

    #[test]
    fn current_match_is_distinguished() {
        let text = "act and act";
        let matches = compute_matches(text, "act");
        let out = render_highlighted(text, &matches, Some(1));
        assert_eq!(out.matches("<mark").count(), 2);
        assert_eq!(out.matches("class=\"current\"").count(), 1);
        assert!(out.contains("<mark data-hit=\"1\" class=\"current\">"));
    }

    #[test]
    fn round_trips_markup_heavy_text() {
        let text = "Section <1> says \"A & B\" aren't 'C'; see <section> again";
        let matches = compute_matches(text, "<section>");
        assert_eq!(matches.len(), 1);
        let rendered = render_highlighted(text, &matches, Some(0));
        assert_eq!(strip_and_unescape(&rendered), text);
    }

    #[test]
    fn round_trips_with_adjacent_matches() {
        let text = "aaaa";
        let matches = compute_matches(text, "aa");
        let rendered = render_highlighted(text, &matches, None);
        assert_eq!(strip_and_unescape(&rendered), text);
    }
}
