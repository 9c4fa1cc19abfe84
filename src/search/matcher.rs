//! Literal substring matching over document text.

use regex::RegexBuilder;

/// Half-open byte range in the raw text where the query occurs. Offsets come
/// from matching over `&str`, so they always sit on char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

/// Finds every case-insensitive occurrence of `query` as literal text.
///
/// The query is escaped before compiling, so `.`/`(`/`*` match themselves
/// rather than acting as pattern syntax. Matches are reported left to right
/// and never overlap: matching resumes at the end of the previous hit. An
/// empty query yields no spans; callers treat that as a cleared search, not
/// as zero results.
pub fn compute_matches(raw_text: &str, query: &str) -> Vec<MatchSpan> {
    if query.is_empty() {
        return Vec::new();
    }
    let rx = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(rx) => rx,
        Err(err) => {
            // Queries are never rejected; an uncompilable one just matches nothing.
            tracing::warn!("query did not compile: {err}");
            return Vec::new();
        }
    };
    rx.find_iter(raw_text)
        .map(|m| MatchSpan {
            start: m.start(),
            end: m.end(),
        })
        .collect()
}
