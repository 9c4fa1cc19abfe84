//! Document text fetch with an HTML-sniff guard.
//!
//! Locators are root-relative paths or http(s) URLs. A body that looks like
//! an HTML document is treated as a missing file: web servers answer wrong
//! paths with an error page, and that markup must never render as law text.

use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("entry has no text file locator")]
    MissingLocator,
    #[error("{locator}: HTTP {status}")]
    HttpStatus { locator: String, status: u16 },
    #[error("{locator} looks like an HTML page, not law text (wrong path?)")]
    LooksLikeHtml { locator: String },
    #[error("{locator}: {reason}")]
    Missing { locator: String, reason: String },
}

/// Fetches the raw UTF-8 text behind `locator` and sniffs out HTML bodies.
pub fn fetch_document_text(root: &Path, locator: &str) -> Result<String, FetchError> {
    let body = if locator.starts_with("http://") || locator.starts_with("https://") {
        fetch_http(locator)?
    } else {
        let path = root.join(locator);
        std::fs::read_to_string(&path).map_err(|err| FetchError::Missing {
            locator: locator.to_string(),
            reason: err.to_string(),
        })?
    };

    if looks_like_html(&body) {
        tracing::warn!(locator, "fetched body sniffed as HTML, rejecting");
        return Err(FetchError::LooksLikeHtml {
            locator: locator.to_string(),
        });
    }
    Ok(body)
}

fn fetch_http(url: &str) -> Result<String, FetchError> {
    let missing = |reason: String| FetchError::Missing {
        locator: url.to_string(),
        reason,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|err| missing(err.to_string()))?;
    let response = client
        .get(url)
        .send()
        .map_err(|err| missing(err.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            locator: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().map_err(|err| missing(err.to_string()))
}

/// True when the body structurally resembles an HTML document.
pub fn looks_like_html(body: &str) -> bool {
    let head: String = body
        .trim_start()
        .chars()
        .take(32)
        .collect::<String>()
        .to_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}
