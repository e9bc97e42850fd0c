// src/error.rs
// =============================================================================
// Error types shared by the crawler and the link extractor.
//
// - FetchError: the page could not be retrieved (network, timeout, HTTP
//   status). This is what ends a crawl.
// - ParseError: the body could not be read as HTML at all. The crawler keeps
//   such a page as a leaf with no links; only the `links` subcommand reports it.
//
// Links that are empty, off-site or use another scheme are NOT errors; the
// crawler simply filters them out.
//
// main.rs works with anyhow::Result; these typed errors convert into it
// automatically through the ? operator.
// =============================================================================

use thiserror::Error;

/// Why a single URL could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = error.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

/// The body of a response is not HTML we can read.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("body looks like binary data, not HTML")]
    Binary,
}

/// A failure that ends the whole crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("failed to fetch {url}: {cause}")]
    Fetch { url: String, cause: FetchError },
}
