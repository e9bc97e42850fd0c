// src/crawl/config.rs
// =============================================================================
// Settings for a single crawl run.
//
// The CLI fills these in from its flags; tests build them directly with
// struct-update syntax:
//
//   CrawlConfig { max_depth: 2, ..CrawlConfig::default() }
// =============================================================================

use std::time::Duration;

/// What to do when a page cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the whole crawl and report the error.
    #[default]
    Abort,
    /// Record the failure and keep crawling the rest of the site.
    Continue,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Deepest BFS level to visit; the seed is level 0.
    pub max_depth: usize,
    /// Maximum number of fetches in flight within one level.
    pub concurrency: usize,
    /// Per-request timeout for the HTTP fetcher.
    pub timeout: Duration,
    pub on_error: ErrorPolicy,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            concurrency: 1,
            timeout: Duration::from_secs(10),
            on_error: ErrorPolicy::Abort,
        }
    }
}
