// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Stays on the seed's origin (scheme + host + port, after redirects)
// - Configurable depth limit, per-request timeout and parallelism
// - Abort-on-error (default) or keep-going error policy
// - Cooperative cancellation through a CancellationToken
//
// Submodules:
// - config: CrawlConfig and ErrorPolicy
// - fetch: the Fetcher trait and its reqwest implementation
// - bfs: the crawl itself
// =============================================================================

mod bfs;
mod config;
mod fetch;

pub use bfs::{CrawlReport, Crawler, FailedFetch, VisitRecord};
pub use config::{CrawlConfig, ErrorPolicy};
pub use fetch::HttpFetcher;
