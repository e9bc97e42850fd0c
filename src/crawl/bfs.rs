// src/crawl/bfs.rs
// =============================================================================
// This module implements the breadth-first site crawl.
//
// How it works:
// 1. Level 0 is just the seed URL
// 2. For every URL in the current level that we haven't visited yet:
//    fetch it, parse it, extract its links
// 3. Keep links that resolve to the same origin as the seed (scheme, host
//    and port of the seed AFTER redirects) and aren't visited yet
// 4. Those links become the next level; repeat until max_depth is done
//    or a level comes up empty
//
// The visited map records the depth at which each URL was first reached.
// Because levels are processed in order, that is also its shortest distance
// from the seed, and a later, longer path never overwrites it.
//
// Concurrency:
// - Fetches within a level may run in parallel (config.concurrency)
// - All bookkeeping (visited, origin, next level) happens in one place,
//   in frontier order, as results come back. Nothing is shared between the
//   in-flight fetches, so there is nothing to lock.
// =============================================================================

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::{Origin, Url};

use super::config::{CrawlConfig, ErrorPolicy};
use super::fetch::Fetcher;
use crate::error::CrawlError;
use crate::link::{extract_links, parse_document, Link};

/// A page that was fetched, and the BFS level it was first found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitRecord {
    pub url: String,
    pub depth: usize,
}

/// A page that could not be fetched (only kept with
/// [`ErrorPolicy::Continue`]).
#[derive(Debug, Clone, Serialize)]
pub struct FailedFetch {
    pub url: String,
    pub depth: usize,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    /// Visited pages in the order they were first fetched.
    pub pages: Vec<VisitRecord>,
    pub failures: Vec<FailedFetch>,
    /// True when the crawl was stopped through its cancellation token.
    pub cancelled: bool,
}

// What fetching one page produced: where it really lives, and its links
struct PageLinks {
    final_url: Url,
    links: Vec<Link>,
}

pub struct Crawler<F> {
    fetcher: F,
    config: CrawlConfig,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    // Crawls the site reachable from `seed`
    //
    // Returns:
    //   Ok(report) when the crawl ran to the end, or was cancelled (the
    //   report then holds whatever was visited so far)
    //   Err(..) for a bad seed, or for the first fetch failure when the
    //   error policy is Abort
    pub async fn crawl(
        &self,
        seed: &str,
        cancel: &CancellationToken,
    ) -> Result<CrawlReport, CrawlError> {
        let seed = parse_seed(seed)?;
        let max_depth = self.config.max_depth;

        let mut report = CrawlReport::default();
        // Normalized URLs already in report.pages
        let mut visited: HashSet<String> = HashSet::new();
        let mut failed: HashSet<String> = HashSet::new();
        let mut origin: Option<Origin> = None;

        let mut frontier = vec![seed];

        for depth in 0..=max_depth {
            if frontier.is_empty() {
                break;
            }
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            info!(depth, queued = frontier.len(), "crawling level");

            // Drop URLs we've already seen, including repeats within this
            // level; only the first copy of each is fetched
            let mut scheduled = HashSet::new();
            let mut batch = Vec::with_capacity(frontier.len());
            for url in frontier.drain(..) {
                let key = url.as_str();
                if visited.contains(key) || failed.contains(key) || scheduled.contains(key) {
                    debug!(depth, %url, "skip");
                    continue;
                }
                scheduled.insert(key.to_string());
                batch.push(url);
            }

            // Links on the last level would only lead past max_depth
            let expand = depth < max_depth;
            let mut results = stream::iter(batch)
                .map(|url| async move {
                    let outcome = self.visit(&url, expand).await;
                    (url, outcome)
                })
                .buffered(self.config.concurrency.max(1));

            let mut next_frontier = Vec::new();

            loop {
                let next = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => None,
                    next = results.next() => next,
                };
                let Some((url, outcome)) = next else {
                    break;
                };

                let page = match outcome {
                    Ok(page) => page,
                    Err(error) => match self.config.on_error {
                        ErrorPolicy::Abort => return Err(error),
                        ErrorPolicy::Continue => {
                            warn!(depth, %url, %error, "skipping page");
                            report.failures.push(FailedFetch {
                                url: url.to_string(),
                                depth,
                                error: error.to_string(),
                            });
                            failed.insert(url.into());
                            continue;
                        }
                    },
                };

                debug!(depth, %url, final_url = %page.final_url, "visit");
                visited.insert(url.to_string());
                // A redirect target is the same page; don't fetch it again
                // under its new address
                let landed = normalize(page.final_url.clone());
                if landed != url {
                    visited.insert(landed.into());
                }
                report.pages.push(VisitRecord {
                    url: url.into(),
                    depth,
                });

                // The first page we manage to fetch decides what "same site" means
                let origin = origin.get_or_insert_with(|| {
                    let origin = page.final_url.origin();
                    info!(origin = %origin.ascii_serialization(), "resolved crawl origin");
                    origin
                });

                for link in &page.links {
                    let Some(target) = resolve_same_origin(&page.final_url, &link.href, origin)
                    else {
                        continue;
                    };
                    if visited.contains(target.as_str()) || failed.contains(target.as_str()) {
                        continue;
                    }
                    debug!(depth = depth + 1, url = %target, "enqueue");
                    next_frontier.push(target);
                }
            }

            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            frontier = next_frontier;
        }

        info!(
            pages = report.pages.len(),
            failures = report.failures.len(),
            cancelled = report.cancelled,
            "crawl finished"
        );

        Ok(report)
    }

    // Fetches one page and, if `expand` is set, extracts its links
    async fn visit(&self, url: &Url, expand: bool) -> Result<PageLinks, CrawlError> {
        let page = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|cause| CrawlError::Fetch {
                url: url.to_string(),
                cause,
            })?;

        let links = if expand {
            read_links(url, &page.body)
        } else {
            Vec::new()
        };

        Ok(PageLinks {
            final_url: page.final_url,
            links,
        })
    }
}

// Kept synchronous: the parsed document is not Send, so it must never be
// held across an .await
//
// Images, PDFs and other non-HTML bodies are still pages of the site; they
// just have no links to follow.
fn read_links(url: &Url, body: &[u8]) -> Vec<Link> {
    match parse_document(body) {
        Ok(document) => extract_links(&document),
        Err(error) => {
            debug!(%url, %error, "no links to follow");
            Vec::new()
        }
    }
}

fn parse_seed(seed: &str) -> Result<Url, CrawlError> {
    let invalid = |reason: String| CrawlError::InvalidSeed {
        url: seed.to_string(),
        reason,
    };

    let url = Url::parse(seed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    Ok(normalize(url))
}

// Two URLs that differ only by fragment are the same page
fn normalize(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

// Resolves an href against the page it was found on and keeps it only if
// it stays on the crawl's origin
//
// Examples (page = https://ex.com/docs/intro):
//   "../about"               -> Some(https://ex.com/about)
//   "//ex.com/x#frag"        -> Some(https://ex.com/x)
//   "https://other.com/"     -> None (different host)
//   "mailto:me@ex.com"       -> None (opaque origin never matches)
//   ""                       -> None
fn resolve_same_origin(page: &Url, href: &str, origin: &Origin) -> Option<Url> {
    if href.is_empty() {
        return None;
    }

    let resolved = page.join(href).ok()?;
    if resolved.origin() != *origin {
        return None;
    }

    Some(normalize(resolved))
}
