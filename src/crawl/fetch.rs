// src/crawl/fetch.rs
// =============================================================================
// Fetching pages over HTTP.
//
// The crawler only depends on the Fetcher trait, so tests can hand it an
// in-memory fake instead of talking to the network. HttpFetcher is the real
// implementation used by the CLI.
//
// What a fetch returns:
// - final_url: where we ended up after redirects (links on the page are
//   resolved against this, not against the URL we asked for)
// - body: the raw bytes of the response
// =============================================================================

use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::error::FetchError;

const MAX_REDIRECTS: usize = 10;

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub final_url: Url,
    pub body: Vec<u8>,
}

/// Anything that can turn a URL into a page body.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

// Lets a shared fetcher (Arc<T>) be handed to the crawler
#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        (**self).fetch(url).await
    }
}

/// Fetches pages with reqwest, following redirects.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds a client with a per-request timeout. Without one a single
    // stalled server would hang the whole crawl.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("sitemap-crawler/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().clone();
        let body = response.bytes().await?.to_vec();

        Ok(FetchedPage { final_url, body })
    }
}
