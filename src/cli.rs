// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - crawl: crawl a site from a seed URL and print its sitemap
// - links: print the links found in a local HTML file
//
// Rust concepts:
// - Derive macros: clap generates the parser from these structs
// - Enums: one variant per subcommand
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::crawl::{CrawlConfig, ErrorPolicy};

#[derive(Parser, Debug)]
#[command(
    name = "sitemap-crawler",
    version,
    about = "Build a sitemap by crawling a website breadth-first",
    long_about = "sitemap-crawler starts from a seed URL, follows every link that stays on the \
                  same site up to a maximum depth, and prints the pages it found as an XML sitemap."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and print its sitemap
    ///
    /// Example: sitemap-crawler crawl https://example.com --max-depth 2
    Crawl {
        /// URL to start from (e.g., https://example.com)
        seed_url: String,

        /// How many links away from the seed to go
        ///
        /// Depth 0 = only the seed page
        /// Depth 1 = the seed page + every page it links to
        #[arg(long, default_value_t = 3)]
        max_depth: usize,

        /// Maximum number of pages fetched at the same time
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
        concurrency: u16,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,

        /// Keep crawling when a page fails, and list the failures
        #[arg(long)]
        keep_going: bool,

        /// Output JSON (pages with depth, failures) instead of XML
        #[arg(long)]
        json: bool,

        /// Trace every visited, skipped and queued URL on stderr
        #[arg(long)]
        debug: bool,
    },

    /// Print the links in an HTML file
    ///
    /// Example: sitemap-crawler links page.html
    Links {
        /// HTML file to read, or '-' for standard input
        file: PathBuf,

        /// Output a JSON array instead of one link per line
        #[arg(long)]
        json: bool,
    },
}

// Builds the crawl settings out of the `crawl` subcommand's flags
pub fn crawl_config(
    max_depth: usize,
    concurrency: u16,
    timeout: u64,
    keep_going: bool,
) -> CrawlConfig {
    CrawlConfig {
        max_depth,
        concurrency: usize::from(concurrency),
        timeout: Duration::from_secs(timeout),
        on_error: if keep_going {
            ErrorPolicy::Continue
        } else {
            ErrorPolicy::Abort
        },
    }
}
