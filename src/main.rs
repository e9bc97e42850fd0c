// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, always to stderr so stdout stays clean)
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = some pages failed, 2 = error)
// =============================================================================

mod cli;
mod crawl;
mod error;
mod link;
mod sitemap;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use crawl::{CrawlConfig, Crawler, HttpFetcher};
use link::Link;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = success
//   Ok(1) = crawl finished but some pages failed (--keep-going)
//   Err   = fatal error
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            seed_url,
            max_depth,
            concurrency,
            timeout,
            keep_going,
            json,
            debug,
        } => {
            init_tracing(debug);
            let config = cli::crawl_config(max_depth, concurrency, timeout, keep_going);
            handle_crawl(&seed_url, config, json).await
        }
        Commands::Links { file, json } => {
            init_tracing(false);
            handle_links(&file, json)
        }
    }
}

// --debug wins over RUST_LOG; without either only warnings are shown
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("sitemap_crawler=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn handle_crawl(seed_url: &str, config: CrawlConfig, json: bool) -> Result<i32> {
    let fetcher = HttpFetcher::new(config.timeout).context("failed to build HTTP client")?;
    let crawler = Crawler::new(fetcher, config);

    // Ctrl-C stops the crawl; whatever was found so far is still printed
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, writing partial sitemap");
            on_interrupt.cancel();
        }
    });

    let report = crawler.crawl(seed_url, &cancel).await?;

    let output = if json {
        sitemap::render_json(&report)?
    } else {
        sitemap::render_xml(&report.pages)?
    };
    println!("{}", output.trim_end());

    if report.failures.is_empty() {
        return Ok(0);
    }

    eprintln!("{} page(s) could not be crawled:", report.failures.len());
    for failure in &report.failures {
        eprintln!("   {}", failure.error);
    }
    Ok(1)
}

fn handle_links(file: &Path, json: bool) -> Result<i32> {
    let body = read_input(file, std::io::stdin())?;

    let document = link::parse_document(&body)
        .with_context(|| format!("failed to parse {}", file.display()))?;
    let links = link::extract_links(&document);

    print!("{}", render_links(&links, json)?);
    Ok(0)
}

// Reads the whole file, or all of `stdin` when the path is "-"
fn read_input(file: &Path, mut stdin: impl Read) -> Result<Vec<u8>> {
    if file.as_os_str() == "-" {
        let mut body = Vec::new();
        stdin
            .read_to_end(&mut body)
            .context("failed to read standard input")?;
        return Ok(body);
    }

    std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))
}

// One "href<TAB>text" line per link, or a pretty JSON array
fn render_links(links: &[Link], json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(links)?));
    }

    Ok(links
        .iter()
        .map(|link| format!("{}\t{}\n", link.href, link.text))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const PAGE: &str = r#"<p><a href="/docs">Read the
        <b>docs</b></a> or <a href="mailto:x@y.com">mail us</a></p>"#;

    #[test]
    fn test_read_input_from_stdin() {
        let body = read_input(Path::new("-"), Cursor::new(PAGE)).unwrap();
        assert_eq!(body, PAGE.as_bytes());
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PAGE.as_bytes()).unwrap();

        let body = read_input(file.path(), Cursor::new("ignored")).unwrap();
        assert_eq!(body, PAGE.as_bytes());
    }

    #[test]
    fn test_read_input_missing_file() {
        let error = read_input(Path::new("/no/such/page.html"), Cursor::new("")).unwrap_err();
        assert!(error.to_string().contains("/no/such/page.html"));
    }

    #[test]
    fn test_render_links_as_lines() {
        let document = link::parse_document(PAGE.as_bytes()).unwrap();
        let links = link::extract_links(&document);

        let output = render_links(&links, false).unwrap();
        assert_eq!(output, "/docs\tRead the docs\nmailto:x@y.com\tmail us\n");
    }

    #[test]
    fn test_render_links_as_json() {
        let document = link::parse_document(PAGE.as_bytes()).unwrap();
        let links = link::extract_links(&document);

        let output = render_links(&links, true).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json[0]["href"], "/docs");
        assert_eq!(json[0]["text"], "Read the docs");
        assert_eq!(json[1]["href"], "mailto:x@y.com");
    }

    #[test]
    fn test_render_no_links() {
        assert_eq!(render_links(&[], false).unwrap(), "");
        assert_eq!(render_links(&[], true).unwrap(), "[]\n");
    }
}
