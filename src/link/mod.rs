// src/link/mod.rs
// =============================================================================
// This module turns HTML into a list of hyperlinks.
//
// Submodules:
// - parse: Bytes -> HTML document tree (scraper / html5ever)
// - extract: Document tree -> Vec<Link> (every <a> element, in document order)
//
// The crawler uses both halves; the `links` subcommand uses them directly on
// a local file.
// =============================================================================

mod extract;
mod parse;

pub use extract::{extract_links, Link};
pub use parse::parse_document;
