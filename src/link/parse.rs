// src/link/parse.rs
// =============================================================================
// Parses a fetched response body into an HTML document tree.
//
// scraper (html5ever underneath) never rejects markup: unclosed tags,
// stray end tags and the like are repaired the same way a browser would.
// The only input we refuse is input that is clearly not text at all.
// =============================================================================

use scraper::Html;

use crate::error::ParseError;

// How many leading bytes to inspect when sniffing for binary content
const SNIFF_LEN: usize = 1024;

/// Parses `body` as an HTML document.
///
/// Invalid UTF-8 sequences are replaced rather than rejected. A NUL byte near
/// the start of the body means we were handed an image, archive or similar,
/// and that is reported as [`ParseError::Binary`].
pub fn parse_document(body: &[u8]) -> Result<Html, ParseError> {
    let head = &body[..body.len().min(SNIFF_LEN)];
    if head.contains(&0) {
        return Err(ParseError::Binary);
    }

    let html = String::from_utf8_lossy(body);
    Ok(Html::parse_document(&html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_malformed_markup() {
        let document = parse_document(b"<p><a href='/x'>unclosed").unwrap();
        let root = document.root_element();
        assert_eq!(root.value().name(), "html");
    }

    #[test]
    fn test_rejects_binary_body() {
        let body = [0x89, b'P', b'N', b'G', 0x00, 0x00, 0x00, 0x0d];
        assert!(matches!(parse_document(&body), Err(ParseError::Binary)));
    }

    #[test]
    fn test_tolerates_invalid_utf8() {
        let body = b"<a href=\"/caf\xe9\">caf\xe9</a>";
        assert!(parse_document(body).is_ok());
    }

    #[test]
    fn test_empty_body_is_an_empty_document() {
        assert!(parse_document(b"").is_ok());
    }
}
