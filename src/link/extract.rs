// src/link/extract.rs
// =============================================================================
// This module extracts anchor links (<a href="...">text</a>) from a parsed
// HTML document.
//
// How it works:
// 1. Walk the document tree depth-first with an explicit stack
// 2. Every <a> element becomes one Link (href + visible text)
// 3. An anchor's children are read only for its text; we do not look for
//    more anchors inside it
//
// Rust concepts:
// - Explicit stack instead of recursion: deep documents can't overflow
// - Iterators: text() walks every text node under an element
// - serde::Serialize: so the `links` subcommand can print JSON
// =============================================================================

use scraper::{ElementRef, Html};
use serde::Serialize;

/// One hyperlink found in a document.
///
/// `href` is the raw attribute value (relative, absolute, `mailto:` ...), or
/// an empty string when the anchor has no `href` at all. `text` is the
/// visible text with whitespace runs collapsed to single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Link {
    pub href: String,
    pub text: String,
}

// Extracts every anchor in the document, in document order
//
// Example:
//   <p><a href="/docs"> Read the
//      <b>docs</b></a></p>
//   -> [Link { href: "/docs", text: "Read the docs" }]
pub fn extract_links(document: &Html) -> Vec<Link> {
    let mut links = Vec::new();
    let mut stack = vec![document.tree.root()];

    while let Some(node) = stack.pop() {
        if let Some(anchor) = ElementRef::wrap(node).filter(|el| el.value().name() == "a") {
            links.push(Link {
                href: anchor.value().attr("href").unwrap_or_default().to_string(),
                text: anchor_text(anchor),
            });
            continue;
        }

        // Reversed so the first child is popped (visited) first
        stack.extend(node.children().rev());
    }

    links
}

// Joins every text node under the anchor with spaces, then collapses
// whitespace. Comments are not text nodes, so they never show up here.
fn anchor_text(anchor: ElementRef<'_>) -> String {
    let joined = anchor.text().collect::<Vec<_>>().join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not Selector::parse("a")?
//    - A selector would also match anchors nested inside other anchors
//    - We want each anchor's subtree to belong to that anchor only
//
// 2. Duplicate href attributes
//    - html5ever keeps the first occurrence and drops the rest while
//      parsing, so attr("href") already returns the first one
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn links_in(html: &str) -> Vec<Link> {
        extract_links(&Html::parse_document(html))
    }

    fn link(href: &str, text: &str) -> Link {
        Link {
            href: href.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_collapses_whitespace() {
        let links = links_in("<a href=\"/x\">  Hello\n  World </a>");
        assert_eq!(links, vec![link("/x", "Hello World")]);
    }

    #[test]
    fn test_nested_inline_elements() {
        let links = links_in(r#"<a href="/x"><b>Hello</b> <i>World</i></a>"#);
        assert_eq!(links, vec![link("/x", "Hello World")]);
    }

    #[test]
    fn test_adjacent_text_nodes_are_separated() {
        let links = links_in(r#"<a href="/x"><span>Hello</span><span>World</span></a>"#);
        assert_eq!(links, vec![link("/x", "Hello World")]);
    }

    #[test]
    fn test_document_order() {
        let html = r#"
            <html><body>
              <nav><ul>
                <li><a href="/one">One</a></li>
                <li><div><a href="/two">Two</a></div></li>
              </ul></nav>
              <footer><a href="https://other.example/three">Three</a></footer>
            </body></html>
        "#;
        let links = links_in(html);
        assert_eq!(
            links,
            vec![
                link("/one", "One"),
                link("/two", "Two"),
                link("https://other.example/three", "Three"),
            ]
        );
    }

    #[test]
    fn test_missing_href_is_empty() {
        let links = links_in("<a name=\"top\">Top</a>");
        assert_eq!(links, vec![link("", "Top")]);
    }

    #[test]
    fn test_first_duplicate_href_wins() {
        let links = links_in(r#"<a href="/first" href="/second">Dup</a>"#);
        assert_eq!(links, vec![link("/first", "Dup")]);
    }

    #[test]
    fn test_comments_are_not_text() {
        let links = links_in("<a href=\"/x\">Dog <!-- a comment --> Cat</a>");
        assert_eq!(links, vec![link("/x", "Dog Cat")]);
    }

    #[test]
    fn test_non_http_hrefs_are_kept_raw() {
        let links = links_in(r##"<a href="mailto:x@y.com">Mail</a><a href="#top"></a>"##);
        assert_eq!(links, vec![link("mailto:x@y.com", "Mail"), link("#top", "")]);
    }

    #[test]
    fn test_no_anchors() {
        assert!(links_in("<p>No links here</p>").is_empty());
        assert!(links_in("").is_empty());
    }
}
