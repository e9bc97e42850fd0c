// src/sitemap.rs
// =============================================================================
// Renders crawl results for standard output.
//
// Two formats:
// - XML sitemap (https://www.sitemaps.org/protocol.html), the default
// - JSON, with the depth of every page and any recorded failures (--json)
//
// Example XML for two pages:
//   <?xml version="1.0" encoding="UTF-8"?>
//   <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//     <url>
//       <loc>https://example.com/</loc>
//     </url>
//     <url>
//       <loc>https://example.com/about</loc>
//     </url>
//   </urlset>
// =============================================================================

use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::crawl::{CrawlReport, VisitRecord};

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Renders the pages as a sitemap `urlset` document.
pub fn render_xml(pages: &[VisitRecord]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
    ))?;

    for page in pages {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        writer.write_event(Event::Start(BytesStart::new("loc")))?;
        // BytesText::new escapes &, < and > for us
        writer.write_event(Event::Text(BytesText::new(&page.url)))?;
        writer.write_event(Event::End(BytesEnd::new("loc")))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

/// Renders the full report (pages with depth, failures) as pretty JSON.
pub fn render_json(report: &CrawlReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::FailedFetch;

    fn record(url: &str, depth: usize) -> VisitRecord {
        VisitRecord {
            url: url.to_string(),
            depth,
        }
    }

    #[test]
    fn test_render_xml() {
        let pages = vec![
            record("https://example.com/", 0),
            record("https://example.com/about", 1),
        ];
        let xml = render_xml(&pages).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/about</loc>"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_render_xml_escapes_urls() {
        let xml = render_xml(&[record("https://example.com/?a=1&b=2", 0)]).unwrap();
        assert!(xml.contains("<loc>https://example.com/?a=1&amp;b=2</loc>"));
    }

    #[test]
    fn test_render_xml_without_pages() {
        let xml = render_xml(&[]).unwrap();
        assert!(xml.contains("<urlset"));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_render_json() {
        let report = CrawlReport {
            pages: vec![record("https://example.com/", 0)],
            failures: vec![FailedFetch {
                url: "https://example.com/gone".to_string(),
                depth: 1,
                error: "HTTP 404".to_string(),
            }],
            cancelled: false,
        };

        let json: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();

        assert_eq!(json["pages"][0]["url"], "https://example.com/");
        assert_eq!(json["pages"][0]["depth"], 0);
        assert_eq!(json["failures"][0]["error"], "HTTP 404");
        assert_eq!(json["cancelled"], false);
    }
}
