//! Slide-event log reader.
//!
//! `shapes.svg` records the slide timeline as a flat sequence of SVG
//! `<image>` elements carrying non-standard `in`/`out` attributes (seconds,
//! session-relative) next to the usual `xlink:href` image reference. One
//! designated href suffix marks intervals where a screen share was active
//! instead of a still slide.

use crate::{ParseError, Result};
use std::collections::BTreeSet;

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Href suffix marking a screen-share interval rather than a still image.
pub const DESKSHARE_HREF_SUFFIX: &str = "/deskshare.png";

/// One slide-change record from the event log.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideEvent {
    /// Identifying label, e.g. `image12`. Segment files are named after it.
    pub id: String,
    /// Image reference, relative to the session asset root.
    pub href: String,
    /// Interval start in seconds.
    pub in_secs: f64,
    /// Interval end in seconds.
    pub out_secs: f64,
}

impl SlideEvent {
    /// Whether this event marks a screen-share interval.
    pub fn is_deskshare(&self) -> bool {
        self.href.ends_with(DESKSHARE_HREF_SUFFIX)
    }
}

/// Parse the slide-event log into records, in document order.
pub fn parse(document: &str) -> Result<Vec<SlideEvent>> {
    let doc = roxmltree::Document::parse(document)?;

    doc.descendants()
        .filter(|node| node.has_tag_name("image"))
        .map(|node| {
            let id = require_attr(&node, "id")?;
            let href = node
                .attribute((XLINK_NS, "href"))
                .or_else(|| node.attribute("href"))
                .ok_or_else(|| ParseError::missing_attribute("image", "xlink:href"))?
                .to_string();
            let in_secs = require_secs(&node, "in")?;
            let out_secs = require_secs(&node, "out")?;
            Ok(SlideEvent {
                id,
                href,
                in_secs,
                out_secs,
            })
        })
        .collect()
}

/// Every distinct image reference in the log, in stable order.
///
/// The deskshare placeholder is included; fetching it is allowed to fail.
pub fn image_hrefs(document: &str) -> Result<BTreeSet<String>> {
    let doc = roxmltree::Document::parse(document)?;

    Ok(doc
        .descendants()
        .filter(|node| node.has_tag_name("image"))
        .filter_map(|node| {
            node.attribute((XLINK_NS, "href"))
                .or_else(|| node.attribute("href"))
        })
        .map(str::to_string)
        .collect())
}

fn require_attr(node: &roxmltree::Node<'_, '_>, name: &str) -> Result<String> {
    node.attribute(name)
        .map(str::to_string)
        .ok_or_else(|| ParseError::missing_attribute("image", name))
}

fn require_secs(node: &roxmltree::Node<'_, '_>, name: &str) -> Result<f64> {
    let raw = node
        .attribute(name)
        .ok_or_else(|| ParseError::missing_attribute("image", name))?;
    raw.trim()
        .parse()
        .map_err(|_| ParseError::invalid_number(format!("image/@{name}"), raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"
         xmlns:xlink="http://www.w3.org/1999/xlink" version="1.1">
      <image id="image1" in="0.0" out="11.9" class="slide"
             xlink:href="presentation/d2e1/slide-1.png" width="1600" height="1200"/>
      <image id="image2" in="11.9" out="27.5" class="slide"
             xlink:href="presentation/deskshare/deskshare.png" width="1600" height="1200"/>
      <image id="image3" in="27.5" out="30.0" class="slide"
             xlink:href="presentation/d2e1/slide-1.png" width="1600" height="1200"/>
    </svg>"#;

    #[test]
    fn test_parse_document_order() {
        let events = parse(SAMPLE).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].id, "image1");
        assert_eq!(events[0].href, "presentation/d2e1/slide-1.png");
        assert_eq!(events[0].in_secs, 0.0);
        assert_eq!(events[0].out_secs, 11.9);
        assert_eq!(events[2].id, "image3");
    }

    #[test]
    fn test_deskshare_marker() {
        let events = parse(SAMPLE).unwrap();
        assert!(!events[0].is_deskshare());
        assert!(events[1].is_deskshare());
    }

    #[test]
    fn test_image_hrefs_deduplicated() {
        let hrefs = image_hrefs(SAMPLE).unwrap();
        assert_eq!(hrefs.len(), 2);
        assert!(hrefs.contains("presentation/d2e1/slide-1.png"));
        assert!(hrefs.contains("presentation/deskshare/deskshare.png"));
    }

    #[test]
    fn test_missing_interval_attribute() {
        let doc = r#"<svg xmlns:xlink="http://www.w3.org/1999/xlink">
            <image id="image1" in="0.0" xlink:href="a.png"/></svg>"#;
        let err = parse(doc).unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute { .. }));
    }

    #[test]
    fn test_bad_number() {
        let doc = r#"<svg xmlns:xlink="http://www.w3.org/1999/xlink">
            <image id="image1" in="zero" out="1.0" xlink:href="a.png"/></svg>"#;
        let err = parse(doc).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { .. }));
    }

    #[test]
    fn test_not_xml() {
        assert!(parse("{\"not\": \"xml\"}").is_err());
    }
}
