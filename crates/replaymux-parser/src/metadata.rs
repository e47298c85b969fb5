//! Session metadata reader.
//!
//! `metadata.xml` carries a lot of meeting bookkeeping; the pipeline only
//! needs the playback duration, nested as
//! `<recording><playback><duration>` in milliseconds.

use crate::{ParseError, Result};

/// Read the session duration in seconds from a metadata document.
pub fn duration_secs(document: &str) -> Result<f64> {
    let doc = roxmltree::Document::parse(document)?;

    let playback = doc
        .descendants()
        .find(|node| node.has_tag_name("playback"))
        .ok_or_else(|| ParseError::missing_element("playback"))?;

    let duration = playback
        .children()
        .find(|node| node.has_tag_name("duration"))
        .ok_or_else(|| ParseError::missing_element("playback/duration"))?;

    let raw = duration.text().unwrap_or_default().trim();
    let millis: f64 = raw
        .parse()
        .map_err(|_| ParseError::invalid_number("playback/duration", raw))?;

    Ok(millis / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_millis_to_secs() {
        let doc = r#"<recording>
            <id>d2e1f5</id>
            <playback>
                <format>presentation</format>
                <duration>754815</duration>
            </playback>
        </recording>"#;
        assert_eq!(duration_secs(doc).unwrap(), 754.815);
    }

    #[test]
    fn test_missing_playback() {
        let doc = "<recording><id>x</id></recording>";
        assert!(matches!(
            duration_secs(doc).unwrap_err(),
            ParseError::MissingElement { .. }
        ));
    }

    #[test]
    fn test_missing_duration() {
        let doc = "<recording><playback><format>p</format></playback></recording>";
        assert!(matches!(
            duration_secs(doc).unwrap_err(),
            ParseError::MissingElement { .. }
        ));
    }

    #[test]
    fn test_non_numeric_duration() {
        let doc = "<recording><playback><duration>soon</duration></playback></recording>";
        assert!(matches!(
            duration_secs(doc).unwrap_err(),
            ParseError::InvalidNumber { .. }
        ));
    }
}
