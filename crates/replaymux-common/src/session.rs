//! Session identification.
//!
//! A recorded meeting is addressed by an opaque token carried in the
//! `meetingId` query parameter of its playback link. The token doubles as
//! the name of the local working directory, so nothing else about the URL
//! is kept once it has been validated.

use crate::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Pattern of a supported playback link. The `2.x` path component covers
/// every playback frontend version that serves assets under
/// `/presentation/<meetingId>/`.
const PLAYBACK_URL_PATTERN: &str =
    r"^.*/playback/presentation/2\.\d+/playback\.html\?meetingId=(\S+)$";

fn playback_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PLAYBACK_URL_PATTERN).expect("invalid playback URL pattern"))
}

/// Opaque identifier of a recorded session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Extract the session identifier from a playback link.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL does not match the expected
    /// playback-link shape.
    pub fn from_playback_url(url: &str) -> Result<Self> {
        let captures = playback_url_regex()
            .captures(url)
            .ok_or_else(|| Error::invalid_url(url))?;
        Ok(Self(captures[1].to_string()))
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Root path of the remote asset tree for this session, absolute on the
    /// playback host (joined against the playback URL by the fetch layer).
    pub fn asset_root(&self) -> String {
        format!("/presentation/{}/", self.0)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_playback_url() {
        let id = SessionId::from_playback_url(
            "https://bbb.example.org/playback/presentation/2.0/playback.html?meetingId=d2e1f5-1618",
        )
        .unwrap();
        assert_eq!(id.as_str(), "d2e1f5-1618");
        assert_eq!(id.asset_root(), "/presentation/d2e1f5-1618/");
    }

    #[test]
    fn test_parse_playback_url_newer_frontend() {
        let id = SessionId::from_playback_url(
            "https://bbb.example.org/playback/presentation/2.3/playback.html?meetingId=abc",
        )
        .unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn test_reject_other_urls() {
        for url in [
            "https://bbb.example.org/",
            "https://bbb.example.org/playback/presentation/2.0/playback.html",
            "https://bbb.example.org/recording/abc123",
            "not a url at all",
        ] {
            assert!(
                SessionId::from_playback_url(url).is_err(),
                "accepted: {url}"
            );
        }
    }
}
