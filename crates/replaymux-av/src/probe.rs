//! FFprobe-based media probing.
//!
//! The pipeline needs exactly two numbers back from the engine: the
//! duration of a stream and the frame rate of its first video track.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    r_frame_rate: Option<String>,
}

/// The subset of stream metadata the pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaInfo {
    /// Container duration in seconds, if the file advertises one.
    pub duration_secs: Option<f64>,
    /// Frame rate of the first video stream, as a fraction evaluated to f64.
    pub frame_rate: Option<f64>,
}

impl MediaInfo {
    /// Frame rate rounded to whole frames per second.
    pub fn rounded_frame_rate(&self) -> Option<u32> {
        self.frame_rate.map(|r| r.round() as u32)
    }

    /// Whether the container duration differs from another measurement
    /// by more than a second.
    pub fn duration_disagrees_with(&self, expected_secs: f64) -> bool {
        match self.duration_secs {
            Some(d) => (d - expected_secs).abs() > 1.0,
            None => false,
        }
    }
}

/// Probe a media file using ffprobe.
pub fn probe(path: &Path) -> Result<MediaInfo> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffprobe")
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed("ffprobe", stderr.to_string()));
    }

    let json_str = String::from_utf8(output.stdout)
        .map_err(|e| Error::parse_error("ffprobe", format!("Invalid UTF-8: {}", e)))?;

    let ff_output: FfprobeOutput = serde_json::from_str(&json_str)?;

    Ok(MediaInfo {
        duration_secs: ff_output.format.duration.and_then(|s| s.parse().ok()),
        frame_rate: ff_output
            .streams
            .iter()
            .find(|s| s.codec_type == "video")
            .and_then(|s| s.r_frame_rate.as_deref())
            .and_then(parse_frame_rate),
    })
}

fn parse_frame_rate(rate_str: &str) -> Option<f64> {
    let parts: Vec<&str> = rate_str.split('/').collect();
    if parts.len() == 2 {
        let num: f64 = parts[0].parse().ok()?;
        let den: f64 = parts[1].parse().ok()?;
        if den != 0.0 {
            return Some(num / den);
        }
    }
    rate_str.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate("24000/1001"), Some(23.976023976023978));
        assert_eq!(parse_frame_rate("30/1"), Some(30.0));
        assert_eq!(parse_frame_rate("25"), Some(25.0));
        assert_eq!(parse_frame_rate("invalid"), None);
    }

    #[test]
    fn test_rounded_frame_rate() {
        let info = MediaInfo {
            duration_secs: Some(10.0),
            frame_rate: Some(23.976),
        };
        assert_eq!(info.rounded_frame_rate(), Some(24));

        let info = MediaInfo {
            duration_secs: None,
            frame_rate: None,
        };
        assert_eq!(info.rounded_frame_rate(), None);
    }

    #[test]
    fn test_duration_disagrees_with() {
        let info = MediaInfo {
            duration_secs: Some(120.4),
            frame_rate: Some(30.0),
        };
        assert!(!info.duration_disagrees_with(120.0));
        assert!(info.duration_disagrees_with(90.0));

        let info = MediaInfo {
            duration_secs: None,
            frame_rate: None,
        };
        assert!(!info.duration_disagrees_with(120.0));
    }

    #[test]
    fn test_probe_missing_file() {
        let err = probe(Path::new("/nonexistent/webcams.mp4")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
