//! Engine invocations.
//!
//! One function per pipeline operation. Every function here builds a single
//! ffmpeg command line, runs it to completion, and surfaces stderr on a
//! non-zero exit. The argument sets target a fixed deliverable frame size:
//! sources are scaled down to fit and padded to center.

mod audio;
mod concat;
mod encode;
mod extract;
mod overlay;
mod transcode;

pub use audio::extract_audio;
pub use concat::concat_copy;
pub use encode::encode_image_sequence;
pub use extract::extract_segment;
pub use overlay::{overlay_merge, scale_overlay};
pub use transcode::transcode_to_mp4;

use crate::{Error, Result};
use std::process::Command;

/// Deliverable frame width in pixels.
pub const FRAME_WIDTH: u32 = 1920;
/// Deliverable frame height in pixels.
pub const FRAME_HEIGHT: u32 = 1080;

/// Video filter that fits a source into the deliverable frame: scale down
/// preserving aspect ratio, then pad to full size with centered content.
pub(crate) fn scale_pad_filter() -> String {
    format!(
        "scale={w}:{h}:force_original_aspect_ratio=decrease,pad={w}:{h}:(ow-iw)/2:(oh-ih)/2",
        w = FRAME_WIDTH,
        h = FRAME_HEIGHT
    )
}

/// Format a seconds value the way ffmpeg expects duration arguments.
pub(crate) fn secs_arg(secs: f64) -> String {
    format!("{}s", secs)
}

/// Run a fully-assembled ffmpeg command, mapping spawn and exit failures.
pub(crate) fn run_ffmpeg(mut cmd: Command) -> Result<()> {
    tracing::debug!(?cmd, "invoking ffmpeg");

    let output = cmd.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::tool_not_found("ffmpeg")
        } else {
            Error::Io(e)
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed("ffmpeg", stderr.to_string()));
    }

    Ok(())
}
