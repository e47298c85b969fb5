//! Container fallback transcode.

use super::run_ffmpeg;
use crate::Result;
use std::path::Path;
use std::process::Command;

/// Transcode a stream delivered in a raw container (webm) to the
/// deliverable mp4 format, losslessly for video.
///
/// Used when a session only ships the `.webm` variant of a media stream.
pub fn transcode_to_mp4(input: &Path, output: &Path) -> Result<()> {
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        "transcoding stream to mp4"
    );

    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-y", "-i"])
        .arg(input)
        .args(["-c:a", "aac", "-c:v", "libx264", "-crf", "0"])
        .args(["-preset", "ultrafast"])
        .arg(output);

    run_ffmpeg(cmd)
}
