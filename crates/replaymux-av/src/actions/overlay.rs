//! Picture-in-picture overlay generation and the final merge.

use super::{run_ffmpeg, secs_arg};
use crate::Result;
use std::path::Path;
use std::process::Command;

/// Downscale a stream into a small silent clip for use as an overlay.
pub fn scale_overlay(
    input: &Path,
    duration_secs: f64,
    size: (u32, u32),
    output: &Path,
) -> Result<()> {
    tracing::info!(
        input = %input.display(),
        duration_secs,
        width = size.0,
        height = size.1,
        output = %output.display(),
        "generating overlay clip"
    );

    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-y", "-i"])
        .arg(input)
        .arg("-t")
        .arg(secs_arg(duration_secs))
        .arg("-s")
        .arg(format!("{}x{}", size.0, size.1))
        .args(["-an", "-preset", "ultrafast"])
        .arg(output);

    run_ffmpeg(cmd)
}

/// Composite slide video, audio track, and overlay clip into the final
/// deliverable. The overlay is placed at a fixed pixel offset and the whole
/// output is trimmed to the session duration.
pub fn overlay_merge(
    video: &Path,
    audio: &Path,
    overlay: &Path,
    position: (u32, u32),
    duration_secs: f64,
    output: &Path,
) -> Result<()> {
    tracing::info!(
        video = %video.display(),
        audio = %audio.display(),
        overlay = %overlay.display(),
        duration_secs,
        output = %output.display(),
        "merging final deliverable"
    );

    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-y", "-i"])
        .arg(video)
        .arg("-i")
        .arg(audio)
        .arg("-i")
        .arg(overlay)
        .arg("-filter_complex")
        .arg(format!("overlay={}:{}", position.0, position.1))
        .arg("-t")
        .arg(secs_arg(duration_secs))
        .args(["-preset", "ultrafast"])
        .arg(output);

    run_ffmpeg(cmd)
}
