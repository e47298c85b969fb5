//! Stream sub-range extraction.

use super::{run_ffmpeg, scale_pad_filter, secs_arg};
use crate::Result;
use std::path::Path;
use std::process::Command;

/// Re-encode the sub-range `[start_secs, start_secs + duration_secs)` of a
/// continuous stream into a segment at the deliverable frame size.
///
/// Used for screen-share intervals, where the source is already video and
/// no intermediate frame extraction is needed.
pub fn extract_segment(
    input: &Path,
    start_secs: f64,
    duration_secs: f64,
    output: &Path,
) -> Result<()> {
    tracing::info!(
        input = %input.display(),
        start_secs,
        duration_secs,
        output = %output.display(),
        "extracting stream segment"
    );

    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-y", "-ss"])
        .arg(secs_arg(start_secs))
        .arg("-i")
        .arg(input)
        .arg("-t")
        .arg(secs_arg(duration_secs))
        .arg("-vf")
        .arg(scale_pad_filter())
        .args(["-preset", "ultrafast"])
        .arg(output);

    run_ffmpeg(cmd)
}
