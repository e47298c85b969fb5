//! Audio track extraction.

use super::{run_ffmpeg, secs_arg};
use crate::Result;
use std::path::Path;
use std::process::Command;

/// Extract the audio track of a stream, copied without re-encoding and
/// trimmed to the session duration.
pub fn extract_audio(input: &Path, duration_secs: f64, output: &Path) -> Result<()> {
    tracing::info!(
        input = %input.display(),
        duration_secs,
        output = %output.display(),
        "extracting audio track"
    );

    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-y", "-ss", "0s", "-i"])
        .arg(input)
        .arg("-t")
        .arg(secs_arg(duration_secs))
        .args(["-vn", "-c:a", "copy"])
        .arg(output);

    run_ffmpeg(cmd)
}
