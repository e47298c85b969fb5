//! Lossless segment concatenation.

use super::run_ffmpeg;
use crate::Result;
use std::path::Path;
use std::process::Command;

/// Concatenate pre-encoded segments listed in a concat-demuxer file,
/// copying streams without re-encoding.
///
/// The list file uses ffmpeg's concat format, one `file '<path>'` line per
/// segment, already in playback order.
pub fn concat_copy(list_file: &Path, output: &Path) -> Result<()> {
    tracing::info!(
        list_file = %list_file.display(),
        output = %output.display(),
        "concatenating segments"
    );

    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-y", "-f", "concat", "-safe", "0", "-i"])
        .arg(list_file)
        .args(["-c", "copy"])
        .arg(output);

    run_ffmpeg(cmd)
}
