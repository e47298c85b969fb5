//! Image-sequence encoding.

use super::{run_ffmpeg, scale_pad_filter};
use crate::Result;
use std::path::Path;
use std::process::Command;

/// Encode a directory of numbered frames into one video segment.
///
/// The directory must contain files named `image<N>.png` for every frame
/// index in the segment's range. `start_number` is the first index, which
/// keeps the segment aligned with the global frame timeline.
pub fn encode_image_sequence(
    frames_dir: &Path,
    start_number: u64,
    frame_rate: u32,
    output: &Path,
) -> Result<()> {
    tracing::info!(
        frames_dir = %frames_dir.display(),
        start_number,
        frame_rate,
        output = %output.display(),
        "encoding image sequence"
    );

    let pattern = frames_dir.join("image%d.png");

    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-y", "-framerate"])
        .arg(frame_rate.to_string())
        .arg("-start_number")
        .arg(start_number.to_string())
        .arg("-i")
        .arg(pattern)
        .args(["-c:v", "libx264", "-pix_fmt", "yuv420p", "-vf"])
        .arg(scale_pad_filter())
        .args(["-preset", "ultrafast"])
        .arg(output);

    run_ffmpeg(cmd)
}
