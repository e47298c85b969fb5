//! Render stage pipeline.
//!
//! The fixed final-assembly sequence: concatenate per-event segments, pull
//! the audio track, build the picture-in-picture overlay, merge. Every
//! stage is gated on its output artifact already existing, so re-running
//! the pipeline after a failure re-enters at the first incomplete stage
//! and redoes nothing.

use anyhow::{Context, Result};
use regex::Regex;
use replaymux_common::SessionLayout;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Overlay clip size in pixels.
const OVERLAY_SIZE: (u32, u32) = (320, 240);
/// Overlay position inside the deliverable frame.
const OVERLAY_POSITION: (u32, u32) = (1540, 780);

fn segment_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^image(\d+)\.mp4$").expect("invalid segment name pattern"))
}

/// Drives the four assembly stages for one session.
pub struct RenderPipeline<'a> {
    layout: &'a SessionLayout,
    duration_secs: f64,
}

impl<'a> RenderPipeline<'a> {
    pub fn new(layout: &'a SessionLayout, duration_secs: f64) -> Self {
        Self {
            layout,
            duration_secs,
        }
    }

    /// Run all stages in order. Returns the path of the final deliverable.
    pub fn run(&self) -> Result<PathBuf> {
        fs::create_dir_all(self.layout.output_dir())
            .with_context(|| format!("creating {}", self.layout.output_dir().display()))?;

        self.concat().context("concat stage failed")?;
        self.extract_audio().context("audio extraction stage failed")?;
        self.generate_overlay().context("overlay stage failed")?;
        self.merge().context("merge stage failed")?;

        Ok(self.layout.final_video())
    }

    fn concat(&self) -> Result<()> {
        let output = self.layout.slide_video();
        if output.exists() {
            tracing::info!(output = %output.display(), "slide video exists, skipping concat");
            return Ok(());
        }

        let segments = ordered_segments(&self.layout.slides_dir())?;
        anyhow::ensure!(!segments.is_empty(), "no slide segments to concatenate");

        let list_file = self.layout.output_dir().join("segments.txt");
        let mut list = String::new();
        for segment in &segments {
            let absolute = fs::canonicalize(segment)
                .with_context(|| format!("resolving {}", segment.display()))?;
            list.push_str(&format!("file '{}'\n", absolute.display()));
        }
        fs::write(&list_file, list)
            .with_context(|| format!("writing {}", list_file.display()))?;

        replaymux_av::actions::concat_copy(&list_file, &output)?;
        let _ = fs::remove_file(&list_file);

        Ok(())
    }

    fn extract_audio(&self) -> Result<()> {
        let output = self.layout.audio();
        if output.exists() {
            tracing::info!(output = %output.display(), "audio track exists, skipping extraction");
            return Ok(());
        }

        let webcams = self.layout.webcams();
        anyhow::ensure!(
            webcams.exists(),
            "webcam stream missing: {}",
            webcams.display()
        );

        replaymux_av::actions::extract_audio(&webcams, self.duration_secs, &output)?;
        Ok(())
    }

    fn generate_overlay(&self) -> Result<()> {
        let output = self.layout.overlay();
        if output.exists() {
            tracing::info!(output = %output.display(), "overlay clip exists, skipping");
            return Ok(());
        }

        replaymux_av::actions::scale_overlay(
            &self.layout.webcams(),
            self.duration_secs,
            OVERLAY_SIZE,
            &output,
        )?;
        Ok(())
    }

    fn merge(&self) -> Result<()> {
        let output = self.layout.final_video();
        if output.exists() {
            tracing::info!(output = %output.display(), "final deliverable exists, skipping merge");
            return Ok(());
        }

        replaymux_av::actions::overlay_merge(
            &self.layout.slide_video(),
            &self.layout.audio(),
            &self.layout.overlay(),
            OVERLAY_POSITION,
            self.duration_secs,
            &output,
        )?;
        Ok(())
    }
}

/// Collect segment files in timeline order.
///
/// Order comes from the numeric index embedded in each filename, not from
/// lexical sorting, so `image10.mp4` follows `image2.mp4`.
pub fn ordered_segments(slides_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut indexed: Vec<(u64, PathBuf)> = Vec::new();

    for entry in fs::read_dir(slides_dir)
        .with_context(|| format!("reading {}", slides_dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        match segment_name_regex()
            .captures(&name)
            .and_then(|c| c[1].parse::<u64>().ok())
        {
            Some(index) => indexed.push((index, entry.path())),
            None => tracing::warn!(file = %name, "unrecognized file in slides directory, ignored"),
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_segment_ordering() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["image2.mp4", "image10.mp4", "image1.mp4"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let names: Vec<String> = ordered_segments(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["image1.mp4", "image2.mp4", "image10.mp4"]);
    }

    #[test]
    fn test_non_segment_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("image1.mp4"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("image9-frames-x")).unwrap();

        let segments = ordered_segments(dir.path()).unwrap();
        assert_eq!(segments.len(), 1);
    }
}
