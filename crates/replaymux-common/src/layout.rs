//! On-disk layout of a session working directory.
//!
//! Every artifact the pipeline reads or writes lives under one directory
//! named after the session. Raw fetched assets mirror their remote relative
//! paths; derived artifacts go under `output-video/`. A file's existence is
//! the only persisted state the pipeline has, so these paths are the
//! complete description of its progress.

use crate::SessionId;
use std::path::{Path, PathBuf};

/// Relative path of the slide-event log.
pub const SHAPES_SVG: &str = "shapes.svg";
/// Relative path of the session metadata document.
pub const METADATA_XML: &str = "metadata.xml";
/// Candidate relative paths of the webcam stream, in priority order.
pub const WEBCAMS_CANDIDATES: [&str; 2] = ["video/webcams.mp4", "video/webcams.webm"];
/// Candidate relative paths of the screen-share stream, in priority order.
pub const DESKSHARE_CANDIDATES: [&str; 2] = ["deskshare/deskshare.mp4", "deskshare/deskshare.webm"];
/// Optional metadata assets the resolver fetches without requiring them.
pub const OPTIONAL_ASSETS: [&str; 6] = [
    "panzooms.xml",
    "cursor.xml",
    "deskshare.xml",
    "captions.json",
    "presentation_text.json",
    "slides_new.xml",
];

/// Paths of everything a single session run touches.
#[derive(Debug, Clone)]
pub struct SessionLayout {
    root: PathBuf,
}

impl SessionLayout {
    /// Layout rooted at `<work_root>/<session id>`.
    pub fn new<P: AsRef<Path>>(work_root: P, id: &SessionId) -> Self {
        Self {
            root: work_root.as_ref().join(id.as_str()),
        }
    }

    /// Layout over an already-downloaded session directory.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            root: dir.as_ref().to_path_buf(),
        }
    }

    /// The session working directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Local path of a fetched asset, mirroring its remote relative path.
    pub fn asset(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// The slide-event log.
    pub fn shapes_svg(&self) -> PathBuf {
        self.asset(SHAPES_SVG)
    }

    /// The session metadata document.
    pub fn metadata_xml(&self) -> PathBuf {
        self.asset(METADATA_XML)
    }

    /// The webcam stream in its deliverable format.
    pub fn webcams(&self) -> PathBuf {
        self.asset(WEBCAMS_CANDIDATES[0])
    }

    /// The screen-share stream in its deliverable format.
    pub fn deskshare(&self) -> PathBuf {
        self.asset(DESKSHARE_CANDIDATES[0])
    }

    /// Directory holding all derived artifacts.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join("output-video")
    }

    /// Directory holding one encoded video per slide event.
    pub fn slides_dir(&self) -> PathBuf {
        self.output_dir().join("slides")
    }

    /// Encoded segment for one slide event, named by the event label.
    pub fn segment(&self, label: &str) -> PathBuf {
        self.slides_dir().join(format!("{label}.mp4"))
    }

    /// All per-event segments concatenated.
    pub fn slide_video(&self) -> PathBuf {
        self.output_dir().join("video-slides.mp4")
    }

    /// Audio track extracted from the webcam stream.
    pub fn audio(&self) -> PathBuf {
        self.output_dir().join("audio-slides.m4a")
    }

    /// Downscaled picture-in-picture webcam clip.
    pub fn overlay(&self) -> PathBuf {
        self.output_dir().join("overlay-webcams.mp4")
    }

    /// The final deliverable.
    pub fn final_video(&self) -> PathBuf {
        self.output_dir().join("final.mp4")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> SessionLayout {
        let id = SessionId::from_playback_url(
            "https://x/playback/presentation/2.0/playback.html?meetingId=m-1",
        )
        .unwrap();
        SessionLayout::new("work", &id)
    }

    #[test]
    fn test_assets_mirror_remote_paths() {
        let l = layout();
        assert_eq!(l.shapes_svg(), PathBuf::from("work/m-1/shapes.svg"));
        assert_eq!(
            l.asset("presentation/deadbeef/slide-1.png"),
            PathBuf::from("work/m-1/presentation/deadbeef/slide-1.png")
        );
        assert_eq!(l.webcams(), PathBuf::from("work/m-1/video/webcams.mp4"));
    }

    #[test]
    fn test_output_tree() {
        let l = layout();
        assert_eq!(
            l.segment("image12"),
            PathBuf::from("work/m-1/output-video/slides/image12.mp4")
        );
        assert_eq!(
            l.final_video(),
            PathBuf::from("work/m-1/output-video/final.mp4")
        );
    }

    #[test]
    fn test_from_dir() {
        let l = SessionLayout::from_dir("some/session");
        assert_eq!(l.audio(), PathBuf::from("some/session/output-video/audio-slides.m4a"));
    }
}
