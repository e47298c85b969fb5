//! # replaymux-av
//!
//! The external transcoding-engine layer: everything that shells out to
//! ffmpeg or ffprobe lives here.
//!
//! This crate provides:
//! - Tool detection for the required CLI binaries ([`tools`])
//! - Media probing via ffprobe JSON output ([`probe`])
//! - One invocation builder per pipeline operation ([`actions`]):
//!   image-sequence encoding, stream-range extraction, lossless concat,
//!   audio extraction, overlay scaling, final merge, and the webm → mp4
//!   fallback transcode
//!
//! Invocations are plain blocking subprocesses. Idempotency is the
//! caller's concern: nothing here checks whether an output already exists.
//!
//! ## Example
//!
//! ```no_run
//! use replaymux_av::probe;
//!
//! let info = probe::probe(std::path::Path::new("video/webcams.mp4"))?;
//! println!("duration: {:?}", info.duration_secs);
//! # Ok::<(), replaymux_av::Error>(())
//! ```

pub mod actions;
pub mod probe;
pub mod tools;

mod error;

pub use error::{Error, Result};
pub use probe::MediaInfo;
pub use tools::{check_tool, check_tools, require_tool, ToolInfo};
