//! Replaymux-Common: shared types and utilities.
//!
//! This crate provides the pieces every other replaymux crate agrees on:
//!
//! - **SessionId**: the opaque meeting identifier extracted from a playback link
//! - **SessionLayout**: every on-disk path of a session working directory
//! - **Error Handling**: the common error type and result alias
//!
//! # Examples
//!
//! ```
//! use replaymux_common::{SessionId, SessionLayout};
//!
//! let id = SessionId::from_playback_url(
//!     "https://bbb.example.org/playback/presentation/2.0/playback.html?meetingId=abc123-456",
//! )?;
//! assert_eq!(id.as_str(), "abc123-456");
//!
//! let layout = SessionLayout::new("work", &id);
//! assert!(layout.shapes_svg().ends_with("work/abc123-456/shapes.svg"));
//! # Ok::<(), replaymux_common::Error>(())
//! ```

pub mod error;
pub mod layout;
pub mod session;

pub use error::{Error, Result};
pub use layout::SessionLayout;
pub use session::SessionId;
