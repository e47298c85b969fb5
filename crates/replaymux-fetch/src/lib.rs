//! # replaymux-fetch
//!
//! The download side of the pipeline:
//!
//! - [`Fetcher`] transfers one remote resource to its mirrored local path,
//!   resuming partial transfers with byte-range requests and never touching
//!   the network for an asset that is already on disk.
//! - [`resolver`] enumerates everything a session needs — the required
//!   metadata documents, every slide image referenced by the event log, the
//!   optional extras, and the two media streams — and drives the fetcher
//!   for each.
//!
//! All durable state is the filesystem: a finished asset sits at its final
//! path, an interrupted one at `<name>.part`. Re-running a download is
//! always safe and only transfers what is missing.

pub mod fetcher;
pub mod resolver;

mod error;

pub use error::{Error, Result};
pub use fetcher::{FetchOutcome, Fetcher};
pub use resolver::resolve_session;
