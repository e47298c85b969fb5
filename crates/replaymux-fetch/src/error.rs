//! Error types for replaymux-fetch.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving and downloading session assets.
///
/// "Resource not found" is deliberately not in here: an absent optional
/// asset is a normal outcome reported through
/// [`FetchOutcome::NotFound`](crate::FetchOutcome), not an error. Only an
/// absent *required* asset becomes [`Error::RequiredMissing`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A hard transport failure (connect, TLS, protocol).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An I/O error occurred writing an asset to disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required asset does not exist on the remote.
    #[error("required asset missing: {path}")]
    RequiredMissing { path: String },

    /// A transfer could not be completed even with resumption.
    #[error("transfer failed for {path}: {message}")]
    TransferFailed { path: String, message: String },

    /// An asset path could not be joined onto the session root URL.
    #[error("bad asset path {path}: {message}")]
    BadAssetPath { path: String, message: String },

    /// Session identification failed.
    #[error(transparent)]
    Session(#[from] replaymux_common::Error),

    /// The slide-event log could not be parsed.
    #[error("malformed slide-event log: {0}")]
    Parse(#[from] replaymux_parser::ParseError),

    /// The fallback transcode of a raw media stream failed.
    #[error(transparent)]
    Av(#[from] replaymux_av::Error),
}

impl Error {
    /// Create a required asset missing error.
    pub fn required_missing(path: impl Into<String>) -> Self {
        Self::RequiredMissing { path: path.into() }
    }

    /// Create a transfer failed error.
    pub fn transfer_failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransferFailed {
            path: path.into(),
            message: message.into(),
        }
    }
}
