//! Common error types used throughout replaymux.

/// Common error type for replaymux.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The given URL is not a recognized playback link.
    #[error("not a valid playback URL: {0}")]
    InvalidUrl(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new InvalidUrl error.
    pub fn invalid_url<S: Into<String>>(url: S) -> Self {
        Self::InvalidUrl(url.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_url("http://example.org/watch?v=1");
        assert_eq!(
            err.to_string(),
            "not a valid playback URL: http://example.org/watch?v=1"
        );

        let err = Error::internal("unexpected state");
        assert_eq!(err.to_string(), "internal error: unexpected state");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }
}
