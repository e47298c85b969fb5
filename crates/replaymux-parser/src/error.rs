//! Error types for replaymux-parser.

/// Result type alias using our ParseError type.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors raised while reading a session asset.
///
/// Any of these on a required asset means the whole timeline is unusable,
/// so callers treat them as fatal.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// An element the format guarantees is missing.
    #[error("missing element: {element}")]
    MissingElement { element: String },

    /// An attribute the format guarantees is missing.
    #[error("missing attribute {attribute} on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    /// A numeric field could not be parsed.
    #[error("invalid number in {field}: {value:?}")]
    InvalidNumber { field: String, value: String },
}

impl ParseError {
    /// Create a missing element error.
    pub fn missing_element(element: impl Into<String>) -> Self {
        Self::MissingElement {
            element: element.into(),
        }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Create an invalid number error.
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }
}
