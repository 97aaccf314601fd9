use thiserror::Error;

/// Errors raised while decoding a byte payload into a [`LiveMap`](crate::LiveMap)
///
/// The underlying `serde_json` error is kept as-is and is reachable through
/// [`std::error::Error::source`] or [`DecodeError::into_inner`].
#[derive(Debug, Error)]
#[error("failed to decode document: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

impl DecodeError {
    /// Returns the decoder error this wraps
    pub fn inner(&self) -> &serde_json::Error {
        &self.0
    }

    /// Consumes the error and returns the decoder error
    pub fn into_inner(self) -> serde_json::Error {
        self.0
    }

    /// Line of the payload where decoding failed (1-based)
    pub fn line(&self) -> usize {
        self.0.line()
    }

    /// Column of the payload where decoding failed (1-based)
    pub fn column(&self) -> usize {
        self.0.column()
    }
}

/// Errors that can occur when reading values out of a `LiveMap`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A path segment was not present in its container
    #[error("key not found: {0:?}")]
    KeyNotFound(String),
    /// A non-final path segment held something other than an object
    #[error("cannot descend into {key:?}: value is {found}, not an object")]
    NotAContainer { key: String, found: &'static str },
    /// The stored value has a kind that cannot become the requested type
    #[error("expected type '{expected}', got unconvertible type '{found}'")]
    Unconvertible {
        expected: &'static str,
        found: &'static str,
    },
    /// A string value did not parse as the requested type
    #[error("invalid {expected} literal {literal:?}")]
    InvalidLiteral {
        expected: &'static str,
        literal: String,
    },
    /// A string value parsed but does not fit the requested type
    #[error("{expected} literal {literal:?} is out of range")]
    OutOfRange {
        expected: &'static str,
        literal: String,
    },
}
