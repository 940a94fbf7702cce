//! Error types for link parsing and outbound rendering
//!
//! Every failure of [`crate::convert`] is fatal for that link; softer problems
//! (non-UUID id, malformed booleans, missing optional parameters) never reach here.
//! - **InvalidFormat**: Wrong scheme (anything but `vless://`).
//! - **MissingField**: The id before `@` or the address is absent.
//! - **InvalidField**: Explicit port is not a valid u16.
//! - **UrlParseError**: The link is not a parseable URL.
//! - **JsonError**: Rendering the outbound as JSON failed.

use std::fmt;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors that can occur while converting a link
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolError {
    /// Invalid link format (e.g. wrong scheme)
    InvalidFormat(String),
    /// Missing required field
    MissingField(String),
    /// Invalid field value (e.g. port out of range)
    InvalidField(String),
    /// URL parsing error
    UrlParseError(String),
    /// JSON serialization error
    JsonError(String),
}

impl ProtocolError {
    /// Whether the error comes from a malformed link rather than from rendering.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, ProtocolError::JsonError(_))
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            ProtocolError::MissingField(msg) => write!(f, "Missing required field: {}", msg),
            ProtocolError::InvalidField(msg) => write!(f, "Invalid field value: {}", msg),
            ProtocolError::UrlParseError(msg) => write!(f, "URL parse error: {}", msg),
            ProtocolError::JsonError(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<url::ParseError> for ProtocolError {
    fn from(err: url::ParseError) -> Self {
        match err {
            url::ParseError::EmptyHost => {
                ProtocolError::MissingField(crate::constants::error_msg::MISSING_ADDRESS.to_string())
            }
            url::ParseError::InvalidPort => ProtocolError::InvalidField(format!(
                "{}: {}",
                crate::constants::error_msg::INVALID_PORT,
                err
            )),
            other => ProtocolError::UrlParseError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::JsonError(err.to_string())
    }
}
