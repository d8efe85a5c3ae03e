//! Error types for the sat-vision-core library.
//!
//! This module provides granular error variants for different failure modes,
//! enabling precise error handling and user-friendly error messages.

use thiserror::Error;

/// Fixed message shown when the service has no record for a filename,
/// or when its response cannot be decoded. Both failure modes collapse
/// to this one user-visible string.
pub const LOOKUP_FAILED_MESSAGE: &str = "Classification data not found for this satellite image";

/// Generic fallback message for any other classify failure.
pub const CLASSIFY_FAILED_MESSAGE: &str = "Failed to classify satellite imagery";

/// Errors that can occur within the sat-vision-core library.
///
/// Each variant represents a specific failure mode with contextual information
/// to help diagnose and handle errors appropriately.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (invalid base URL, bad values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The prediction service returned a non-success status or was unreachable.
    #[error("Prediction lookup failed: {0}")]
    Lookup(String),

    /// The prediction service response did not match the expected shape.
    #[error("Prediction response could not be decoded: {0}")]
    Parse(String),

    /// Image preview decoding failed.
    #[error("Preview decoding failed: {0}")]
    Preview(String),

    /// UI-related errors (rendering, window management).
    #[error("UI error: {0}")]
    Ui(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a lookup error with the given message.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Creates a parse error with the given message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates a preview error with the given message.
    pub fn preview(msg: impl Into<String>) -> Self {
        Self::Preview(msg.into())
    }

    /// Creates a UI error with the given message.
    pub fn ui(msg: impl Into<String>) -> Self {
        Self::Ui(msg.into())
    }

    /// The single message shown to the user for this error.
    ///
    /// Lookup and parse failures are deliberately indistinguishable here:
    /// both mean "no usable classification record for this image".
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Lookup(_) | Self::Parse(_) => LOOKUP_FAILED_MESSAGE,
            _ => CLASSIFY_FAILED_MESSAGE,
        }
    }
}

/// A convenient alias for Result with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_parse_collapse_to_one_message() {
        assert_eq!(
            AppError::lookup("404").user_message(),
            LOOKUP_FAILED_MESSAGE
        );
        assert_eq!(
            AppError::parse("missing field").user_message(),
            LOOKUP_FAILED_MESSAGE
        );
    }

    #[test]
    fn other_errors_use_generic_message() {
        assert_eq!(
            AppError::ui("window").user_message(),
            CLASSIFY_FAILED_MESSAGE
        );
    }
}
