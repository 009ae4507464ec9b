//! Error types for tutor operations.

use thiserror::Error;

/// Errors that can occur during content generation.
#[derive(Debug, Error)]
pub enum TutorError {
    /// The tutor is misconfigured (missing key, bad URL).
    #[error("tutor configuration error: {0}")]
    Configuration(String),

    /// The upstream request could not be sent or timed out.
    #[error("network error: {0}")]
    Network(String),

    /// The upstream API returned a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The model's output was empty or not the expected JSON shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
