//! Error types for WAV decode/encode

use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur at the container boundary
#[derive(Error, Debug)]
pub enum CodecError {
    /// The WAV declares a sample representation we do not handle
    #[error("Unsupported WAV format: {0}")]
    UnsupportedFormat(String),

    /// The byte stream is not a readable WAV file
    #[error("Malformed WAV data: {0}")]
    Wav(#[from] hound::Error),

    /// The decoded stream parameters are structurally invalid
    #[error("Invalid audio structure: {0}")]
    Structure(#[from] lathe_core::CoreError),
}
