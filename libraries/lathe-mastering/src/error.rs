//! Error types for the mastering chain

use thiserror::Error;

/// Result type for mastering operations
pub type Result<T> = std::result::Result<T, MasteringError>;

/// Errors that can abort the mastering chain
///
/// Every error is detected synchronously by the stage that encounters it and
/// propagates immediately; there is no partial output and no retry.
#[derive(Error, Debug)]
pub enum MasteringError {
    /// Input samples not classifiable as integer or float
    #[error("Unsupported sample format: {0}")]
    UnsupportedSampleFormat(String),

    /// Non-positive cutoff frequency or sample rate
    #[error("Invalid filter parameter: {0}")]
    InvalidFilterParameter(String),

    /// The loudness measurement could not produce a finite value
    /// (e.g. silent or too-short input)
    #[error("Loudness measurement failed: {0}")]
    LoudnessMeasurement(String),
}

impl From<ebur128::Error> for MasteringError {
    fn from(err: ebur128::Error) -> Self {
        Self::LoudnessMeasurement(format!("{:?}", err))
    }
}
