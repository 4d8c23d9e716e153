/// Core error types for Lathe
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Structural errors for audio buffers
#[derive(Error, Debug)]
pub enum CoreError {
    /// Sample rate must be positive
    #[error("Invalid sample rate: {0} Hz (must be positive)")]
    InvalidSampleRate(u32),

    /// Channel count must be positive
    #[error("Invalid channel count: {0} (must be positive)")]
    InvalidChannelCount(usize),

    /// Interleaved sample count must split evenly into frames
    #[error("Sample count {samples} is not divisible by channel count {channels}")]
    RaggedFrames {
        /// Total interleaved sample count
        samples: usize,
        /// Channel count the samples were declared with
        channels: usize,
    },
}
