/// Audio buffer types
use crate::error::{CoreError, Result};

/// Decoded audio samples in their source representation
///
/// Integer PCM of any width is stored sign-extended (or zero-extended for
/// unsigned sources) in `i32`, with the original bit depth and signedness
/// kept alongside so later stages can recover the full-scale value.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleData {
    /// Integer PCM samples, interleaved
    Int {
        /// Sample values widened into `i32`
        data: Vec<i32>,
        /// Original bit depth (e.g. 16 for `i16` sources)
        bits: u16,
        /// Whether the source representation was signed
        signed: bool,
    },
    /// 32-bit float samples, interleaved
    Float32(Vec<f32>),
    /// 64-bit float samples, interleaved
    Float64(Vec<f64>),
}

impl SampleData {
    /// Total interleaved sample count
    pub fn len(&self) -> usize {
        match self {
            Self::Int { data, .. } => data.len(),
            Self::Float32(data) => data.len(),
            Self::Float64(data) => data.len(),
        }
    }

    /// Check if there are no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short format label for logs and error messages (e.g. "i16", "u8", "f32")
    pub fn format_label(&self) -> String {
        match self {
            Self::Int { bits, signed, .. } => {
                format!("{}{}", if *signed { "i" } else { "u" }, bits)
            }
            Self::Float32(_) => "f32".to_string(),
            Self::Float64(_) => "f64".to_string(),
        }
    }
}

/// Decoded audio with its stream parameters, before normalization
///
/// Sample rate and channel count are fixed for the lifetime of the buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAudio {
    /// Samples in their source representation, interleaved
    pub data: SampleData,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels (1 = mono, 2 = stereo, etc.)
    pub channels: usize,
}

impl RawAudio {
    /// Create a new raw audio buffer, validating its structure
    ///
    /// # Errors
    /// Returns an error if the sample rate or channel count is zero, or if
    /// the sample count does not split evenly into frames.
    pub fn new(data: SampleData, sample_rate: u32, channels: usize) -> Result<Self> {
        if sample_rate == 0 {
            return Err(CoreError::InvalidSampleRate(sample_rate));
        }
        if channels == 0 {
            return Err(CoreError::InvalidChannelCount(channels));
        }
        if data.len() % channels != 0 {
            return Err(CoreError::RaggedFrames {
                samples: data.len(),
                channels,
            });
        }
        Ok(Self {
            data,
            sample_rate,
            channels,
        })
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.data.len() / self.channels
    }
}

/// Audio buffer in the canonical representation
///
/// Samples are stored as `f32` in the range [-1.0, 1.0],
/// interleaved: [L, R, L, R, ...] for stereo.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Audio samples (f32, interleaved)
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels (1 = mono, 2 = stereo, etc.)
    pub channels: usize,
}

impl AudioBuffer {
    /// Create a new audio buffer
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: usize) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Get the number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels
        }
    }

    /// Get the duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frames() as f64 / f64::from(self.sample_rate)
        }
    }

    /// Maximum absolute sample value across all channels (0.0 for an empty buffer)
    pub fn peak(&self) -> f32 {
        self.samples.iter().map(|s| s.abs()).fold(0.0_f32, f32::max)
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the length in samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }
}
