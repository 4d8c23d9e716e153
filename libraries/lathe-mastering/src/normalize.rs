//! Sample-format normalization
//!
//! Converts decoded samples in any source representation into the canonical
//! interleaved `f32` buffer with full-scale range [-1.0, 1.0]. Integer PCM is
//! divided by the maximum representable magnitude of its source type; float
//! sources are cast element-wise without rescaling. No clamping happens here.

use crate::error::{MasteringError, Result};
use lathe_core::{AudioBuffer, RawAudio, SampleData};

/// Convert raw decoded audio into the canonical float representation
///
/// Pure transform: the output has the same shape, sample rate, and channel
/// count as the input. Values already in [-1.0, 1.0] pass through untouched.
///
/// # Errors
/// Returns `UnsupportedSampleFormat` when an integer payload declares a bit
/// width outside 1..=32.
pub fn normalize(raw: RawAudio) -> Result<AudioBuffer> {
    let RawAudio {
        data,
        sample_rate,
        channels,
    } = raw;

    let samples = match data {
        SampleData::Int { bits, .. } if !(1..=32).contains(&bits) => {
            return Err(MasteringError::UnsupportedSampleFormat(format!(
                "integer samples with {} bits",
                bits
            )));
        }
        SampleData::Int { data, bits, signed } => {
            let full_scale = integer_full_scale(bits, signed);
            data.into_iter()
                .map(|s| s as f32 / full_scale)
                .collect()
        }
        SampleData::Float32(data) => data,
        SampleData::Float64(data) => data.into_iter().map(|s| s as f32).collect(),
    };

    Ok(AudioBuffer::new(samples, sample_rate, channels))
}

/// Maximum representable magnitude for an integer sample type
///
/// Signed types scale by `2^(bits-1) - 1` (32767 for i16); unsigned types by
/// `2^bits - 1` (255 for u8). Unsigned sources keep their DC offset here; the
/// high-pass stage removes it.
fn integer_full_scale(bits: u16, signed: bool) -> f32 {
    let magnitude_bits = if signed { bits - 1 } else { bits };
    ((1_i64 << magnitude_bits) - 1) as f32
}
