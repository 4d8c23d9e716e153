//! Integrated loudness measurement and gain solving
//!
//! The mastering chain treats the standardized loudness algorithm as an
//! opaque capability behind the [`LoudnessMeter`] trait; the production
//! implementation wraps the `ebur128` crate (ITU-R BS.1770 / EBU R128
//! integrated loudness with gating). Buffers with more than two channels are
//! measured from the first two channels only.

use crate::error::{MasteringError, Result};
use ebur128::{EbuR128, Mode};
use lathe_core::AudioBuffer;
use std::borrow::Cow;

/// Capability interface for integrated-loudness measurement
///
/// Input is an interleaved buffer of at most two channels; output is the
/// integrated loudness in LUFS, or an error when the measurement is
/// undefined (silent or too-short input). Implementations must never fall
/// back to an assumed loudness value.
pub trait LoudnessMeter: Send + Sync {
    /// Measure integrated loudness of an interleaved buffer
    fn integrated_loudness(&self, samples: &[f32], sample_rate: u32, channels: usize)
        -> Result<f64>;
}

/// EBU R128 / ITU-R BS.1770 loudness meter backed by the `ebur128` crate
///
/// Stateless across calls: each measurement builds a fresh analyzer, feeds
/// it the whole buffer, and reads the gated integrated loudness.
#[derive(Debug, Clone, Copy, Default)]
pub struct EbuR128Meter;

impl EbuR128Meter {
    /// Create a new meter
    pub fn new() -> Self {
        Self
    }
}

impl LoudnessMeter for EbuR128Meter {
    fn integrated_loudness(
        &self,
        samples: &[f32],
        sample_rate: u32,
        channels: usize,
    ) -> Result<f64> {
        if channels == 0 || channels > 2 {
            return Err(MasteringError::LoudnessMeasurement(format!(
                "measurement expects 1 or 2 channels, got {}",
                channels
            )));
        }

        let mut analyzer = EbuR128::new(channels as u32, sample_rate, Mode::I)?;
        analyzer.add_frames_f32(samples)?;

        let lufs = analyzer.loudness_global()?;

        // ebur128 reports -inf when gating removes everything (silence)
        if lufs.is_infinite() || lufs.is_nan() {
            return Err(MasteringError::LoudnessMeasurement(format!(
                "integrated loudness is not finite ({})",
                lufs
            )));
        }

        Ok(lufs)
    }
}

/// Extract the measurement view of a buffer: at most the first two channels
///
/// Mono and stereo buffers are borrowed unchanged. For wider layouts the
/// first two samples of every frame are copied out; the remaining channels
/// still receive the solved gain, they just do not influence it.
pub fn measurement_channels(buffer: &AudioBuffer) -> (Cow<'_, [f32]>, usize) {
    if buffer.channels <= 2 {
        return (Cow::Borrowed(&buffer.samples), buffer.channels);
    }

    let mut front = Vec::with_capacity(buffer.frames() * 2);
    for frame in buffer.samples.chunks_exact(buffer.channels) {
        front.push(frame[0]);
        front.push(frame[1]);
    }
    (Cow::Owned(front), 2)
}

/// Gain in dB needed to move a measured loudness onto the target
pub fn loudness_gain_db(target_lufs: f64, measured_lufs: f64) -> f64 {
    target_lufs - measured_lufs
}

/// Convert a dB gain to a linear multiplier
pub fn db_to_linear(gain_db: f64) -> f64 {
    10.0_f64.powf(gain_db / 20.0)
}
