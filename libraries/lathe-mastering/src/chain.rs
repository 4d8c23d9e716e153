//! Pipeline orchestration
//!
//! Sequences the mastering stages over one buffer:
//! normalize → high-pass → measure → gain → soft limiter → peak guard.
//! The orchestrator is the only component aware of the full parameter set;
//! each stage receives only what it needs. A single linear pass, stateless
//! between invocations, deterministic for identical inputs and parameters.

use crate::error::Result;
use crate::highpass::HighPassFilter;
use crate::limiter::SoftLimiter;
use crate::loudness::{
    db_to_linear, loudness_gain_db, measurement_channels, EbuR128Meter, LoudnessMeter,
};
use crate::normalize::normalize;
use crate::peak::TruePeakGuard;
use lathe_core::{AudioBuffer, RawAudio};

/// Parameters for one mastering run
///
/// Immutable inputs to a single pipeline invocation; nothing is persisted
/// across runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasteringParams {
    /// Target integrated loudness in LUFS
    pub target_loudness_lufs: f64,

    /// High-pass cutoff frequency in Hz
    pub highpass_cutoff_hz: f64,

    /// Soft-limiter threshold as a fraction of full scale
    pub limiter_threshold: f32,

    /// True-peak ceiling in dB relative to full scale
    pub true_peak_target_db: f64,
}

impl MasteringParams {
    /// Parameters with a custom loudness target, everything else default
    pub fn with_target_lufs(target_loudness_lufs: f64) -> Self {
        Self {
            target_loudness_lufs,
            ..Self::default()
        }
    }
}

impl Default for MasteringParams {
    fn default() -> Self {
        Self {
            target_loudness_lufs: crate::STREAMING_TARGET_LUFS,
            highpass_cutoff_hz: crate::DEFAULT_HIGHPASS_HZ,
            limiter_threshold: crate::DEFAULT_LIMITER_THRESHOLD,
            true_peak_target_db: crate::DEFAULT_TRUE_PEAK_DB,
        }
    }
}

/// The mastering chain
///
/// Owns the parameter set and the loudness-measurement capability. The
/// meter defaults to the EBU R128 implementation but can be swapped, which
/// keeps the standardized algorithm independent of the orchestration logic.
pub struct MasteringChain {
    params: MasteringParams,
    meter: Box<dyn LoudnessMeter>,
}

impl MasteringChain {
    /// Create a chain with the EBU R128 loudness meter
    pub fn new(params: MasteringParams) -> Self {
        Self::with_meter(params, Box::new(EbuR128Meter::new()))
    }

    /// Create a chain with a custom loudness meter
    pub fn with_meter(params: MasteringParams, meter: Box<dyn LoudnessMeter>) -> Self {
        Self { params, meter }
    }

    /// The chain's parameter set
    pub fn params(&self) -> &MasteringParams {
        &self.params
    }

    /// Master one buffer
    ///
    /// Output has the same channel count and sample rate as the input. Any
    /// stage error aborts the run immediately; there is no partial output.
    pub fn master(&self, raw: RawAudio) -> Result<AudioBuffer> {
        let format = raw.data.format_label();
        let mut buffer = normalize(raw)?;
        tracing::debug!(
            "normalized {} input: {} frames, {} ch @ {} Hz",
            format,
            buffer.frames(),
            buffer.channels,
            buffer.sample_rate
        );

        let filter = HighPassFilter::new(self.params.highpass_cutoff_hz)?;
        filter.process(&mut buffer)?;

        // Loudness is measured from at most the first two channels; the
        // solved gain is applied to all of them.
        let measured_lufs = {
            let (view, view_channels) = measurement_channels(&buffer);
            self.meter
                .integrated_loudness(&view, buffer.sample_rate, view_channels)?
        };

        let gain_db = loudness_gain_db(self.params.target_loudness_lufs, measured_lufs);
        let gain = db_to_linear(gain_db) as f32;
        tracing::info!(
            "measured {:.2} LUFS, applying {:+.2} dB of gain",
            measured_lufs,
            gain_db
        );

        for sample in buffer.samples.iter_mut() {
            *sample *= gain;
        }

        SoftLimiter::new(self.params.limiter_threshold).process(&mut buffer.samples);
        TruePeakGuard::new(self.params.true_peak_target_db).process(&mut buffer);

        tracing::debug!("mastering chain complete, peak {:.3}", buffer.peak());
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MasteringError;
    use lathe_core::SampleData;

    /// Meter that reports a fixed loudness, for deterministic chain tests
    struct FixedMeter(f64);

    impl LoudnessMeter for FixedMeter {
        fn integrated_loudness(&self, _: &[f32], _: u32, _: usize) -> crate::Result<f64> {
            Ok(self.0)
        }
    }

    /// Meter that always fails, to check error propagation
    struct FailingMeter;

    impl LoudnessMeter for FailingMeter {
        fn integrated_loudness(&self, _: &[f32], _: u32, _: usize) -> crate::Result<f64> {
            Err(MasteringError::LoudnessMeasurement("undefined".to_string()))
        }
    }

    fn quiet_tone(frames: usize) -> RawAudio {
        let samples: Vec<f32> = (0..frames)
            .map(|i| {
                let t = i as f32 / 44_100.0;
                0.05 * (2.0 * std::f32::consts::PI * 440.0 * t).sin()
            })
            .collect();
        RawAudio::new(SampleData::Float32(samples), 44_100, 1).unwrap()
    }

    #[test]
    fn default_params_match_documented_values() {
        let params = MasteringParams::default();
        assert_eq!(params.target_loudness_lufs, -14.0);
        assert_eq!(params.highpass_cutoff_hz, 80.0);
        assert_eq!(params.limiter_threshold, 0.95);
        assert_eq!(params.true_peak_target_db, -1.0);
    }

    #[test]
    fn shape_and_rate_are_preserved() {
        let raw = quiet_tone(44_100);
        let frames = raw.frames();

        let chain = MasteringChain::with_meter(
            MasteringParams::default(),
            Box::new(FixedMeter(-20.0)),
        );
        let mastered = chain.master(raw).unwrap();

        assert_eq!(mastered.frames(), frames);
        assert_eq!(mastered.sample_rate, 44_100);
        assert_eq!(mastered.channels, 1);
    }

    #[test]
    fn gain_is_applied_before_the_limiter() {
        // measured -20, target -14: +6 dB, ~1.995x. A small sample passes the
        // limiter almost linearly, so the output is close to input * gain.
        let raw = RawAudio::new(SampleData::Float32(vec![0.01; 8]), 44_100, 1).unwrap();

        let chain = MasteringChain::with_meter(
            MasteringParams::default(),
            Box::new(FixedMeter(-20.0)),
        );
        let mastered = chain.master(raw).unwrap();

        // High-pass has negligible effect on the very first sample
        let expected = 0.01 * 1.995;
        assert!(
            (mastered.samples[0] - expected).abs() < 1e-3,
            "expected ~{}, got {}",
            expected,
            mastered.samples[0]
        );
    }

    #[test]
    fn peak_never_exceeds_ceiling() {
        // A huge solved gain drives everything into the limiter; the guard
        // still bounds the final peak.
        let raw = quiet_tone(44_100);
        let chain = MasteringChain::with_meter(
            MasteringParams::default(),
            Box::new(FixedMeter(-60.0)),
        );
        let mastered = chain.master(raw).unwrap();

        let ceiling = 10.0_f32.powf(-1.0 / 20.0);
        assert!(mastered.peak() <= ceiling + 1e-6);
        assert!(mastered.samples.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn measurement_failure_aborts_the_chain() {
        let raw = quiet_tone(4_410);
        let chain =
            MasteringChain::with_meter(MasteringParams::default(), Box::new(FailingMeter));

        assert!(matches!(
            chain.master(raw),
            Err(MasteringError::LoudnessMeasurement(_))
        ));
    }

    #[test]
    fn invalid_cutoff_aborts_before_measurement() {
        let raw = quiet_tone(4_410);
        let params = MasteringParams {
            highpass_cutoff_hz: -80.0,
            ..MasteringParams::default()
        };
        let chain = MasteringChain::with_meter(params, Box::new(FixedMeter(-20.0)));

        assert!(matches!(
            chain.master(raw),
            Err(MasteringError::InvalidFilterParameter(_))
        ));
    }

    #[test]
    fn surround_gain_applies_to_all_channels() {
        // 4-channel buffer: measurement sees the front pair, but the solved
        // gain scales the rear channels too. Rear carries the same tone at
        // twice the amplitude; that ratio survives the whole chain while the
        // signal stays in the limiter's near-linear region.
        let mut samples = Vec::new();
        for i in 0..4_410 {
            let t = i as f32 / 44_100.0;
            let tone = 0.005 * (2.0 * std::f32::consts::PI * 440.0 * t).sin();
            samples.extend_from_slice(&[tone, tone, 2.0 * tone, 2.0 * tone]);
        }
        let raw = RawAudio::new(SampleData::Float32(samples), 44_100, 4).unwrap();

        let chain = MasteringChain::with_meter(
            MasteringParams::default(),
            Box::new(FixedMeter(-20.0)),
        );
        let mastered = chain.master(raw).unwrap();

        let mut front_energy = 0.0_f64;
        let mut rear_energy = 0.0_f64;
        for frame in mastered.samples.chunks_exact(4) {
            front_energy += f64::from(frame[0]) * f64::from(frame[0]);
            rear_energy += f64::from(frame[2]) * f64::from(frame[2]);
        }
        let rms_ratio = (rear_energy / front_energy).sqrt();
        assert!(
            (rms_ratio - 2.0).abs() < 0.05,
            "rear/front RMS ratio drifted to {}",
            rms_ratio
        );
    }
}
