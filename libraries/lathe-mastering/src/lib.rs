//! Loudness mastering chain for Lathe
//!
//! Transforms decoded audio into a loudness-normalized, peak-safe master
//! suitable for consistent playback loudness across a catalog.
//!
//! # Signal Flow
//!
//! ```text
//! RawAudio → Normalize → High-Pass → [Measure Loudness] → Gain → Soft Limiter → Peak Guard
//!            (to f32)     (80 Hz)      (EBU R128)                  (tanh)        (-1 dBFS)
//! ```
//!
//! Every stage consumes the full buffer produced by the previous stage; the
//! loudness measurement yields a single scalar gain that is applied before
//! the limiter runs. The chain is stateless between invocations and holds no
//! shared mutable state, so concurrent requests can master independently.
//!
//! # Example
//!
//! ```rust
//! use lathe_core::{RawAudio, SampleData};
//! use lathe_mastering::{MasteringChain, MasteringParams};
//!
//! # fn example() -> Result<(), lathe_mastering::MasteringError> {
//! let samples: Vec<i32> = (0..88_200).map(|i| {
//!     let t = i as f32 / 44_100.0;
//!     ((2.0 * std::f32::consts::PI * 440.0 * t).sin() * 16_000.0) as i32
//! }).collect();
//! let raw = RawAudio::new(
//!     SampleData::Int { data: samples, bits: 16, signed: true },
//!     44_100,
//!     1,
//! ).expect("well-formed buffer");
//!
//! let chain = MasteringChain::new(MasteringParams::default());
//! let mastered = chain.master(raw)?;
//! assert_eq!(mastered.sample_rate, 44_100);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod chain;
mod error;
mod highpass;
mod limiter;
mod loudness;
mod normalize;
mod peak;

pub use chain::{MasteringChain, MasteringParams};
pub use error::{MasteringError, Result};
pub use highpass::{FilterState, HighPassFilter};
pub use limiter::SoftLimiter;
pub use loudness::{db_to_linear, loudness_gain_db, EbuR128Meter, LoudnessMeter};
pub use normalize::normalize;
pub use peak::TruePeakGuard;

/// Default mastering target for streaming delivery (-14 LUFS)
pub const STREAMING_TARGET_LUFS: f64 = -14.0;

/// Default high-pass cutoff for DC/rumble removal (80 Hz)
pub const DEFAULT_HIGHPASS_HZ: f64 = 80.0;

/// Default soft-limiter threshold (0.95 of full scale)
pub const DEFAULT_LIMITER_THRESHOLD: f32 = 0.95;

/// Default true-peak ceiling (-1 dBFS)
pub const DEFAULT_TRUE_PEAK_DB: f64 = -1.0;
