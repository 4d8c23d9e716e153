//! Lathe Core
//!
//! Shared audio types and error handling for Lathe.
//!
//! This crate defines the buffer representations the rest of the workspace
//! agrees on:
//! - **`SampleData`**: decoded samples in their source representation
//!   (integer PCM of any width, or 32/64-bit float)
//! - **`RawAudio`**: `SampleData` plus sample rate and channel count
//! - **`AudioBuffer`**: the canonical form — interleaved `f32` in [-1.0, 1.0]
//!
//! # Example
//!
//! ```rust
//! use lathe_core::{AudioBuffer, RawAudio, SampleData};
//!
//! let raw = RawAudio::new(SampleData::Float32(vec![0.0, 0.5, -0.5, 0.0]), 44_100, 2)?;
//! assert_eq!(raw.frames(), 2);
//!
//! let buffer = AudioBuffer::new(vec![0.0, 0.5, -0.5, 0.0], 44_100, 2);
//! assert!((buffer.peak() - 0.5).abs() < f32::EPSILON);
//! # Ok::<(), lathe_core::CoreError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{AudioBuffer, RawAudio, SampleData};
