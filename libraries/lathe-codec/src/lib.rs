//! WAV container boundary for Lathe
//!
//! Decodes uploaded WAV data into [`RawAudio`](lathe_core::RawAudio) and
//! encodes mastered buffers back to 16-bit PCM WAV for transport. The
//! mastering chain itself never touches container bytes; quantization
//! happens only here, at the very last step.

#![forbid(unsafe_code)]

mod error;
mod wav;

pub use error::{CodecError, Result};
pub use wav::{decode_wav, encode_wav_pcm16};
