//! WAV decode and encode via `hound`

use crate::error::{CodecError, Result};
use lathe_core::{AudioBuffer, RawAudio, SampleData};
use std::io::Cursor;

/// Decode an in-memory WAV file into raw audio
///
/// Handles the PCM layouts hound reads: 8/16/24/32-bit integer and 32-bit
/// float. 8-bit sources arrive centered (hound maps the unsigned storage to
/// signed values), so every integer payload is declared signed at its
/// original bit depth.
///
/// # Errors
/// `UnsupportedFormat` for sample representations outside the set above;
/// `Wav` when the bytes are not a readable WAV stream.
pub fn decode_wav(bytes: &[u8]) -> Result<RawAudio> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    tracing::debug!(
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        bits = spec.bits_per_sample,
        format = ?spec.sample_format,
        "decoding wav upload"
    );

    let data = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, 32) => {
            let samples: std::result::Result<Vec<f32>, _> = reader.samples::<f32>().collect();
            SampleData::Float32(samples?)
        }
        (hound::SampleFormat::Int, bits @ (8 | 16 | 24 | 32)) => {
            let samples: std::result::Result<Vec<i32>, _> = reader.samples::<i32>().collect();
            SampleData::Int {
                data: samples?,
                bits,
                signed: true,
            }
        }
        (format, bits) => {
            return Err(CodecError::UnsupportedFormat(format!(
                "{:?} with {} bits per sample",
                format, bits
            )));
        }
    };

    Ok(RawAudio::new(
        data,
        spec.sample_rate,
        usize::from(spec.channels),
    )?)
}

/// Encode a mastered buffer as 16-bit PCM WAV
///
/// The float samples are clamped to [-1.0, 1.0] and quantized to `i16` at
/// this point and nowhere earlier, preserving the chain's full dynamic
/// range until transport.
pub fn encode_wav_pcm16(buffer: &AudioBuffer) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: buffer.channels as u16,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &sample in &buffer.samples {
            let quantized = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i16;
            writer.write_sample(quantized)?;
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}
