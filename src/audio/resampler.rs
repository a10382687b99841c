//! Sample-rate conversion using the rubato FFT resampler.
//!
//! TTS providers may return clips at a rate different from the conversation's
//! output rate; clips are brought to the output rate before being appended.

use anyhow::{Context, Result};
use audioadapter_buffers::direct::InterleavedSlice;
use rubato::{Fft, FixedSync, Resampler};

use super::AudioClip;

/// Chunk size for FFT-based resampling (provides good quality and performance).
const CHUNK_SIZE: usize = 1024;

/// Number of sub-chunks for FFT processing (higher = better quality but more CPU).
const SUB_CHUNKS: usize = 2;

/// Resample a mono buffer from one rate to another.
///
/// Input is processed in fixed chunks; the last chunk is zero-padded and the
/// output truncated back to the expected length.
///
/// # Arguments
/// * `samples` - Input audio samples
/// * `from_rate` - Input sample rate (e.g., 44100 from the provider)
/// * `to_rate` - Output sample rate (e.g., 22050 for the conversation)
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        SUB_CHUNKS,
        1, // mono
        FixedSync::Input,
    )
    .context("Failed to create resampler")?;

    let output_frames_max = resampler.output_frames_max();
    let mut output_buffer = vec![0.0f32; output_frames_max];

    let expected_len = (samples.len() as f64 * to_rate as f64 / from_rate as f64).round() as usize;
    let mut output = Vec::with_capacity(expected_len + output_frames_max);

    for chunk in samples.chunks(CHUNK_SIZE) {
        let mut input_chunk = chunk.to_vec();
        input_chunk.resize(CHUNK_SIZE, 0.0);

        let input_adapter = InterleavedSlice::new(&input_chunk, 1, CHUNK_SIZE).context("Failed to create input adapter")?;
        let mut output_adapter = InterleavedSlice::new_mut(&mut output_buffer, 1, output_frames_max).context("Failed to create output adapter")?;

        let (_, frames_written) = resampler
            .process_into_buffer(&input_adapter, &mut output_adapter, None)
            .map_err(|e| anyhow::anyhow!("Resampling error: {}", e))?;
        output.extend_from_slice(&output_buffer[..frames_written]);
    }

    output.resize(expected_len, 0.0);
    Ok(output)
}

/// Bring a clip to `to_rate`. Clips already at that rate are returned as-is.
pub fn resample_clip(clip: AudioClip, to_rate: u32) -> Result<AudioClip> {
    if clip.sample_rate == to_rate {
        return Ok(clip);
    }
    let samples = resample(&clip.samples, clip.sample_rate, to_rate)?;
    Ok(AudioClip::new(samples, to_rate))
}
