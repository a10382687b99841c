//! Shared sample conversion helpers.

/// Convert interleaved f32 samples to mono.
///
/// Handles both mono and multi-channel input:
/// - Mono: Returns a copy of the input
/// - Stereo and up: Mixes channels by averaging each frame
///
/// # Arguments
/// * `data` - Raw f32 samples (interleaved when multi-channel)
/// * `channels` - Number of channels in `data`
///
/// # Returns
/// Vector of mono f32 samples
pub fn mix_to_mono(data: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        data.to_vec()
    } else {
        data.chunks(channels).map(|frame| frame.iter().sum::<f32>() / channels as f32).collect()
    }
}

/// Convert little-endian signed 16-bit PCM bytes to f32 samples in [-1.0, 1.0).
///
/// A trailing odd byte is ignored.
pub fn pcm16le_to_f32(bytes: &[u8]) -> Vec<f32> {
    bytes.chunks_exact(2).map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0).collect()
}

/// Convert an f32 sample to 16-bit PCM, clamping out-of-range values.
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}
