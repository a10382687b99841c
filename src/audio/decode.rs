//! Decoding of provider audio payloads into mono clips.
//!
//! Raw `pcm` output is little-endian 16-bit mono at the rate named by the
//! output format. Everything else goes through symphonia's probe, so MP3, WAV,
//! FLAC and Ogg payloads all decode regardless of the hinted codec.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;
use tracing::debug;

use super::AudioClip;
use super::util::{mix_to_mono, pcm16le_to_f32};
use crate::tts::{AudioCodec, OutputFormat};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("audio payload is empty")]
    Empty,
    #[error("no decodable audio track in payload")]
    NoTrack,
    #[error("payload has no sample rate")]
    UnknownSampleRate,
    #[error("symphonia error: {0}")]
    Symphonia(#[from] SymphoniaError),
}

/// Decode a complete audio payload produced in `format`.
pub fn decode_audio(bytes: &[u8], format: &OutputFormat) -> Result<AudioClip, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    match format.codec {
        AudioCodec::Pcm => Ok(AudioClip::new(pcm16le_to_f32(bytes), format.sample_rate)),
        codec => decode_container(bytes, Some(codec.extension())),
    }
}

/// Probe and decode a compressed or containerised payload.
pub fn decode_container(bytes: &[u8], extension: Option<&str>) -> Result<AudioClip, DecodeError> {
    let source = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(source), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())?;
    let mut format = probed.format;

    let track = format.tracks().iter().find(|t| t.codec_params.codec != CODEC_TYPE_NULL).ok_or(DecodeError::NoTrack)?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;

    let mut decoder = symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                // Corrupt frames are skipped, the rest of the stream is still usable
                debug!("Skipping undecodable packet: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        if sample_rate.is_none() {
            sample_rate = Some(spec.rate);
        }

        let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buffer.copy_interleaved_ref(decoded);
        samples.extend(mix_to_mono(buffer.samples(), spec.channels.count()));
    }

    let sample_rate = sample_rate.ok_or(DecodeError::UnknownSampleRate)?;
    Ok(AudioClip::new(samples, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::wav_bytes;

    #[test]
    fn test_decode_raw_pcm() {
        let format: OutputFormat = "pcm_16000".parse().unwrap();
        let clip = decode_audio(&[0x00, 0x40, 0x00, 0x40], &format).unwrap();
        assert_eq!(clip, AudioClip::new(vec![0.5, 0.5], 16000));
    }

    #[test]
    fn test_decode_wav_container_mono() {
        let bytes = wav_bytes(&vec![0.25; 2205], 22050, 1);
        let clip = decode_container(&bytes, Some("wav")).unwrap();
        assert_eq!(clip.sample_rate, 22050);
        assert_eq!(clip.len(), 2205);
        assert!(clip.samples.iter().all(|s| (s - 0.25).abs() < 1e-3));
    }

    #[test]
    fn test_decode_wav_stereo_is_mixed_down() {
        let bytes = wav_bytes(&vec![0.5; 2000], 16000, 2);
        let clip = decode_container(&bytes, None).unwrap();
        assert_eq!(clip.len(), 1000);
    }

    #[test]
    fn test_probe_ignores_wrong_hint() {
        // Provider said mp3 but sent a WAV body
        let format: OutputFormat = "mp3_22050_32".parse().unwrap();
        let bytes = wav_bytes(&vec![0.1; 441], 44100, 1);
        let clip = decode_audio(&bytes, &format).unwrap();
        assert_eq!(clip.sample_rate, 44100);
        assert_eq!(clip.len(), 441);
    }

    /// Silent MPEG-1 Layer III stream: 44.1 kHz mono at 128 kbps, 417-byte frames
    /// whose side info and main data are all zero.
    fn silent_mp3(frames: usize) -> Vec<u8> {
        let mut frame = vec![0u8; 417];
        frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0xC0]);
        frame.repeat(frames)
    }

    #[test]
    fn test_decode_mp3_stream() {
        let format: OutputFormat = "mp3_44100_128".parse().unwrap();
        let clip = decode_audio(&silent_mp3(10), &format).unwrap();
        assert_eq!(clip.sample_rate, 44100);
        assert!(!clip.is_empty());
        assert!(clip.len() <= 10 * 1152, "{} samples", clip.len());
        assert!(clip.samples.iter().all(|s| s.abs() < 1e-3));
    }

    #[test]
    fn test_garbage_payload_is_an_error() {
        let format: OutputFormat = "mp3_22050_32".parse().unwrap();
        assert!(decode_audio(b"definitely not audio", &format).is_err());
        assert!(matches!(decode_audio(&[], &format), Err(DecodeError::Empty)));
    }
}
