//! Text-to-speech module.
//!
//! Provides per-utterance speech synthesis through the ElevenLabs API.

mod error;
mod format;
mod payload;
mod synthesizer;

use async_trait::async_trait;

use crate::audio::AudioClip;

pub use error::SynthesisError;
pub use format::{AudioCodec, OutputFormat, parse_output_format};
pub use payload::AudioPayload;
pub use synthesizer::{ElevenLabsSynthesizer, TtsConfig, VoiceSettings};

/// Turns one utterance into audio.
///
/// Implementations never fail: a synthesis problem is logged and reported as
/// an empty clip so the rest of the conversation can still be produced.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice_id: &str) -> AudioClip;
}
