//! Text-to-speech synthesizer backed by the ElevenLabs HTTP API.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{AudioPayload, OutputFormat, SpeechSynthesizer, SynthesisError};
use crate::audio::{AudioClip, decode_audio};
use crate::config::TtsTransport;

/// Voice-shaping parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
    pub speed: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self { stability: 0.0, similarity_boost: 1.0, style: 0.0, use_speaker_boost: true, speed: 1.0 }
    }
}

/// Everything the synthesizer needs, built once at startup.
#[derive(Debug, Clone)]
pub struct TtsConfig {
    pub api_key: String,
    pub base_url: String,
    pub model_id: String,
    pub settings: VoiceSettings,
    pub output_format: OutputFormat,
    pub transport: TtsTransport,
    pub timeout: Duration,
    /// Pause after each request; zero disables it.
    pub throttle: Duration,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

/// Text-to-speech synthesizer using the ElevenLabs REST API.
pub struct ElevenLabsSynthesizer {
    http: reqwest::Client, // Shared HTTP client (timeout applied per request)
    config: TtsConfig,     // Provider settings
}

impl ElevenLabsSynthesizer {
    /// Create a new TTS synthesizer.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: TtsConfig) -> Result<Self> {
        info!("Initializing ElevenLabs TTS at {} (model {})", config.base_url, config.model_id);

        let http = reqwest::Client::builder().timeout(config.timeout).build().context("Failed to create TTS HTTP client")?;

        Ok(Self { http, config })
    }

    /// Speech endpoint for a voice.
    fn endpoint(&self, voice_id: &str) -> String {
        let suffix = match self.config.transport {
            TtsTransport::Binary => "",
            TtsTransport::Base64 => "/with-timestamps",
        };
        format!(
            "{}/v1/text-to-speech/{}{}?output_format={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(voice_id),
            suffix,
            self.config.output_format
        )
    }

    /// One request/decode round trip. Any failure is returned to the caller.
    async fn request_clip(&self, text: &str, voice_id: &str) -> Result<AudioClip, SynthesisError> {
        let body = SpeechRequest { text, model_id: &self.config.model_id, voice_settings: &self.config.settings };

        let response = self.http.post(self.endpoint(voice_id)).header("xi-api-key", &self.config.api_key).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Status { status, body: detail.chars().take(200).collect() });
        }

        let content_type = response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(str::to_string);
        let payload = AudioPayload::classify(content_type.as_deref(), response.bytes().await?)?;
        let bytes = payload.into_bytes(&self.http).await?;

        let clip = decode_audio(&bytes, &self.config.output_format)?;
        if clip.is_empty() {
            return Err(SynthesisError::Silent);
        }
        Ok(clip)
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    async fn synthesize(&self, text: &str, voice_id: &str) -> AudioClip {
        let text = text.trim();
        if text.is_empty() {
            return AudioClip::empty(self.config.output_format.sample_rate);
        }

        debug!("Synthesizing with voice {}: \"{}\"", voice_id, text);

        let clip = match self.request_clip(text, voice_id).await {
            Ok(clip) => {
                debug!("🎵 Generated {:.2}s of speech ({} samples)", clip.duration().as_secs_f32(), clip.len());
                clip
            }
            Err(e) => {
                let status = e.status().map(|s| s.to_string()).unwrap_or_else(|| "n/a".to_string());
                warn!("❌ TTS failed for voice {} (status {}): {}", voice_id, status, e);
                AudioClip::empty(self.config.output_format.sample_rate)
            }
        };

        if !self.config.throttle.is_zero() {
            tokio::time::sleep(self.config.throttle).await;
        }

        clip
    }
}
