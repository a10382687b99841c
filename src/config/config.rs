//! Application configuration and CLI argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;

use super::voices::{self, VoiceMap};
use crate::tts::{OutputFormat, TtsConfig, VoiceSettings, parse_output_format};

/// How the TTS provider ships audio back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum TtsTransport {
    /// Raw audio bytes in the response body
    #[default]
    Binary,
    /// JSON body carrying base64 audio (timestamps endpoint)
    Base64,
}

impl std::fmt::Display for TtsTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TtsTransport::Binary => write!(f, "binary"),
            TtsTransport::Base64 => write!(f, "base64"),
        }
    }
}

/// Blog-to-podcast application configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "blog-podcaster")]
#[command(author, version, about = "Turn a blog post into a two-speaker podcast", long_about = None)]
pub struct AppConfig {
    /// Blog post URL (prompted for when omitted)
    pub url: Option<String>,

    /// List preset TTS voices and exit
    #[arg(long)]
    pub list_voices: bool,

    /// Target podcast length in minutes
    #[arg(long, short = 'l', default_value = "5")]
    pub length_minutes: u32,

    /// Output audio file (defaults to outputs/podcast_<timestamp>.wav)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Synthesize an existing [HOST]/[GUEST] transcript instead of fetching a blog
    #[arg(long)]
    pub script_file: Option<PathBuf>,

    /// Save the transcript next to the audio file
    #[arg(long)]
    pub save_script: bool,

    /// Google API key for Gemini
    #[arg(long, env = "GOOGLE_API_KEY", default_value = "", hide_env_values = true)]
    pub gemini_api_key: String,

    /// Gemini model name
    #[arg(long, short = 'm', env = "GEMINI_MODEL", default_value = "gemini-2.5-flash")]
    pub gemini_model: String,

    /// LLM temperature (0.0-2.0)
    #[arg(long, default_value = "0.7", value_parser = parse_temperature)]
    pub temperature: f32,

    /// ElevenLabs API key
    #[arg(long, env = "ELEVENLABS_API_KEY", default_value = "", hide_env_values = true)]
    pub elevenlabs_api_key: String,

    /// ElevenLabs API base URL
    #[arg(long, env = "ELEVENLABS_BASE_URL", default_value = "https://api.elevenlabs.io")]
    pub elevenlabs_base_url: String,

    /// ElevenLabs model id
    #[arg(long, env = "ELEVENLABS_MODEL", default_value = "eleven_turbo_v2_5")]
    pub tts_model: String,

    /// Host voice: preset name (see --list-voices) or raw voice id
    #[arg(long, env = "HOST_VOICE", default_value = voices::DEFAULT_HOST_VOICE)]
    pub host_voice: String,

    /// Guest voice: preset name or raw voice id
    #[arg(long, env = "GUEST_VOICE", default_value = voices::DEFAULT_GUEST_VOICE)]
    pub guest_voice: String,

    /// Voice for untagged text: preset name or raw voice id
    #[arg(long, env = "DEFAULT_VOICE", default_value = voices::DEFAULT_FALLBACK_VOICE)]
    pub default_voice: String,

    /// Speech speed multiplier
    #[arg(long, default_value = "1.0")]
    pub tts_speed: f32,

    /// Voice stability (0.0-1.0)
    #[arg(long, default_value = "0.0")]
    pub tts_stability: f32,

    /// Provider output format, e.g. mp3_22050_32 or pcm_16000
    #[arg(long, default_value = "mp3_22050_32", value_parser = parse_output_format)]
    pub tts_output_format: OutputFormat,

    /// Audio transport: 'binary' body or 'base64' JSON
    #[arg(long, value_enum, default_value = "binary")]
    pub tts_transport: TtsTransport,

    /// Per-request TTS timeout in seconds
    #[arg(long, default_value = "30")]
    pub tts_timeout_secs: u64,

    /// Pause after each TTS request in milliseconds (0 disables)
    #[arg(long, default_value = "0")]
    pub tts_throttle_ms: u64,

    /// Silence between utterances in milliseconds
    #[arg(long, default_value = "500")]
    pub silence_ms: u64,

    /// Blog fetch timeout in seconds
    #[arg(long, default_value = "10")]
    pub fetch_timeout_secs: u64,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse configuration from command line arguments.
    pub fn from_args() -> Self {
        let config = Self::parse();

        if config.list_voices {
            voices::print_voices();
            std::process::exit(0);
        }

        config
    }

    /// Whether the LLM stage runs (no transcript file given).
    pub fn needs_llm(&self) -> bool {
        self.script_file.is_none()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.needs_llm() && self.gemini_api_key.trim().is_empty() {
            anyhow::bail!("GOOGLE_API_KEY is not set (or pass --script-file to skip script generation)");
        }

        if self.elevenlabs_api_key.trim().is_empty() {
            anyhow::bail!("ELEVENLABS_API_KEY is not set");
        }

        if let Some(ref path) = self.script_file
            && !path.exists()
        {
            anyhow::bail!("Script file does not exist: {}", path.display());
        }

        if self.length_minutes == 0 {
            anyhow::bail!("Podcast length must be at least one minute");
        }

        if !(self.tts_speed.is_finite() && self.tts_speed > 0.0) {
            anyhow::bail!("TTS speed must be a positive number");
        }

        if !(0.0..=1.0).contains(&self.tts_stability) {
            anyhow::bail!("TTS stability must be between 0.0 and 1.0");
        }

        if self.tts_timeout_secs == 0 || self.fetch_timeout_secs == 0 {
            anyhow::bail!("Timeouts must be at least one second");
        }

        Ok(())
    }

    /// Speaker to voice id mapping, with preset names resolved.
    pub fn voice_map(&self) -> VoiceMap {
        VoiceMap {
            host: voices::voice_id_for(&self.host_voice),
            guest: voices::voice_id_for(&self.guest_voice),
            default: voices::voice_id_for(&self.default_voice),
        }
    }

    /// Build the synthesizer configuration.
    pub fn tts_config(&self) -> TtsConfig {
        TtsConfig {
            api_key: self.elevenlabs_api_key.clone(),
            base_url: self.elevenlabs_base_url.clone(),
            model_id: self.tts_model.clone(),
            settings: VoiceSettings { stability: self.tts_stability, speed: self.tts_speed, ..VoiceSettings::default() },
            output_format: self.tts_output_format.clone(),
            transport: self.tts_transport,
            timeout: Duration::from_secs(self.tts_timeout_secs),
            throttle: Duration::from_millis(self.tts_throttle_ms),
        }
    }

    /// Sample rate of the finished podcast file.
    pub fn output_sample_rate(&self) -> u32 {
        self.tts_output_format.sample_rate
    }

    pub fn silence(&self) -> Duration {
        Duration::from_millis(self.silence_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Output path, defaulting to a timestamped file under `outputs/`.
    pub fn output_path(&self) -> PathBuf {
        match self.output {
            Some(ref path) => path.clone(),
            None => PathBuf::from("outputs").join(format!("podcast_{}.wav", timestamp())),
        }
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        let voices = self.voice_map();
        info!("Configuration:");
        if self.needs_llm() {
            info!("  Podcast length: {} min", self.length_minutes);
            info!("  Gemini model: {}", self.gemini_model);
            info!("  Temperature: {}", self.temperature);
        } else if let Some(ref path) = self.script_file {
            info!("  Script file: {}", path.display());
        }
        info!("  TTS endpoint: {}", self.elevenlabs_base_url);
        info!("  TTS model: {}", self.tts_model);
        info!("  TTS voices: host={}, guest={}, default={}", voices.host, voices.guest, voices.default);
        info!("  TTS speed: {}, stability: {}", self.tts_speed, self.tts_stability);
        info!("  TTS output format: {} ({})", self.tts_output_format, self.tts_transport);
        if self.tts_throttle_ms > 0 {
            info!("  TTS throttle: {}ms", self.tts_throttle_ms);
        }
        info!("  Silence between turns: {}ms", self.silence_ms);
    }
}

/// Local `YYYYMMDD_HHMMSS`, falling back to UTC when the offset is unknown.
fn timestamp() -> String {
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    now.format(time::macros::format_description!("[year][month][day]_[hour][minute][second]")).unwrap_or_else(|_| now.unix_timestamp().to_string())
}

/// Parse and validate temperature value (0.0-2.0).
fn parse_temperature(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("'{}' is not a valid float", s))?;
    if (0.0..=2.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("temperature must be between 0.0 and 2.0, got {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tts::AudioCodec;

    fn parse(args: &[&str]) -> AppConfig {
        let mut argv = vec!["blog-podcaster", "--gemini-api-key", "g-key", "--elevenlabs-api-key", "e-key"];
        argv.extend_from_slice(args);
        AppConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["https://example.com/post"]);
        assert_eq!(config.url.as_deref(), Some("https://example.com/post"));
        assert_eq!(config.length_minutes, 5);
        assert_eq!(config.tts_output_format.codec, AudioCodec::Mp3);
        assert_eq!(config.output_sample_rate(), 22050);
        assert_eq!(config.tts_transport, TtsTransport::Binary);
        assert_eq!(config.silence(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_voice_presets_resolve_to_ids() {
        let config = parse(&["--host-voice", "George", "--guest-voice", "raw-id-123"]);
        let voices = config.voice_map();
        assert_eq!(voices.host, voices::get_preset("george").unwrap().voice_id);
        assert_eq!(voices.guest, "raw-id-123");
        assert_eq!(voices.default, voices::DEFAULT_FALLBACK_VOICE);
    }

    #[test]
    fn test_tts_config_carries_settings() {
        let config = parse(&["--tts-speed", "1.1", "--tts-stability", "0.4", "--tts-output-format", "pcm_16000", "--tts-transport", "base64", "--tts-throttle-ms", "250"]);
        let tts = config.tts_config();
        assert_eq!(tts.settings.speed, 1.1);
        assert_eq!(tts.settings.stability, 0.4);
        assert_eq!(tts.output_format.as_str(), "pcm_16000");
        assert_eq!(tts.transport, TtsTransport::Base64);
        assert_eq!(tts.throttle, Duration::from_millis(250));
        assert_eq!(tts.api_key, "e-key");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(parse(&["--tts-speed", "0"]).validate().is_err());
        assert!(parse(&["--tts-speed", "NaN"]).validate().is_err());
        assert!(parse(&["--tts-speed", "inf"]).validate().is_err());
        assert!(parse(&["--tts-stability", "NaN"]).validate().is_err());
        assert!(parse(&["--tts-stability", "1.5"]).validate().is_err());
        assert!(parse(&["--length-minutes", "0"]).validate().is_err());
        assert!(AppConfig::try_parse_from(["blog-podcaster", "--temperature", "3"]).is_err());
        assert!(AppConfig::try_parse_from(["blog-podcaster", "--tts-output-format", "ogg_1"]).is_err());
    }

    #[test]
    fn test_gemini_key_only_needed_for_generation() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("script.txt");
        std::fs::write(&script, "[HOST] Hi").unwrap();

        let mut config = parse(&["--script-file", script.to_str().unwrap()]);
        config.gemini_api_key.clear();
        assert!(config.validate().is_ok());

        let mut config = parse(&[]);
        config.gemini_api_key.clear();
        assert!(config.validate().is_err());

        let mut config = parse(&[]);
        config.elevenlabs_api_key.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_output_path_is_timestamped() {
        let path = parse(&[]).output_path();
        assert!(path.starts_with("outputs"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("podcast_") && name.ends_with(".wav"), "{name}");
        assert_eq!(name.len(), "podcast_YYYYMMDD_HHMMSS.wav".len());

        assert_eq!(parse(&["-o", "ep.wav"]).output_path(), PathBuf::from("ep.wav"));
    }
}
