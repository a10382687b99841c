//! Provider output formats (`mp3_22050_32`, `pcm_16000`, ...).

use std::fmt;
use std::str::FromStr;

/// Codec part of an output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCodec {
    Mp3,
    /// Headerless signed 16-bit little-endian mono.
    Pcm,
    Wav,
}

impl AudioCodec {
    /// File extension used as a probe hint when decoding.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioCodec::Mp3 => "mp3",
            AudioCodec::Pcm => "pcm",
            AudioCodec::Wav => "wav",
        }
    }
}

/// Output format requested from the TTS provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFormat {
    pub codec: AudioCodec,
    pub sample_rate: u32,
    raw: String,
}

impl OutputFormat {
    /// The provider's name for this format.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self { codec: AudioCodec::Mp3, sample_rate: 22050, raw: "mp3_22050_32".to_string() }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        let mut parts = raw.split('_');

        let codec = match parts.next() {
            Some("mp3") => AudioCodec::Mp3,
            Some("pcm") => AudioCodec::Pcm,
            Some("wav") => AudioCodec::Wav,
            _ => return Err(format!("unsupported output format '{}' (expected mp3_<rate>_<kbps>, pcm_<rate> or wav_<rate>)", s)),
        };

        let sample_rate = parts
            .next()
            .and_then(|rate| rate.parse::<u32>().ok())
            .filter(|rate| *rate > 0)
            .ok_or_else(|| format!("output format '{}' has no valid sample rate", s))?;

        match (codec, parts.next()) {
            (AudioCodec::Mp3, Some(kbps)) if kbps.parse::<u32>().is_ok() => {}
            (AudioCodec::Mp3, _) => return Err(format!("mp3 output format '{}' needs a bitrate", s)),
            (_, None) => {}
            (_, Some(_)) => return Err(format!("unexpected suffix in output format '{}'", s)),
        }
        if parts.next().is_some() {
            return Err(format!("unexpected suffix in output format '{}'", s));
        }

        Ok(Self { codec, sample_rate, raw })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an output format for clap.
pub fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}
