//! The three shapes a TTS response can carry audio in.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

use super::SynthesisError;

/// Audio as returned by the provider, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioPayload {
    /// Encoded audio in the response body.
    InlineBytes(Bytes),
    /// Encoded audio as base64 text.
    Base64Text(String),
    /// Location the encoded audio must be downloaded from.
    RemoteUrl(String),
}

/// JSON bodies: `with-timestamps` responses use `audio_base64`, others
/// `audio` or a download URL.
#[derive(Deserialize)]
struct JsonAudio {
    audio_base64: Option<String>,
    audio: Option<String>,
    audio_url: Option<String>,
    url: Option<String>,
}

impl AudioPayload {
    /// Classify a successful response by content type, sniffing the body when
    /// the header is missing.
    pub fn classify(content_type: Option<&str>, body: Bytes) -> Result<Self, SynthesisError> {
        let mime = content_type.and_then(|c| c.split(';').next()).map(|m| m.trim().to_ascii_lowercase()).unwrap_or_default();

        if mime.starts_with("audio/") || mime == "application/octet-stream" {
            return Ok(AudioPayload::InlineBytes(body));
        }
        if mime == "application/json" || mime.ends_with("+json") {
            return Self::from_json(&body);
        }
        if mime == "text/plain" {
            return Ok(AudioPayload::Base64Text(String::from_utf8_lossy(&body).into_owned()));
        }
        if mime.is_empty() {
            return if body.trim_ascii_start().starts_with(b"{") { Self::from_json(&body) } else { Ok(AudioPayload::InlineBytes(body)) };
        }

        Err(SynthesisError::MissingAudio(format!("unexpected content type '{}'", mime)))
    }

    fn from_json(body: &[u8]) -> Result<Self, SynthesisError> {
        let json: JsonAudio = serde_json::from_slice(body)?;

        if let Some(text) = json.audio_base64.or(json.audio) {
            Ok(AudioPayload::Base64Text(text))
        } else if let Some(url) = json.audio_url.or(json.url) {
            Ok(AudioPayload::RemoteUrl(url))
        } else {
            Err(SynthesisError::MissingAudio("JSON body has no audio field".to_string()))
        }
    }

    /// Resolve to the encoded audio bytes, downloading when needed.
    pub async fn into_bytes(self, http: &reqwest::Client) -> Result<Bytes, SynthesisError> {
        match self {
            AudioPayload::InlineBytes(bytes) => Ok(bytes),
            AudioPayload::Base64Text(text) => {
                let compact: String = text.split_ascii_whitespace().collect();
                Ok(Bytes::from(STANDARD.decode(compact)?))
            }
            AudioPayload::RemoteUrl(url) => {
                debug!("Downloading synthesized audio from {}", url);
                let response = http.get(&url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SynthesisError::Download { url, status });
                }
                Ok(response.bytes().await?)
            }
        }
    }
}
