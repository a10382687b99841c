use reqwest::StatusCode;
use thiserror::Error;

use crate::audio::DecodeError;

/// Why a single utterance produced no audio.
///
/// Never escapes the synthesizer: callers only ever see an empty clip.
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("audio download from {url} returned {status}")]
    Download { url: String, status: StatusCode },
    #[error("response carries no audio: {0}")]
    MissingAudio(String),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid base64 audio: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("provider returned audio without samples")]
    Silent,
}

impl SynthesisError {
    /// HTTP status involved in the failure, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SynthesisError::Status { status, .. } | SynthesisError::Download { status, .. } => Some(*status),
            SynthesisError::Request(e) => e.status(),
            _ => None,
        }
    }
}
