//! Shared helpers for unit tests: a tiny HTTP stub server, WAV fixtures and
//! scripted implementations of the synthesis and script-writing seams.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::audio::AudioClip;
use crate::llm::ScriptGenerator;
use crate::tts::SpeechSynthesizer;

/// Replaced by the server's base URL inside response bodies.
const BASE_PLACEHOLDER: &str = "{base}";

/// Canned HTTP response.
#[derive(Debug, Clone)]
pub struct StubResponse {
    status: u16,
    content_type: String,
    body: Vec<u8>,
}

impl StubResponse {
    /// An empty `content_type` leaves the header out.
    pub fn new(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        Self { status, content_type: content_type.to_string(), body }
    }

    pub fn html(body: &str) -> Self {
        Self::new(200, "text/html; charset=utf-8", body.as_bytes().to_vec())
    }

    /// JSON object with one field pointing at `path` on this same server.
    pub fn json_with_base_url(field: &str, path: &str) -> Self {
        let body = format!(r#"{{"{}":"{}{}"}}"#, field, BASE_PLACEHOLDER, path);
        Self::new(200, "application/json", body.into_bytes())
    }
}

/// Serve `routes` (exact path match, query ignored) on an ephemeral port.
/// Unknown paths get a 404. Returns the base URL.
pub async fn serve(routes: Vec<(&str, StubResponse)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let routes: HashMap<String, StubResponse> = routes
        .into_iter()
        .map(|(path, mut response)| {
            if let Ok(text) = String::from_utf8(response.body.clone()) {
                response.body = text.replace(BASE_PLACEHOLDER, &base).into_bytes();
            }
            (path.to_string(), response)
        })
        .collect();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(handle_connection(stream, routes.clone()));
        }
    });

    base
}

/// Accept connections and never answer. Returns the base URL.
pub async fn serve_hanging() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    base
}

async fn handle_connection(mut stream: TcpStream, routes: Arc<HashMap<String, StubResponse>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    // Drain the request body before answering
    while buf.len() < header_end + content_length {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let target = head.split_whitespace().nth(1).unwrap_or("/");
    let path = target.split('?').next().unwrap_or("/");
    let response = routes.get(path).cloned().unwrap_or_else(|| StubResponse::new(404, "text/plain", b"no such route".to_vec()));

    let mut out = format!("HTTP/1.1 {} Stub\r\n", response.status);
    if !response.content_type.is_empty() {
        out.push_str(&format!("Content-Type: {}\r\n", response.content_type));
    }
    out.push_str(&format!("Content-Length: {}\r\nConnection: close\r\n\r\n", response.body.len()));

    let _ = stream.write_all(out.as_bytes()).await;
    let _ = stream.write_all(&response.body).await;
    let _ = stream.shutdown().await;
}

/// Encode interleaved samples as an in-memory 16-bit WAV file.
pub fn wav_bytes(samples: &[f32], sample_rate: u32, channels: u16) -> Vec<u8> {
    let spec = hound::WavSpec { channels, sample_rate, bits_per_sample: 16, sample_format: hound::SampleFormat::Int };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(crate::audio::util::f32_to_i16(s)).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// Clip whose every sample equals `value`, so its position in a mix is recognisable.
pub fn marker_clip(value: f32, len: usize, sample_rate: u32) -> AudioClip {
    AudioClip::new(vec![value; len], sample_rate)
}

/// Synthesizer answering from a fixed text → clip table; unknown text yields an empty clip.
pub struct ScriptedSynthesizer {
    sample_rate: u32,
    clips: HashMap<String, AudioClip>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedSynthesizer {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate, clips: HashMap::new(), calls: Mutex::new(Vec::new()) }
    }

    pub fn with_clip(mut self, text: &str, clip: AudioClip) -> Self {
        self.clips.insert(text.to_string(), clip);
        self
    }

    /// `(text, voice_id)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for ScriptedSynthesizer {
    async fn synthesize(&self, text: &str, voice_id: &str) -> AudioClip {
        self.calls.lock().push((text.to_string(), voice_id.to_string()));
        self.clips.get(text).cloned().unwrap_or_else(|| AudioClip::empty(self.sample_rate))
    }
}

/// Script writer returning a canned script, or failing when given none.
pub struct CannedScript {
    script: Option<String>,
    pub requests: Mutex<Vec<(String, u32)>>,
}

impl CannedScript {
    pub fn new(script: Option<&str>) -> Self {
        Self { script: script.map(str::to_string), requests: Mutex::new(Vec::new()) }
    }
}

#[async_trait]
impl ScriptGenerator for CannedScript {
    async fn generate(&self, blog_text: &str, length_minutes: u32) -> Result<String> {
        self.requests.lock().push((blog_text.to_string(), length_minutes));
        self.script.clone().ok_or_else(|| anyhow::anyhow!("model returned no candidates"))
    }
}
