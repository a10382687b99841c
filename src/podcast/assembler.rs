//! Conversation assembler: transcript in, podcast file out.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::Conversation;
use crate::config::VoiceMap;
use crate::script::parse_transcript;
use crate::tts::SpeechSynthesizer;

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("no audible content was synthesized")]
    NoAudio,
    #[error("failed to write {}: {reason:#}", .path.display())]
    Write { path: PathBuf, reason: anyhow::Error },
}

/// Drives parsing, voice selection and synthesis for one transcript at a time.
///
/// Segments are synthesized one after another in transcript order; a segment
/// that fails to synthesize is skipped and the rest still make it into the file.
pub struct Assembler<S> {
    synthesizer: S,
    voices: VoiceMap,
    sample_rate: u32,
    gap: Duration,
}

impl<S: SpeechSynthesizer> Assembler<S> {
    /// # Arguments
    /// * `synthesizer` - Per-utterance TTS
    /// * `voices` - Speaker to voice id mapping
    /// * `sample_rate` - Output sample rate of the finished file
    /// * `gap` - Silence inserted between consecutive utterances
    pub fn new(synthesizer: S, voices: VoiceMap, sample_rate: u32, gap: Duration) -> Self {
        Self { synthesizer, voices, sample_rate, gap }
    }

    /// Synthesize every segment of `transcript` into an in-memory conversation.
    pub async fn render(&self, transcript: &str) -> Conversation {
        let segments = parse_transcript(transcript);
        let total = segments.len();
        info!("🎙️  Synthesizing {} segment(s)", total);

        let mut conversation = Conversation::new(self.sample_rate, self.gap);

        for (i, segment) in segments.iter().enumerate() {
            let voice_id = self.voices.resolve(segment.speaker);
            debug!("Segment {}/{} [{}] with voice {}", i + 1, total, segment.speaker, voice_id);

            let clip = self.synthesizer.synthesize(&segment.text, voice_id).await;
            if clip.is_empty() {
                warn!("Segment {}/{} [{}] produced no audio, skipping", i + 1, total, segment.speaker);
                continue;
            }

            if let Err(e) = conversation.append(clip) {
                warn!("Segment {}/{} [{}] could not be appended: {:#}", i + 1, total, segment.speaker, e);
            }
        }

        conversation
    }

    /// Synthesize `transcript` and write the result to `output`.
    ///
    /// Returns the written path. When no segment produced audio nothing is
    /// written and [`AssembleError::NoAudio`] is returned.
    pub async fn assemble(&self, transcript: &str, output: &Path) -> Result<PathBuf, AssembleError> {
        let conversation = self.render(transcript).await;

        if conversation.is_empty() {
            error!("❌ No audio was synthesized; not writing {}", output.display());
            return Err(AssembleError::NoAudio);
        }

        let clips = conversation.clip_count();
        let duration = conversation.duration();
        conversation.write(output).map_err(|reason| AssembleError::Write { path: output.to_path_buf(), reason })?;

        info!("💾 Wrote {} ({} clip(s), {:.1}s)", output.display(), clips, duration.as_secs_f32());
        Ok(output.to_path_buf())
    }
}
