//! Append-only audio buffer for one conversation.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::audio::resampler::resample_clip;
use crate::audio::{AudioClip, write_wav};

/// Clips concatenated in order, separated by a fixed silence.
#[derive(Debug)]
pub struct Conversation {
    sample_rate: u32,
    gap: Duration,
    samples: Vec<f32>,
    clips: usize,
}

impl Conversation {
    pub fn new(sample_rate: u32, gap: Duration) -> Self {
        Self { sample_rate, gap, samples: Vec::new(), clips: 0 }
    }

    /// Append a clip, converting it to the conversation rate first.
    ///
    /// Empty clips are ignored. The gap goes between clips only, never at
    /// the start or end.
    pub fn append(&mut self, clip: AudioClip) -> Result<()> {
        if clip.is_empty() {
            return Ok(());
        }

        let clip = resample_clip(clip, self.sample_rate)?;
        if clip.is_empty() {
            return Ok(());
        }

        if self.clips > 0 {
            self.samples.extend(AudioClip::silence(self.gap, self.sample_rate).samples);
        }
        self.samples.extend_from_slice(&clip.samples);
        self.clips += 1;

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of clips appended so far.
    pub fn clip_count(&self) -> usize {
        self.clips
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate.max(1) as f64)
    }

    /// Encode the conversation to `path`, consuming the buffer.
    pub fn write(self, path: &Path) -> Result<()> {
        write_wav(path, self.samples(), self.sample_rate)
    }
}
