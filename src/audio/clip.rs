//! In-memory mono audio clip.

use std::time::Duration;

/// Decoded mono audio at a known sample rate.
///
/// An empty clip (no samples) stands for a failed synthesis and contributes
/// nothing when assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioClip {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self { samples, sample_rate }
    }

    /// Zero-duration clip.
    pub fn empty(sample_rate: u32) -> Self {
        Self { samples: Vec::new(), sample_rate }
    }

    /// Digital silence of the given length.
    pub fn silence(duration: Duration, sample_rate: u32) -> Self {
        Self { samples: vec![0.0; samples_for(duration, sample_rate)], sample_rate }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }
}

/// Number of samples covering `duration` at `sample_rate`, rounded.
fn samples_for(duration: Duration, sample_rate: u32) -> usize {
    (duration.as_secs_f64() * sample_rate as f64).round() as usize
}
