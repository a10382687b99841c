//! WAV encoding for the finished conversation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};

use super::util::f32_to_i16;

/// Write mono f32 samples as a 16-bit PCM WAV file.
///
/// Missing parent directories are created. An existing file is overwritten.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let spec = WavSpec { channels: 1, sample_rate, bits_per_sample: 16, sample_format: SampleFormat::Int };
    let mut writer = WavWriter::create(path, spec).with_context(|| format!("Failed to create {}", path.display()))?;

    for &sample in samples {
        writer.write_sample(f32_to_i16(sample))?;
    }
    writer.finalize().context("Failed to finalize WAV file")?;

    Ok(())
}
