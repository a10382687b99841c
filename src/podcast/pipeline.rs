//! Blog URL to podcast file: fetch, extract, write script, assemble audio.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::{AssembleError, Assembler};
use crate::llm::ScriptGenerator;
use crate::tts::SpeechSynthesizer;
use crate::web::{BlogFetcher, extract_blog_text};

/// The stage that stopped a run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to fetch blog content: {0:#}")]
    Fetch(anyhow::Error),
    #[error("failed to parse blog content: no readable text found")]
    NoContent,
    #[error("failed to generate podcast script: {0:#}")]
    Script(anyhow::Error),
    #[error("failed to convert podcast script to audio: {0}")]
    Audio(#[from] AssembleError),
    #[error("failed to save script to {}: {source}", .path.display())]
    SaveScript { path: PathBuf, source: std::io::Error },
}

/// Sequential blog-to-podcast chain. Each stage gates the next.
pub struct Pipeline<G, S> {
    fetcher: BlogFetcher,
    writer: G,
    assembler: Assembler<S>,
    save_script: bool,
}

impl<G: ScriptGenerator, S: SpeechSynthesizer> Pipeline<G, S> {
    /// # Arguments
    /// * `fetcher` - Blog page downloader
    /// * `writer` - Script writer (LLM)
    /// * `assembler` - Transcript to audio file
    /// * `save_script` - Also keep the transcript next to the audio file
    pub fn new(fetcher: BlogFetcher, writer: G, assembler: Assembler<S>, save_script: bool) -> Self {
        Self { fetcher, writer, assembler, save_script }
    }

    /// Run every stage for `url`, stopping at the first failure.
    pub async fn run(&self, url: &str, length_minutes: u32, output: &Path) -> Result<PathBuf, PipelineError> {
        info!("🌐 Starting processing for blog URL: {}", url);

        let html = self.fetcher.fetch(url).await.map_err(PipelineError::Fetch)?;

        info!("📄 Parsing blog content...");
        let blog_text = extract_blog_text(&html).ok_or(PipelineError::NoContent)?;
        info!("Blog content extracted, length: {} characters", blog_text.len());

        info!("🧠 Generating {}-minute podcast script...", length_minutes);
        let script = self.writer.generate(&blog_text, length_minutes).await.map_err(PipelineError::Script)?;
        info!("Podcast script generated, length: {} characters", script.len());

        self.synthesize_script(&script, output).await
    }

    /// Turn an existing transcript into audio at `output`.
    async fn synthesize_script(&self, script: &str, output: &Path) -> Result<PathBuf, PipelineError> {
        info!("🔊 Converting podcast script to audio...");
        let path = self.assembler.assemble(script, output).await?;

        if self.save_script {
            let script_path = path.with_extension("txt");
            tokio::fs::write(&script_path, script).await.map_err(|source| PipelineError::SaveScript { path: script_path.clone(), source })?;
            info!("📝 Script saved to {}", script_path.display());
        }

        Ok(path)
    }
}
