//! Blog Podcaster - turn a blog post into a two-speaker podcast.
//!
//! Fetches a blog post, has Gemini (via RIG) write a `[HOST]`/`[GUEST]`
//! dialogue about it, voices each turn with ElevenLabs, and stitches the
//! clips into a single audio file.

mod audio;
mod config;
mod llm;
mod podcast;
mod script;
mod tts;
mod web;

#[cfg(test)]
mod test_support;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use config::AppConfig;
use llm::LlmClient;
use podcast::{Assembler, Pipeline};
use tts::ElevenLabsSynthesizer;
use web::BlogFetcher;

/// Ask for the blog URL on stdin.
fn prompt_for_url() -> Result<String> {
    print!("Enter the blog URL: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("Failed to read URL from stdin")?;
    Ok(line.trim().to_string())
}

/// Build the stages and run them for the configured input.
async fn run(config: &AppConfig) -> Result<()> {
    let output = config.output_path();

    let synthesizer = ElevenLabsSynthesizer::new(config.tts_config())?;
    let assembler = Assembler::new(synthesizer, config.voice_map(), config.output_sample_rate(), config.silence());

    let written = if let Some(ref script_path) = config.script_file {
        let script = std::fs::read_to_string(script_path).with_context(|| format!("Failed to read script file {}", script_path.display()))?;
        info!("📜 Loaded script from {} ({} characters)", script_path.display(), script.len());
        assembler.assemble(&script, &output).await?
    } else {
        let url = match config.url {
            Some(ref url) => url.trim().to_string(),
            None => prompt_for_url()?,
        };
        if url.is_empty() {
            anyhow::bail!("No blog URL given");
        }

        let fetcher = BlogFetcher::new(config.fetch_timeout())?;
        let writer = LlmClient::new(config)?;
        let pipeline = Pipeline::new(fetcher, writer, assembler, config.save_script);
        pipeline.run(&url, config.length_minutes, &output).await?
    };

    info!("✅ Podcast generated successfully!");
    info!("🎧 Audio file: {}", written.display());
    Ok(())
}

#[tokio::main]
async fn main() {
    // Pick up API keys from a local .env before clap reads the environment
    dotenvy::dotenv().ok();

    let config = AppConfig::from_args();

    // Respect RUST_LOG env var, fallback to verbose flag, default to info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if config.verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();

    info!("🎙️  Blog Podcaster v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = config.validate() {
        error!("❌ Configuration error: {}", e);
        std::process::exit(1);
    }

    config.log_config();

    if let Err(e) = run(&config).await {
        error!("❌ {:#}", e);
        std::process::exit(1);
    }
}
