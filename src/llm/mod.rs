//! LLM client module for writing podcast scripts.
//!
//! Uses RIG with the Gemini provider.

mod client;

use anyhow::Result;
use async_trait::async_trait;

pub use client::LlmClient;

/// Writes a `[HOST]`/`[GUEST]` dialogue script from blog text.
#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    async fn generate(&self, blog_text: &str, length_minutes: u32) -> Result<String>;
}
