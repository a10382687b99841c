//! Podcast script writer using RIG with the Gemini provider.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rig::agent::Agent;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::gemini;
use tracing::{debug, info};

use super::ScriptGenerator;
use crate::config::AppConfig;

/// Upper bound on the script length given to the model, whatever the duration.
const MAX_SCRIPT_WORDS: u32 = 2900;

/// System preamble for the script writer agent.
const PREAMBLE: &str = "You are an expert podcast scriptwriter and content creator.";

/// LLM client that turns blog text into a two-speaker podcast script.
pub struct LlmClient {
    agent: Agent<gemini::completion::CompletionModel>, // RIG agent with Gemini backend
    model: String,                                     // Model name, for logging
}

impl LlmClient {
    /// Create a new LLM client.
    ///
    /// # Errors
    /// Returns an error if the Gemini client cannot be created.
    pub fn new(config: &AppConfig) -> Result<Self> {
        info!("Using Gemini model: {}", config.gemini_model);

        let client = gemini::Client::builder().api_key(&config.gemini_api_key).build().context("Failed to create Gemini client")?;

        let agent = client.agent(&config.gemini_model).preamble(PREAMBLE).temperature(config.temperature as f64).build();

        Ok(Self { agent, model: config.gemini_model.clone() })
    }
}

#[async_trait]
impl ScriptGenerator for LlmClient {
    async fn generate(&self, blog_text: &str, length_minutes: u32) -> Result<String> {
        let prompt = build_prompt(blog_text, length_minutes);
        info!("Sending script request to {} ({} prompt characters)...", self.model, prompt.len());

        let script = self.agent.prompt(prompt.as_str()).await.context("Gemini request failed")?;

        if script.trim().is_empty() {
            anyhow::bail!("Gemini returned an empty script");
        }

        debug!("Script:\n{}", script);
        Ok(script)
    }
}

/// Build the script-writing prompt for a blog post and target duration.
pub fn build_prompt(blog_text: &str, length_minutes: u32) -> String {
    format!(
        "Your task is to transform the following detailed blog post into a dynamic and engaging podcast script. \
         The script must include host and guest interactions. Please create distinct identities for them: \
         make the host a male with a friendly tone, and the guest a knowledgeable female expert in the field. \
         Use natural, conversational dialogue suitable for spoken audio, not stiff or overly formal writing. \
         **Do not include sound effects or music cues.**\n\n\
         Here is the desired **script format**:\n\
         [HOST] Welcome to the podcast! Today, we have a very special guest with us. How are you doing today?\n\
         [GUEST] I'm doing great, thank you for having me! It's wonderful to be here.\n\
         [HOST] It's our pleasure. We're going to talk about some exciting new developments in AI.\n\
         [GUEST] Yes, I'm really looking forward to diving into that.\n\
         [HOST] Fantastic. Let's start with your latest research.\n\n\
         Here are your content and style requirements:\n\
         - The podcast should be approximately **{minutes} minutes long**, so keep the total word count under **{words} words**.\n\
         - Structure the podcast with: a clear **introduction**, **3 to 4 distinct segments** focusing on the blog's key themes, and a strong **conclusion**.\n\
         - Use labeled speaker lines (e.g., [HOST], [GUEST]) for clarity.\n\
         - Keep the tone **informative, accessible, slightly enthusiastic**, and avoid jargon (or explain it simply if used).\n\
         - Ensure **smooth transitions** between segments.\n\n\
         --- Blog Post Content ---\n{blog}\n\n\
         --- Podcast Script ---\n",
        minutes = length_minutes,
        words = MAX_SCRIPT_WORDS,
        blog = blog_text,
    )
}
