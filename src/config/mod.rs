//! Configuration module for the podcast generator.
//!
//! Provides CLI argument parsing, voice presets and speaker voice mapping.

#[allow(clippy::module_inception)]
mod config;
pub mod voices;

pub use config::{AppConfig, TtsTransport};
pub use voices::VoiceMap;
