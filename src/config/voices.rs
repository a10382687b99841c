//! Voice catalogue and speaker-to-voice resolution for ElevenLabs TTS.
//!
//! The catalogue lists the premade ElevenLabs voices so they can be referred to
//! by name on the command line. Any value that is not a catalogue name is
//! treated as a raw voice id.

use crate::script::Speaker;

/// Voice id used for the host when none is configured (Aria).
pub const DEFAULT_HOST_VOICE: &str = "9BWtsMINqrJLrRacOk9x";

/// Voice id used for the guest when none is configured (Charlie).
pub const DEFAULT_GUEST_VOICE: &str = "IKne3meq5aSn9XLyUdCD";

/// Voice id used for untagged transcripts and unknown labels (Callum).
pub const DEFAULT_FALLBACK_VOICE: &str = "N2lVS1w4EtoT3dr4eOWO";

/// Essential metadata for a premade voice.
#[derive(Debug, Clone, Copy)]
pub struct PresetVoice {
    pub voice_id: &'static str,
    pub gender: &'static str,
    pub accent: &'static str,
}

/// Premade voices, sorted by name for binary search.
const PRESETS: &[(&str, PresetVoice)] = &[
    ("alice", PresetVoice { voice_id: "Xb7hH8MSUJpSbSDYk0k2", gender: "female", accent: "British" }),
    ("aria", PresetVoice { voice_id: "9BWtsMINqrJLrRacOk9x", gender: "female", accent: "American" }),
    ("bill", PresetVoice { voice_id: "pqHfZKP75CvOlQylNhV4", gender: "male", accent: "American" }),
    ("brian", PresetVoice { voice_id: "nPczCjzI2devNBz1zQrb", gender: "male", accent: "American" }),
    ("callum", PresetVoice { voice_id: "N2lVS1w4EtoT3dr4eOWO", gender: "male", accent: "Transatlantic" }),
    ("charlie", PresetVoice { voice_id: "IKne3meq5aSn9XLyUdCD", gender: "male", accent: "Australian" }),
    ("charlotte", PresetVoice { voice_id: "XB0fDUnXU5powFXDhCwa", gender: "female", accent: "Swedish" }),
    ("chris", PresetVoice { voice_id: "iP95p4xoKVk53GoZ742B", gender: "male", accent: "American" }),
    ("daniel", PresetVoice { voice_id: "onwK4e9ZLuTAKqWW03F9", gender: "male", accent: "British" }),
    ("eric", PresetVoice { voice_id: "cjVigY5qzO86Huf0OWal", gender: "male", accent: "American" }),
    ("george", PresetVoice { voice_id: "JBFqnCBsd6RMkjVDRZzb", gender: "male", accent: "British" }),
    ("jessica", PresetVoice { voice_id: "cgSgspJ2msm6clMCkdW9", gender: "female", accent: "American" }),
    ("laura", PresetVoice { voice_id: "FGY2WhTYpPnrIDTdsKH5", gender: "female", accent: "American" }),
    ("liam", PresetVoice { voice_id: "TX3LPaxmHKxFdv7VOQHJ", gender: "male", accent: "American" }),
    ("lily", PresetVoice { voice_id: "pFZP5JQG7iQjIQuC4Bku", gender: "female", accent: "British" }),
    ("matilda", PresetVoice { voice_id: "XrExE9yKIg1WjnnlVkGX", gender: "female", accent: "American" }),
    ("river", PresetVoice { voice_id: "SAz9YHcvj6GT2YYXdXww", gender: "neutral", accent: "American" }),
    ("roger", PresetVoice { voice_id: "CwhRBWXzGAHq8TQ4Fs17", gender: "male", accent: "American" }),
    ("sarah", PresetVoice { voice_id: "EXAVITQu4vr4xnSDxMaL", gender: "female", accent: "American" }),
    ("will", PresetVoice { voice_id: "bIHbv24MWmeRgasZH58o", gender: "male", accent: "American" }),
];

/// Look up a premade voice by name (case-insensitive).
pub fn get_preset(name: &str) -> Option<&'static PresetVoice> {
    let name = name.to_ascii_lowercase();
    PRESETS.binary_search_by_key(&name.as_str(), |(n, _)| *n).ok().map(|idx| &PRESETS[idx].1)
}

/// Turn a CLI voice value into a voice id: preset names map to their id,
/// anything else is taken as an id already.
pub fn voice_id_for(value: &str) -> String {
    let value = value.trim();
    get_preset(value).map(|p| p.voice_id.to_string()).unwrap_or_else(|| value.to_string())
}

/// Print the preset catalogue.
pub fn print_voices() {
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  ElevenLabs premade voices");
    println!("═══════════════════════════════════════════════════════════════════");
    println!("{:<12} {:<22} {:<8} ACCENT", "NAME", "VOICE ID", "GENDER");
    println!("{}", "─".repeat(67));

    for (name, voice) in PRESETS {
        println!("{:<12} {:<22} {:<8} {}", name, voice.voice_id, voice.gender, voice.accent);
    }

    println!("{}", "─".repeat(67));
    println!("Defaults: host=aria, guest=charlie, fallback=callum");
    println!();
    println!("Usage:");
    println!("  blog-podcaster --host-voice george --guest-voice lily <URL>");
    println!("  blog-podcaster --host-voice <any voice id from your library> <URL>");
}

/// Static speaker → voice id mapping with a default entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceMap {
    pub host: String,
    pub guest: String,
    pub default: String,
}

impl Default for VoiceMap {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST_VOICE.to_string(),
            guest: DEFAULT_GUEST_VOICE.to_string(),
            default: DEFAULT_FALLBACK_VOICE.to_string(),
        }
    }
}

impl VoiceMap {
    /// Voice id for a parsed speaker.
    pub fn resolve(&self, speaker: Speaker) -> &str {
        self.resolve_label(speaker.label())
    }

    /// Voice id for a free-form label; unknown labels get the default voice.
    pub fn resolve_label(&self, label: &str) -> &str {
        let label = label.trim();
        if label.eq_ignore_ascii_case(Speaker::Host.label()) {
            &self.host
        } else if label.eq_ignore_ascii_case(Speaker::Guest.label()) {
            &self.guest
        } else {
            &self.default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_sorted_for_binary_search() {
        assert!(PRESETS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_preset_lookup_ignores_case() {
        assert_eq!(get_preset("George").map(|p| p.voice_id), Some("JBFqnCBsd6RMkjVDRZzb"));
        assert!(get_preset("nobody").is_none());
    }

    #[test]
    fn test_voice_id_for_passes_raw_ids_through() {
        assert_eq!(voice_id_for("aria"), DEFAULT_HOST_VOICE);
        assert_eq!(voice_id_for(" customVoiceId123 "), "customVoiceId123");
    }

    #[test]
    fn test_resolve_known_speakers() {
        let voices = VoiceMap::default();
        assert_eq!(voices.resolve(Speaker::Host), DEFAULT_HOST_VOICE);
        assert_eq!(voices.resolve(Speaker::Guest), DEFAULT_GUEST_VOICE);
        assert_eq!(voices.resolve(Speaker::Default), DEFAULT_FALLBACK_VOICE);
    }

    #[test]
    fn test_resolve_label_is_total() {
        let voices = VoiceMap { host: "h".into(), guest: "g".into(), default: "d".into() };
        assert_eq!(voices.resolve_label("host"), "h");
        assert_eq!(voices.resolve_label("GUEST"), "g");
        for label in ["", "DEFAULT", "NARRATOR", "[HOST]", "🎙"] {
            assert_eq!(voices.resolve_label(label), "d");
        }
    }
}
