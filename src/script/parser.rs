//! Single-pass scanner that splits a speaker-tagged transcript into segments.
//!
//! A transcript looks like:
//!
//! ```text
//! [HOST] Welcome to the show!
//! [GUEST] Thanks for having me. [laughs] It's great to be here.
//! ```
//!
//! Recognised tags (`[HOST]`, `[GUEST]`, any case) open a new segment. Any other
//! bracketed token closed on the same line is a stray cue marker and is removed
//! from the surrounding text.

use std::fmt;

/// Who speaks a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    Host,
    Guest,
    /// Sentinel for transcripts that carry no recognised tag at all.
    Default,
}

impl Speaker {
    /// Match a bracket label against the closed set of speaker tags.
    fn from_tag(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("HOST") {
            Some(Speaker::Host)
        } else if label.eq_ignore_ascii_case("GUEST") {
            Some(Speaker::Guest)
        } else {
            None
        }
    }

    /// Upper-case label as written in transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Host => "HOST",
            Speaker::Guest => "GUEST",
            Speaker::Default => "DEFAULT",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One utterance of the dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub speaker: Speaker,
    pub text: String,
}

impl Segment {
    fn new(speaker: Speaker, text: String) -> Self {
        Self { speaker, text }
    }
}

/// Scanner state: text before the first tag, the open segment, and the
/// segments closed so far.
#[derive(Default)]
struct Scanner {
    preamble: String,
    current: Option<(Speaker, String)>,
    segments: Vec<Segment>,
    tagged: bool,
}

impl Scanner {
    fn push_text(&mut self, text: &str) {
        match self.current.as_mut() {
            Some((_, body)) => body.push_str(text),
            None => self.preamble.push_str(text),
        }
    }

    fn open(&mut self, speaker: Speaker) {
        self.close();
        self.tagged = true;
        self.current = Some((speaker, String::new()));
    }

    fn close(&mut self) {
        if let Some((speaker, body)) = self.current.take() {
            let text = collapse_whitespace(&body);
            if !text.is_empty() {
                self.segments.push(Segment::new(speaker, text));
            }
        }
    }

    fn finish(mut self) -> Vec<Segment> {
        self.close();

        // Preamble only counts when the transcript has no tags at all
        if !self.tagged {
            let text = collapse_whitespace(&self.preamble);
            if !text.is_empty() {
                self.segments.push(Segment::new(Speaker::Default, text));
            }
        }

        self.segments
    }
}

/// Split a transcript into ordered speaker segments.
///
/// Segments come out in the order their tags appear. Empty segments are
/// dropped. When the transcript has no recognised tag the whole cleaned text
/// becomes a single [`Speaker::Default`] segment.
pub fn parse_transcript(transcript: &str) -> Vec<Segment> {
    let mut scanner = Scanner::default();

    // Text before `flushed` has been handed to the scanner. `pending` is the
    // earliest unclosed '[' on the current line, `last_open` the latest.
    let mut flushed = 0;
    let mut pending: Option<usize> = None;
    let mut last_open = 0;

    for (i, c) in transcript.char_indices() {
        match c {
            '[' => {
                if pending.is_none() {
                    scanner.push_text(&transcript[flushed..i]);
                    flushed = i;
                    pending = Some(i);
                }
                last_open = i;
            }
            ']' => {
                let Some(start) = pending.take() else { continue };
                if let Some(speaker) = Speaker::from_tag(&transcript[last_open + 1..i]) {
                    // Unclosed brackets in front of a tag stay literal
                    scanner.push_text(&transcript[start..last_open]);
                    scanner.open(speaker);
                }
                // Anything else from the outer '[' through ']' is a cue and is dropped
                flushed = i + 1;
            }
            '\n' => pending = None,
            _ => {}
        }
    }
    scanner.push_text(&transcript[flushed..]);

    scanner.finish()
}

/// Trim and collapse every run of whitespace (newlines included) to one space.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
