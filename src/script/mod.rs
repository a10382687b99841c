//! Dialogue script handling.
//!
//! Turns the speaker-tagged transcript produced by the script writer into an
//! ordered list of segments ready for synthesis.

mod parser;

pub use parser::{Speaker, parse_transcript};
