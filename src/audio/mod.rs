//! Audio primitives for building the podcast file.
//!
//! Clips are decoded from provider payloads, converted to the output sample
//! rate with rubato, and finally encoded as WAV with hound.

mod clip;
pub mod decode;
pub mod resampler;
pub mod util;
mod wav;

pub use clip::AudioClip;
pub use decode::{DecodeError, decode_audio};
pub use wav::write_wav;
