//! Podcast assembly and the end-to-end pipeline.

mod assembler;
mod conversation;
mod pipeline;

pub use assembler::{AssembleError, Assembler};
pub use conversation::Conversation;
pub use pipeline::Pipeline;
