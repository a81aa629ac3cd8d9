// Library interface for newschat modules
// This allows tests and other binaries to import modules

pub mod error;
pub mod llm;
pub mod news;
pub mod pipeline;

pub use error::{Error, Result};
