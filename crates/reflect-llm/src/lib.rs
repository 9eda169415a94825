pub mod openai;
pub mod provider;

pub use openai::{GenerationParams, OpenAiCompatClient};
pub use provider::{CompletionClient, CompletionError, Result};
