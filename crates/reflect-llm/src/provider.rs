use async_trait::async_trait;
use reflect_core::{Message, ReflectError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest_middleware::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::Http(reqwest_middleware::Error::Reqwest(err))
    }
}

impl From<CompletionError> for ReflectError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::MalformedResponse(detail) => {
                ReflectError::MalformedResponse(detail)
            }
            other => ReflectError::Completion(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompletionError>;

/// Single-reply completion over an ordered message history.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}
