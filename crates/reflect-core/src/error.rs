use thiserror::Error;

/// Fatal-to-run errors. STOP/QUESTION control signals are not errors and
/// never surface here.
#[derive(Error, Debug)]
pub enum ReflectError {
    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Human input stream closed")]
    InputClosed,

    #[error("Cancelled")]
    Cancelled,
}
