//! Collaborator traits at the orchestrator's I/O seams.

use async_trait::async_trait;

use crate::error::ReflectError;

/// Append-only transcript sink. Implementations stamp each entry with the
/// current time, write the durable record, and mirror a human-readable echo.
///
/// Write failures must not abort the run; implementations log a warning and
/// carry on.
pub trait Transcript: Send {
    fn append(&mut self, role_label: &str, text: &str);
}

/// Blocking line read from the interactive surface, used only when a persona
/// emits a QUESTION signal.
#[async_trait]
pub trait HumanInput: Send {
    /// Returns `ReflectError::InputClosed` when the stream is exhausted.
    async fn read_line(&mut self, prompt: &str) -> Result<String, ReflectError>;
}
