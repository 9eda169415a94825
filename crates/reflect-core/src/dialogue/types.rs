use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire name used by OpenAI-compatible chat endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(default = "generate_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// The two automated sides of the dialogue. The human operator appears in
/// transcripts under the separate `MAINTAINER_LABEL`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Inquirer,
    Respondent,
}

impl Persona {
    pub fn label(&self) -> &'static str {
        match self {
            Persona::Inquirer => "Inquirer",
            Persona::Respondent => "Respondent",
        }
    }
}

/// Transcript role label for human interventions.
pub const MAINTAINER_LABEL: &str = "MAINTAINER";

/// One persona's message history. Always starts with exactly one system
/// message; trimming never evicts it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub persona: Persona,
    pub messages: Vec<Message>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(persona: Persona, system_prompt: impl Into<String>) -> Self {
        Self {
            persona,
            messages: vec![Message::system(system_prompt)],
            updated_at: Utc::now(),
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
