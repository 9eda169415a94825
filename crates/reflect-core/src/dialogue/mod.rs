pub mod types;

pub use types::{Conversation, Message, Persona, Role, MAINTAINER_LABEL};
