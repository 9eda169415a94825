//! reflect-core - Core types for the self-reflection dialogue system
//!
//! This crate provides the foundational pieces used across the workspace:
//! - `dialogue` - Role, Message, Persona, Conversation
//! - `budget` - token estimation and history trimming
//! - `signal` - STOP/QUESTION/CONTINUE classification
//! - `io` - transcript and human-input collaborator traits

pub mod budget;
pub mod dialogue;
pub mod error;
pub mod io;
pub mod signal;

// Re-export commonly used types
pub use budget::{estimate_tokens, TokenBudget};
pub use dialogue::{Conversation, Message, Persona, Role, MAINTAINER_LABEL};
pub use error::ReflectError;
pub use io::{HumanInput, Transcript};
pub use signal::{ControlSignal, SignalPolicy};
