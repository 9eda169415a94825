//! reflect-loop - The dual-conversation orchestrator.
//!
//! Drives the Inquirer/Respondent exchange: owns both message histories,
//! trims them to the token budget after each accepted turn, classifies every
//! generated reply for STOP/QUESTION control signals, and handles
//! human-in-the-loop interventions.

pub mod config;
pub mod prompts;
pub mod runner;

pub use config::ExperimentConfig;
pub use runner::{extract_next_question, Experiment, Phase, RunOutcome};
