use reflect_core::{SignalPolicy, TokenBudget};

use crate::prompts;

/// Configuration for one experiment run. Passed in at construction; there is
/// no process-wide state.
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Loop bound; reaching it is a normal completion, not a failure.
    pub max_iterations: usize,
    /// Per-conversation approximate-token budget for history trimming.
    pub token_budget: TokenBudget,
    /// How STOP/QUESTION tokens are matched in generated replies.
    pub signal_policy: SignalPolicy,
    pub inquirer_prompt: String,
    pub respondent_prompt: String,
    pub initial_instruction: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            token_budget: TokenBudget::new(4000),
            signal_policy: SignalPolicy::ExactMatch,
            inquirer_prompt: prompts::INQUIRER_PROMPT.to_string(),
            respondent_prompt: prompts::RESPONDENT_PROMPT.to_string(),
            initial_instruction: prompts::INITIAL_INSTRUCTION.to_string(),
        }
    }
}
