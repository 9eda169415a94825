use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use reflect_core::{
    Conversation, ControlSignal, HumanInput, Message, Persona, ReflectError, Transcript,
    MAINTAINER_LABEL,
};
use reflect_llm::CompletionClient;

use crate::config::ExperimentConfig;

pub type Result<T> = std::result::Result<T, ReflectError>;

/// Orchestrator states. Stopped and Completed are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    AwaitRespondent,
    AwaitInquirer,
    HumanIntervention,
    Stopped,
    Completed,
}

/// How a run ended. Both variants are successful shutdowns, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A persona emitted the STOP token.
    Stopped,
    /// The configured iteration budget was exhausted.
    Completed,
}

/// Extract the next question from the Inquirer's combined
/// analysis-and-question reply: the last non-blank line, trimmed. The rest
/// is discarded analysis commentary.
///
/// Known limitation: fragile if the model wraps the question across lines.
pub fn extract_next_question(reply: &str) -> &str {
    reply
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// What an intervention-capable reply classification asks the runner to do
/// next.
enum Step {
    Proceed,
    Restart,
    Stop,
}

/// One self-reflection experiment run. Owns both conversation histories for
/// its lifetime; they are never accessed concurrently.
pub struct Experiment {
    config: ExperimentConfig,
    inquirer: Conversation,
    respondent: Conversation,
    phase: Phase,
    iterations: usize,
}

impl Experiment {
    pub fn new(config: ExperimentConfig) -> Self {
        let inquirer = Conversation::new(Persona::Inquirer, &config.inquirer_prompt);
        let respondent = Conversation::new(Persona::Respondent, &config.respondent_prompt);
        Self {
            config,
            inquirer,
            respondent,
            phase: Phase::Init,
            iterations: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Full iterations completed so far. Human interventions do not consume
    /// an iteration.
    pub fn iterations_completed(&self) -> usize {
        self.iterations
    }

    pub fn inquirer(&self) -> &Conversation {
        &self.inquirer
    }

    pub fn respondent(&self) -> &Conversation {
        &self.respondent
    }

    fn transition(&mut self, next: Phase) {
        if self.phase != next {
            log::debug!("phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
    }

    /// Run the experiment to a terminal phase.
    ///
    /// Strictly sequential: each iteration completes its Respondent
    /// round-trip before the Inquirer round-trip begins. The cancellation
    /// token is honored at every suspension point.
    pub async fn run(
        &mut self,
        llm: Arc<dyn CompletionClient>,
        transcript: &mut dyn Transcript,
        human: &mut dyn HumanInput,
        cancel_token: CancellationToken,
    ) -> Result<RunOutcome> {
        let mut question = self.initial_question(&llm, transcript, &cancel_token).await?;

        while self.iterations < self.config.max_iterations {
            // Respondent round-trip: answer the current question.
            self.transition(Phase::AwaitRespondent);
            ensure_not_cancelled(&cancel_token)?;
            self.respondent.push(Message::user(&question));
            let answer = llm.complete(&self.respondent.messages).await?;

            match self
                .handle_signal(Persona::Respondent, &answer, transcript, human, &cancel_token)
                .await?
            {
                Step::Stop => return Ok(RunOutcome::Stopped),
                // Re-deliver the same question after the intervention so the
                // interrupted turn's content is not lost.
                Step::Restart => continue,
                Step::Proceed => {
                    self.respondent.push(Message::assistant(&answer));
                    self.config.token_budget.trim(&mut self.respondent);
                    transcript.append(Persona::Respondent.label(), &answer);
                }
            }

            // Inquirer round-trip: analyze the answer, produce the next question.
            self.transition(Phase::AwaitInquirer);
            ensure_not_cancelled(&cancel_token)?;
            self.inquirer.push(Message::user(&answer));
            let analysis_and_question = llm.complete(&self.inquirer.messages).await?;

            match self
                .handle_signal(
                    Persona::Inquirer,
                    &analysis_and_question,
                    transcript,
                    human,
                    &cancel_token,
                )
                .await?
            {
                Step::Stop => return Ok(RunOutcome::Stopped),
                Step::Restart => continue,
                Step::Proceed => {
                    self.inquirer.push(Message::assistant(&analysis_and_question));
                    self.config.token_budget.trim(&mut self.inquirer);
                    question = extract_next_question(&analysis_and_question).to_string();
                    transcript.append(Persona::Inquirer.label(), &analysis_and_question);
                }
            }

            self.iterations += 1;
            log::debug!("iteration {} completed", self.iterations);
        }

        self.transition(Phase::Completed);
        Ok(RunOutcome::Completed)
    }

    /// Init phase: ask the Inquirer for the first self-directed question.
    async fn initial_question(
        &mut self,
        llm: &Arc<dyn CompletionClient>,
        transcript: &mut dyn Transcript,
        cancel_token: &CancellationToken,
    ) -> Result<String> {
        ensure_not_cancelled(cancel_token)?;
        self.inquirer
            .push(Message::user(&self.config.initial_instruction));
        let reply = llm.complete(&self.inquirer.messages).await?;
        self.inquirer.push(Message::assistant(&reply));
        self.config.token_budget.trim(&mut self.inquirer);

        let question = reply.trim().to_string();
        transcript.append(Persona::Inquirer.label(), &question);
        Ok(question)
    }

    /// Classify a generated reply and act on a STOP or QUESTION signal.
    ///
    /// On QUESTION the maintainer's input is wrapped as a `[MAINTAINER]`
    /// user turn, appended to BOTH histories, and both histories are
    /// re-trimmed; the caller restarts the iteration without advancing the
    /// counter.
    async fn handle_signal(
        &mut self,
        persona: Persona,
        reply: &str,
        transcript: &mut dyn Transcript,
        human: &mut dyn HumanInput,
        cancel_token: &CancellationToken,
    ) -> Result<Step> {
        match self.config.signal_policy.classify(reply) {
            ControlSignal::Continue => Ok(Step::Proceed),
            ControlSignal::Stop => {
                log::info!("{} requested to stop, ending experiment", persona.label());
                transcript.append(persona.label(), reply);
                self.transition(Phase::Stopped);
                Ok(Step::Stop)
            }
            ControlSignal::Question => {
                self.transition(Phase::HumanIntervention);
                transcript.append(persona.label(), reply);

                ensure_not_cancelled(cancel_token)?;
                let input = human.read_line("Need human answer: ").await?;
                let maintainer_message = format!("[MAINTAINER] {}", input);
                self.inquirer.push(Message::user(&maintainer_message));
                self.respondent.push(Message::user(&maintainer_message));
                transcript.append(MAINTAINER_LABEL, &input);

                self.config.token_budget.trim(&mut self.inquirer);
                self.config.token_budget.trim(&mut self.respondent);
                Ok(Step::Restart)
            }
        }
    }
}

fn ensure_not_cancelled(cancel_token: &CancellationToken) -> Result<()> {
    if cancel_token.is_cancelled() {
        Err(ReflectError::Cancelled)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_question_is_last_non_blank_line() {
        let reply = "We learned something here.\n\n  What do we fear most?  \n\n";
        assert_eq!(extract_next_question(reply), "What do we fear most?");
    }

    #[test]
    fn single_line_reply_is_the_question() {
        assert_eq!(extract_next_question("Who are we?"), "Who are we?");
    }

    #[test]
    fn blank_reply_yields_empty_question() {
        assert_eq!(extract_next_question("\n  \n"), "");
    }
}
