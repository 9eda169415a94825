//! Control-signal classification for generated replies.
//!
//! The personas may emit the literal tokens "STOP" or "QUESTION" to end the
//! run or to consult the human maintainer. Both matching policies observed
//! in the wild are supported; one policy is chosen at configuration time and
//! applied uniformly to both personas' replies.

use serde::{Deserialize, Serialize};

const STOP_TOKEN: &str = "STOP";
const QUESTION_TOKEN: &str = "QUESTION";

/// Classification of a generated reply. Derived per reply, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    Stop,
    Question,
    Continue,
}

/// How replies are matched against the control tokens.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SignalPolicy {
    /// The whole reply, trimmed and case-normalized, must equal the token.
    /// Default: avoids false positives when the word appears incidentally
    /// inside a longer answer.
    #[default]
    ExactMatch,
    /// The uppercase token may appear anywhere in the reply. STOP is checked
    /// before QUESTION.
    Substring,
}

impl SignalPolicy {
    pub fn classify(&self, reply: &str) -> ControlSignal {
        match self {
            SignalPolicy::ExactMatch => {
                let normalized = reply.trim().to_ascii_uppercase();
                if normalized == STOP_TOKEN {
                    ControlSignal::Stop
                } else if normalized == QUESTION_TOKEN {
                    ControlSignal::Question
                } else {
                    ControlSignal::Continue
                }
            }
            SignalPolicy::Substring => {
                if reply.contains(STOP_TOKEN) {
                    ControlSignal::Stop
                } else if reply.contains(QUESTION_TOKEN) {
                    ControlSignal::Question
                } else {
                    ControlSignal::Continue
                }
            }
        }
    }
}
