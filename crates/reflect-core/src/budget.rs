//! Approximate token accounting and history trimming.
//!
//! The estimate is length-based only. It does not need to be linguistically
//! accurate; it only has to give a consistent relative cost signal so the
//! trimmer knows when to start evicting old turns.

use crate::dialogue::Conversation;

/// Bytes per approximate token.
const BYTES_PER_TOKEN: usize = 4;

/// Fast, deterministic token estimate derived from text length alone.
pub fn estimate_tokens(text: &str) -> usize {
    text.len() / BYTES_PER_TOKEN
}

/// Maximum cumulative approximate-token budget for one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    pub max_tokens: usize,
}

impl TokenBudget {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    fn total(conversation: &Conversation) -> usize {
        conversation
            .messages
            .iter()
            .map(|m| estimate_tokens(&m.content))
            .sum()
    }

    /// Evict oldest non-system turns (index 1) until the conversation fits
    /// the budget or only the system message plus one turn remain. Returns
    /// the number of evicted messages.
    ///
    /// The system message at index 0 is never removed, and the history is
    /// never reduced below 2 entries; a 2-entry history that still exceeds
    /// the budget is accepted as-is.
    pub fn trim(&self, conversation: &mut Conversation) -> usize {
        let mut evicted = 0;
        while Self::total(conversation) > self.max_tokens {
            if conversation.len() > 2 {
                conversation.messages.remove(1);
                evicted += 1;
            } else {
                break;
            }
        }
        if evicted > 0 {
            log::debug!(
                "[{}] trimmed {} message(s), {} remaining (~{} tokens, budget {})",
                conversation.persona.label(),
                evicted,
                conversation.len(),
                Self::total(conversation),
                self.max_tokens
            );
        }
        evicted
    }
}
