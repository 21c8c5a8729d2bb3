//! Context accumulation.
//!
//! Decides which prior entries a speaker sees on its next turn and tags
//! them for a two-party chat model: the session's host speaks as
//! `assistant`, everyone else is folded into `user`. Adjacent messages with
//! the same role are merged so the window always alternates.

use super::entry::DiscussionEntry;
use super::round::RoundState;
use crate::session::entities::{Message, Role};

/// Which turn inside a round the window is being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnSlot {
    /// The host's opening turn of the round
    HostOpening,
    /// A specialist reply after the host has opened the round
    SpecialistReply,
}

/// Ordered `{role, content}` messages handed to a model for one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextWindow {
    messages: Vec<Message>,
}

impl ContextWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Role::User, content.into());
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Role::Assistant, content.into());
    }

    fn push(&mut self, role: Role, content: String) {
        match self.messages.last_mut() {
            Some(last) if last.role == role => {
                last.content.push_str("\n\n");
                last.content.push_str(&content);
            }
            _ => self.messages.push(Message { role, content }),
        }
    }

    /// Append a closing instruction for the speaker as a user turn.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.push_user(instruction);
        self
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

/// Build the context window for the next speaker.
///
/// * Host, round 0: empty.
/// * Host, round R > 0: every non-system entry before the round boundary.
/// * Specialist: every non-system entry from the round boundary onward,
///   i.e. the host's opening plus earlier replies in this round.
///
/// Pure: the same snapshot and round state always yield the same window.
pub fn accumulate_context(
    snapshot: &[DiscussionEntry],
    round: &RoundState,
    slot: TurnSlot,
    host_name: &str,
) -> ContextWindow {
    let boundary = round.round_start_sequence();
    let mut window = ContextWindow::new();

    let in_range = |entry: &DiscussionEntry| match slot {
        TurnSlot::HostOpening => !round.is_opening_round() && entry.sequence() < boundary,
        TurnSlot::SpecialistReply => entry.sequence() >= boundary,
    };

    for entry in snapshot.iter().filter(|e| !e.is_system()).filter(|e| in_range(e)) {
        if entry.role() == host_name {
            window.push_assistant(entry.content());
        } else {
            window.push_user(format!("{}: {}", entry.role(), entry.content()));
        }
    }

    window
}
