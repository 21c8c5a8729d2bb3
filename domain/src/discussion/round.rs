//! Round boundary tracking

use serde::{Deserialize, Serialize};

/// Where the current round's contributions begin in the transcript.
///
/// The boundary is tracked explicitly by the orchestrator rather than
/// inferred from system entries, so adding new control markers never
/// changes what a speaker gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundState {
    round_index: usize,
    round_start_sequence: u64,
}

impl RoundState {
    /// Round 0, starting at the beginning of the transcript.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(round_index: usize, round_start_sequence: u64) -> Self {
        Self {
            round_index,
            round_start_sequence,
        }
    }

    pub fn round_index(&self) -> usize {
        self.round_index
    }

    pub fn round_start_sequence(&self) -> u64 {
        self.round_start_sequence
    }

    pub fn is_opening_round(&self) -> bool {
        self.round_index == 0
    }

    /// Move to the next round, whose entries start at `next_start`.
    pub fn advance(&mut self, next_start: u64) {
        self.round_index += 1;
        self.round_start_sequence = next_start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_round_zero() {
        let state = RoundState::new();
        assert_eq!(state.round_index(), 0);
        assert_eq!(state.round_start_sequence(), 0);
        assert!(state.is_opening_round());
    }

    #[test]
    fn advance_moves_boundary() {
        let mut state = RoundState::new();
        state.advance(6);
        assert_eq!(state, RoundState::at(1, 6));
        assert!(!state.is_opening_round());
    }
}
