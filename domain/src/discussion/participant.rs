//! Participant roles and their fallback wording

use serde::{Deserialize, Serialize};

/// The two kinds of speakers in a roundtable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    /// Opens each round; exactly one per session
    Host,
    /// Replies once per round after the host
    Specialist,
}

impl AgentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Host => "host",
            AgentRole::Specialist => "specialist",
        }
    }

    /// Whether a generation failure for this role ends the session.
    pub fn failure_is_fatal(&self) -> bool {
        matches!(self, AgentRole::Host)
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a speaker's turn was recorded with substitute text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The generation call failed
    GenerationFailed,
    /// The model returned nothing but whitespace
    EmptyOutput,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::GenerationFailed => "generation_failed",
            FallbackReason::EmptyOutput => "empty_output",
        }
    }

    /// Text recorded in place of the speaker's reply.
    pub fn fallback_text(&self, speaker: &str) -> String {
        match self {
            FallbackReason::GenerationFailed => format!(
                "(No reply received from {} due to a technical issue)",
                speaker
            ),
            FallbackReason::EmptyOutput => {
                format!("({} has nothing further to add at this time)", speaker)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_host_failure_is_fatal() {
        assert!(AgentRole::Host.failure_is_fatal());
        assert!(!AgentRole::Specialist.failure_is_fatal());
    }

    #[test]
    fn fallback_text_names_speaker() {
        assert_eq!(
            FallbackReason::EmptyOutput.fallback_text("Dana"),
            "(Dana has nothing further to add at this time)"
        );
        assert!(
            FallbackReason::GenerationFailed
                .fallback_text("Dana")
                .contains("Dana")
        );
    }
}
