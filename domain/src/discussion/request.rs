//! Session request and its validated plan

use super::entry::SYSTEM_ROLE;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rounds used when the request asks for zero or fewer.
pub const DEFAULT_ROUNDS: usize = 3;

/// A caller's request to run a roundtable about one meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub meeting_id: String,
    pub host: String,
    pub specialists: Vec<String>,
    /// Values `<= 0` fall back to [`DEFAULT_ROUNDS`]
    #[serde(default)]
    pub rounds: i64,
    #[serde(default)]
    pub topic: Option<String>,
}

impl SessionRequest {
    pub fn new(
        meeting_id: impl Into<String>,
        host: impl Into<String>,
        specialists: Vec<String>,
    ) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            host: host.into(),
            specialists,
            rounds: 0,
            topic: None,
        }
    }

    pub fn with_rounds(mut self, rounds: i64) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Check the request and normalize it into a [`SessionPlan`].
    ///
    /// Names are trimmed. The host and every specialist must be distinct.
    pub fn validate(&self) -> Result<SessionPlan, DomainError> {
        let meeting_id = self.meeting_id.trim();
        if meeting_id.is_empty() {
            return Err(DomainError::EmptyMeetingId);
        }

        let host = self.host.trim();
        if host.is_empty() {
            return Err(DomainError::EmptyHostName);
        }
        if host == SYSTEM_ROLE {
            return Err(DomainError::ReservedParticipantName(host.to_string()));
        }

        if self.specialists.is_empty() {
            return Err(DomainError::NoSpecialists);
        }

        let mut seen = HashSet::new();
        seen.insert(host.to_string());

        let mut specialists = Vec::with_capacity(self.specialists.len());
        for name in &self.specialists {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::BlankParticipantName);
            }
            if name == SYSTEM_ROLE {
                return Err(DomainError::ReservedParticipantName(name.to_string()));
            }
            if !seen.insert(name.to_string()) {
                return Err(DomainError::DuplicateParticipant(name.to_string()));
            }
            specialists.push(name.to_string());
        }

        let rounds = if self.rounds <= 0 {
            DEFAULT_ROUNDS
        } else {
            usize::try_from(self.rounds).unwrap_or(usize::MAX)
        };

        let topic = self
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(SessionPlan {
            meeting_id: meeting_id.to_string(),
            host: host.to_string(),
            specialists,
            rounds,
            topic,
        })
    }
}

/// A validated request: non-empty, unique names and a positive round count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPlan {
    meeting_id: String,
    host: String,
    specialists: Vec<String>,
    rounds: usize,
    topic: Option<String>,
}

impl SessionPlan {
    pub fn meeting_id(&self) -> &str {
        &self.meeting_id
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Specialists in the order the caller supplied them.
    pub fn specialists(&self) -> &[String] {
        &self.specialists
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Total number of speaking turns (host + specialists, every round).
    ///
    /// Saturates at `usize::MAX` for very large round counts.
    pub fn total_turns(&self) -> usize {
        self.rounds
            .saturating_mul(self.specialists.len().saturating_add(1))
    }
}
