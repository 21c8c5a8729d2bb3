//! Session result aggregate

use super::entry::DiscussionEntry;
use serde::{Deserialize, Serialize};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Every round ran and a summary was recorded
    Completed,
    /// Cancelled between turns; the transcript is partial
    Aborted,
}

/// Final aggregate of one roundtable session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    /// Every appended entry, ordered by sequence
    pub entries: Vec<DiscussionEntry>,
    /// Closing summary; empty when the session was aborted before summarizing
    pub summary: String,
    pub status: SessionStatus,
}

impl SessionResult {
    pub fn completed(entries: Vec<DiscussionEntry>, summary: impl Into<String>) -> Self {
        Self {
            entries,
            summary: summary.into(),
            status: SessionStatus::Completed,
        }
    }

    pub fn aborted(entries: Vec<DiscussionEntry>) -> Self {
        Self {
            entries,
            summary: String::new(),
            status: SessionStatus::Aborted,
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.status == SessionStatus::Aborted
    }

    /// Non-system entries: every speaker turn, fallbacks included.
    pub fn contributions(&self) -> impl Iterator<Item = &DiscussionEntry> {
        self.entries.iter().filter(|e| !e.is_system())
    }

    /// Turns that were recorded with substitute text.
    pub fn fallbacks(&self) -> impl Iterator<Item = &DiscussionEntry> {
        self.entries.iter().filter(|e| e.is_fallback())
    }
}
