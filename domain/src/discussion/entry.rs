//! Transcript entries.
//!
//! An [`EntryDraft`] is what the orchestrator produces; the transcript turns
//! it into a [`DiscussionEntry`] by assigning the next sequence number. Once
//! appended, entries are never modified.

use serde::{Deserialize, Serialize};

/// Role name used for control entries (start, handoff, summary).
pub const SYSTEM_ROLE: &str = "System";

/// What an entry represents in the discussion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// "Discussion started" marker
    Start,
    /// Marker announcing the next specialist
    Handoff,
    /// Closing summary
    Summary,
    /// A speaker's generated reply
    Contribution,
    /// Substitute text used when a speaker failed or said nothing
    Fallback,
}

impl EntryKind {
    /// Control entries are streamed to subscribers but never handed to a model.
    pub fn is_system(self) -> bool {
        matches!(self, EntryKind::Start | EntryKind::Handoff | EntryKind::Summary)
    }
}

/// An entry that has not been appended yet (no sequence number).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    role: String,
    content: String,
    kind: EntryKind,
}

impl EntryDraft {
    pub fn contribution(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: speaker.into(),
            content: content.into(),
            kind: EntryKind::Contribution,
        }
    }

    pub fn fallback(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: speaker.into(),
            content: content.into(),
            kind: EntryKind::Fallback,
        }
    }

    pub fn start() -> Self {
        Self::system("[Extended discussion started]", EntryKind::Start)
    }

    pub fn handoff(next_speaker: &str) -> Self {
        Self::system(format!("[{} will speak next]", next_speaker), EntryKind::Handoff)
    }

    pub fn summary(summary: &str) -> Self {
        Self::system(format!("[Discussion summary]\n{}", summary), EntryKind::Summary)
    }

    fn system(content: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            role: SYSTEM_ROLE.to_string(),
            content: content.into(),
            kind,
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Seal the draft with its transcript position.
    pub fn into_entry(self, sequence: u64) -> DiscussionEntry {
        DiscussionEntry {
            sequence,
            is_system: self.kind.is_system(),
            role: self.role,
            content: self.content,
            kind: self.kind,
        }
    }
}

/// A single appended transcript entry (immutable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionEntry {
    sequence: u64,
    role: String,
    content: String,
    is_system: bool,
    kind: EntryKind,
}

impl DiscussionEntry {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Speaker name, or [`SYSTEM_ROLE`] for control entries.
    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_system(&self) -> bool {
        self.is_system
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_fallback(&self) -> bool {
        self.kind == EntryKind::Fallback
    }
}
