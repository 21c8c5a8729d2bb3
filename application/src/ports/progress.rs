//! Progress notification port
//!
//! Defines the interface for reporting progress while a roundtable runs.

use roundtable_domain::{AgentRole, DiscussionEntry, SessionStatus};

/// Callback for progress updates during a roundtable session
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console spinners, web UI, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called once the meeting is resolved and agents are built
    fn on_session_start(&self, _meeting_id: &str, _rounds: usize, _total_turns: usize) {}

    /// Called at the top of every round (0-based)
    fn on_round_start(&self, _round: usize, _rounds: usize) {}

    /// Called before an agent is asked to speak
    fn on_turn_start(&self, _speaker: &str, _role: AgentRole, _round: usize) {}

    /// Called for each text chunk while an agent's reply streams in
    fn on_turn_chunk(&self, _speaker: &str, _chunk: &str) {}

    /// Called after the agent's entry (reply or fallback) has been appended
    fn on_turn_complete(&self, _entry: &DiscussionEntry) {}

    /// Called before the summarizer runs
    fn on_summary_start(&self) {}

    /// Called when the session stops, whether completed or aborted
    fn on_session_finish(&self, _status: SessionStatus) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {}
