//! Domain layer for meeting-roundtable
//!
//! This crate contains the core discussion entities, value objects and the
//! pure policies the orchestrator relies on. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Roundtable
//!
//! A roundtable is a simulated follow-up discussion about a recorded meeting:
//!
//! - **Host**: opens every round and invites the specialists to speak
//! - **Specialists**: reply once per round, in the order the caller supplied
//! - **Transcript**: every contribution and control marker, totally ordered
//!
//! ## Context windows
//!
//! [`accumulate_context`] decides which earlier entries the next speaker sees.
//! It is a pure function of the transcript snapshot and the [`RoundState`].

pub mod config;
pub mod core;
pub mod discussion;
pub mod meeting;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use discussion::{
    activity::least_active,
    context::{ContextWindow, TurnSlot, accumulate_context},
    entry::{DiscussionEntry, EntryDraft, EntryKind, SYSTEM_ROLE},
    participant::{AgentRole, FallbackReason},
    request::{DEFAULT_ROUNDS, SessionPlan, SessionRequest},
    result::{SessionResult, SessionStatus},
    round::RoundState,
};
pub use meeting::{MeetingContext, MeetingDocument, MeetingMetadata};
pub use prompt::PromptTemplate;
pub use session::{
    entities::{Message, Role},
    stream::StreamEvent,
};
