//! Application layer for meeting-roundtable
//!
//! This crate contains the roundtable use case, the session machinery it
//! drives (transcript, live emitter, agents) and the port definitions that
//! adapters implement. It depends only on the domain layer.

pub mod config;
pub mod discussion;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DiscussionParams;
pub use discussion::{Agent, LiveEmitter, Transcript, TurnEmitter, Utterance};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, StreamHandle},
    meeting_repository::{MeetingLookupError, MeetingRepository},
    progress::{NoProgress, ProgressNotifier},
    turn_sink::{DeliveryError, TurnSink},
};
pub use use_cases::run_roundtable::{
    RunRoundtableError, RunRoundtableUseCase, SUMMARY_UNAVAILABLE,
};
