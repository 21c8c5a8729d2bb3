//! Structured conversation logging.
//!
//! Provides [`JsonlConversationLogger`], a JSONL file writer implementing the
//! [`ConversationLogger`](roundtable_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
