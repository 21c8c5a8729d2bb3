//! Session machinery: the shared transcript, live emission and agents.

pub mod agent;
pub mod emitter;
pub mod transcript;

pub use agent::{Agent, Utterance};
pub use emitter::{LiveEmitter, TurnEmitter};
pub use transcript::Transcript;
