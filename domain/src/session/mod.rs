//! LLM conversation primitives.
//!
//! - [`entities::Message`]: a single role-tagged message handed to a model
//! - [`stream::StreamEvent`]: incremental output of a streaming generation

pub mod entities;
pub mod stream;
