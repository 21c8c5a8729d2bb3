//! Meeting domain
//!
//! Recorded meetings are the subject of every roundtable. A stored
//! [`MeetingDocument`] resolves into the [`MeetingContext`] that prompts
//! are built from.

mod document;

pub use document::{MeetingContext, MeetingDocument, MeetingMetadata};
