//! Meeting lookup port

use async_trait::async_trait;
use roundtable_domain::MeetingContext;
use thiserror::Error;

/// Errors raised while resolving a meeting
#[derive(Error, Debug)]
pub enum MeetingLookupError {
    #[error("Meeting not found: {0}")]
    NotFound(String),

    #[error("Meeting {id} could not be read: {reason}")]
    Unavailable { id: String, reason: String },
}

/// Resolves a meeting id into the context prompts are built from.
#[async_trait]
pub trait MeetingRepository: Send + Sync {
    async fn resolve(&self, meeting_id: &str) -> Result<MeetingContext, MeetingLookupError>;
}
