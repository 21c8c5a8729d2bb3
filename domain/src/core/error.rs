//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("meeting_id is required")]
    EmptyMeetingId,

    #[error("host is required")]
    EmptyHostName,

    #[error("at least one specialist is required")]
    NoSpecialists,

    #[error("participant names cannot be blank")]
    BlankParticipantName,

    #[error("participant name '{0}' is reserved")]
    ReservedParticipantName(String),

    #[error("participant '{0}' appears more than once")]
    DuplicateParticipant(String),
}
