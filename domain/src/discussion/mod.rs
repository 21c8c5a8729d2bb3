//! Roundtable discussion domain
//!
//! - [`entry`]: transcript entries and the drafts they are appended from
//! - [`round`]: where the current round begins in the transcript
//! - [`context`]: the context accumulation policy
//! - [`activity`]: who has said the least so far
//! - [`request`]: session requests and their validated plan
//! - [`result`]: the aggregate returned at the end of a session

pub mod activity;
pub mod context;
pub mod entry;
pub mod participant;
pub mod request;
pub mod result;
pub mod round;
