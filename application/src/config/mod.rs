//! Application-level configuration.
//!
//! - [`DiscussionParams`]: live delivery and session deadline settings for
//!   [`RunRoundtableUseCase`](crate::use_cases::run_roundtable::RunRoundtableUseCase)

pub mod discussion_params;

pub use discussion_params::DiscussionParams;
