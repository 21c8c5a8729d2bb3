//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_roundtable;
pub(crate) mod shared;
