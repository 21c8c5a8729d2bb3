//! Presentation layer for meeting-roundtable
//!
//! This crate contains the CLI definition, output formatters,
//! the live console sink and progress reporters.

pub mod cli;
pub mod live;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use live::ConsoleTurnSink;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
