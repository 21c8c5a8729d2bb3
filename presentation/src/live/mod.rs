//! Live rendering of a streaming session

pub mod console_sink;

pub use console_sink::ConsoleTurnSink;
