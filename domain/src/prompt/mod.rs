//! Prompt domain
//!
//! Templates for the system prompts and per-turn instructions used during a
//! roundtable, plus the input handed to the closing summarizer.

mod template;

pub use template::PromptTemplate;
