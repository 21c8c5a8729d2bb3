//! Generation provider adapters
//!
//! - [`openai_compat`]: any endpoint speaking the OpenAI chat-completions
//!   protocol (ARK, OpenAI, local servers)

pub mod openai_compat;

pub use openai_compat::{OpenAiCompatConfig, OpenAiCompatGateway};
