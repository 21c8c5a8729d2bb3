//! Infrastructure layer for meeting-roundtable
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod meeting;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDiscussionConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileProviderConfig, FileStorageConfig,
};
pub use logging::JsonlConversationLogger;
pub use meeting::FileMeetingRepository;
pub use providers::{OpenAiCompatConfig, OpenAiCompatGateway};
