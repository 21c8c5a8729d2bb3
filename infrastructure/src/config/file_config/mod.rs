//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod discussion;
mod logging;
mod output;
mod provider;
mod storage;

pub use discussion::FileDiscussionConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use provider::FileProviderConfig;
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("provider.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("discussion.session_timeout_seconds cannot be 0")]
    InvalidSessionTimeout,

    #[error("discussion.emit_buffer cannot be 0")]
    InvalidEmitBuffer,

    #[error("discussion.emit_timeout_ms cannot be 0")]
    InvalidEmitTimeout,

    #[error("provider.model cannot be blank")]
    EmptyModelName,

    #[error("provider.{field} must be between 0.0 and 2.0, got {value}")]
    InvalidTemperature { field: &'static str, value: String },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Generation endpoint settings
    pub provider: FileProviderConfig,
    /// Round count and live delivery settings
    pub discussion: FileDiscussionConfig,
    /// Where meeting documents live
    pub storage: FileStorageConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Conversation log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    ///
    /// An unset `provider.model` is allowed here; the gateway reports it when
    /// a session actually starts. A model that is set but blank is rejected.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if let Some(0) = self.discussion.session_timeout_seconds {
            return Err(ConfigValidationError::InvalidSessionTimeout);
        }

        if self.discussion.emit_buffer == 0 {
            return Err(ConfigValidationError::InvalidEmitBuffer);
        }

        if self.discussion.emit_timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidEmitTimeout);
        }

        if !self.provider.model.is_empty() && self.provider.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        for (field, value) in [
            ("temperature", self.provider.temperature),
            ("summary_temperature", self.provider.summary_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigValidationError::InvalidTemperature {
                    field,
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::OutputFormat;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
api_key_env = "MY_ARK_KEY"
base_url = "https://example.test/v1"
model = "ep-2024-roundtable"
temperature = 0.9
max_tokens = 2048

[discussion]
default_rounds = 5
emit_buffer = 8

[storage]
meetings_dir = "/var/lib/meetings"

[output]
format = "summary"
color = false

[logging]
conversation_log_dir = "/tmp/roundtable-logs"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.api_key_env, "MY_ARK_KEY");
        assert_eq!(config.provider.model, "ep-2024-roundtable");
        assert_eq!(config.provider.max_tokens, Some(2048));
        assert_eq!(config.provider.summary_temperature, 0.4);
        assert_eq!(config.discussion.default_rounds, 5);
        assert_eq!(config.discussion.emit_buffer, 8);
        assert_eq!(
            config.storage.meetings_dir,
            PathBuf::from("/var/lib/meetings")
        );
        assert_eq!(config.output.format, Some(OutputFormat::Summary));
        assert!(!config.output.color);
        assert_eq!(
            config.logging.conversation_log_dir,
            Some(PathBuf::from("/tmp/roundtable-logs"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[provider]
model = "doubao-pro"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.model, "doubao-pro");
        // Defaults should apply
        assert_eq!(config.provider.api_key_env, "ARK_API_KEY");
        assert_eq!(config.provider.temperature, 0.7);
        assert_eq!(config.discussion.default_rounds, 3);
        assert_eq!(
            config.storage.meetings_dir,
            PathBuf::from("./storage/meetings")
        );
        assert!(config.output.color);
        assert!(config.logging.conversation_log_dir.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeouts() {
        let config: FileConfig = toml::from_str("[provider]\ntimeout_seconds = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let config: FileConfig =
            toml::from_str("[discussion]\nsession_timeout_seconds = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidSessionTimeout)
        );
    }

    #[test]
    fn test_validate_zero_buffer() {
        let config: FileConfig = toml::from_str("[discussion]\nemit_buffer = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidEmitBuffer));
    }

    #[test]
    fn test_validate_blank_model_name() {
        let config: FileConfig = toml::from_str("[provider]\nmodel = \"  \"\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }

    #[test]
    fn test_validate_temperature_range() {
        let config: FileConfig =
            toml::from_str("[provider]\nsummary_temperature = 3.5\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTemperature {
                field: "summary_temperature",
                ..
            })
        ));
    }
}
