//! Discussion configuration from TOML (`[discussion]` section)

use roundtable_application::DiscussionParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw discussion configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    /// Rounds used when the command line does not give `--rounds`
    pub default_rounds: i64,
    /// Capacity of the live delivery queue
    pub emit_buffer: usize,
    /// Longest an append waits for live delivery, in milliseconds
    pub emit_timeout_ms: u64,
    /// Whole-session deadline in seconds
    pub session_timeout_seconds: Option<u64>,
}

impl Default for FileDiscussionConfig {
    fn default() -> Self {
        Self {
            default_rounds: 3,
            emit_buffer: 32,
            emit_timeout_ms: 5_000,
            session_timeout_seconds: None,
        }
    }
}

impl FileDiscussionConfig {
    pub fn to_params(&self) -> DiscussionParams {
        DiscussionParams::default()
            .with_emit_buffer(self.emit_buffer)
            .with_emit_timeout(Duration::from_millis(self.emit_timeout_ms))
            .with_session_timeout(self.session_timeout_seconds.map(Duration::from_secs))
    }
}
