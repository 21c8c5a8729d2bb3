//! Meeting storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory holding `<meeting_id>.json` documents
    pub meetings_dir: PathBuf,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            meetings_dir: PathBuf::from("./storage/meetings"),
        }
    }
}
