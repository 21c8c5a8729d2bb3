//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for roundtable results
///
/// This is a domain concept representing how a finished session should be
/// rendered once it has been returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full transcript followed by the summary (default)
    #[default]
    Full,
    /// Only the closing summary
    Summary,
    /// JSON output
    Json,
}
