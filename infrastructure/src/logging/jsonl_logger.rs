//! JSONL file writer for roundtable conversation events.
//!
//! Every [`ConversationEvent`] becomes one JSON line carrying the event's
//! payload plus `type` and `timestamp` keys.

use chrono::{SecondsFormat, Utc};
use roundtable_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Conversation logger writing one JSON object per line.
///
/// Flushed after every record and again on `Drop`.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Create a logger writing to `path`, creating parent directories.
    ///
    /// Returns `None` (after a warning) if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        match File::create(path) {
            Ok(file) => Some(Self {
                writer: Mutex::new(BufWriter::new(file)),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!(
                    "Could not create conversation log file {}: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Create a logger for one session inside `dir`.
    ///
    /// The file is named `<meeting>-<UTC timestamp>.conversation.jsonl`.
    pub fn for_session(dir: impl AsRef<Path>, meeting_id: &str) -> Option<Self> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        let file_name = format!("{}-{}.conversation.jsonl", sanitize(meeting_id), stamp);
        Self::new(dir.as_ref().join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn sanitize(meeting_id: &str) -> String {
    let cleaned: String = meeting_id
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "session".to_string()
    } else {
        cleaned
    }
}

fn to_record(event: ConversationEvent, timestamp: String) -> Value {
    let mut map = match event.payload {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    map.insert(
        "type".to_string(),
        Value::String(event.event_type.to_string()),
    );
    map.insert("timestamp".to_string(), Value::String(timestamp));
    Value::Object(map)
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let Ok(line) = serde_json::to_string(&to_record(event, timestamp)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("m1.conversation.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "session_started",
            json!({"meeting_id": "m1", "rounds": 2}),
        ));
        logger.log(ConversationEvent::new(
            "turn_completed",
            json!({"seq": 0, "role": "Host", "content": "Welcome"}),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "session_started");
        assert_eq!(records[0]["rounds"], 2);
        assert_eq!(records[1]["type"], "turn_completed");
        assert_eq!(records[1]["role"], "Host");
        assert!(records.iter().all(|r| r["timestamp"].is_string()));
    }

    #[test]
    fn test_scalar_payload_goes_under_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scalar.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new("summary", json!("All agreed.")));
        logger.log(ConversationEvent::new("session_finished", Value::Null));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["data"], "All agreed.");
        assert_eq!(records[1]["type"], "session_finished");
        assert!(records[1].get("data").is_none());
    }

    #[test]
    fn test_for_session_names_file_after_meeting() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlConversationLogger::for_session(dir.path(), "q3/review").unwrap();

        let name = logger.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("q3_review-"));
        assert!(name.ends_with(".conversation.jsonl"));
        assert!(logger.path().starts_with(dir.path()));
    }

    #[test]
    fn test_unwritable_location_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        assert!(JsonlConversationLogger::new(blocker.join("log.jsonl")).is_none());
    }
}
