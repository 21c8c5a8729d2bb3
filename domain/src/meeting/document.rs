//! Stored meeting documents and the context resolved from them

use serde::Serialize;
use serde_json::Value;

/// Descriptive fields recorded alongside a meeting.
///
/// Every field is optional; values of an unexpected JSON type are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeetingMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub participants: Vec<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub summary: Option<String>,
}

impl MeetingMetadata {
    fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let participants = value
            .get("participants")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            title: text("title"),
            description: text("description"),
            participants,
            start_time: text("start_time"),
            end_time: text("end_time"),
            summary: text("summary"),
        }
    }

    /// Human-readable block handed to prompts as background information.
    pub fn render(&self) -> String {
        let mut out = String::from("Meeting information:\n");
        let mut line = |label: &str, value: &str| {
            out.push_str(label);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        };

        if let Some(title) = &self.title {
            line("Title", title);
        }
        if let Some(description) = &self.description {
            line("Description", description);
        }
        if !self.participants.is_empty() {
            line("Participants", &self.participants.join(", "));
        }
        if let Some(start) = &self.start_time {
            line("Start time", start);
        }
        if let Some(end) = &self.end_time {
            line("End time", end);
        }
        if let Some(summary) = &self.summary {
            line("Summary", summary);
        }
        out
    }
}

/// A meeting as stored on disk.
///
/// The body is taken from `raw_content` when it is a string, then from
/// `content`, and otherwise is the whole document pretty-printed.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingDocument {
    content: String,
    metadata: MeetingMetadata,
}

impl MeetingDocument {
    pub fn from_value(value: Value) -> Self {
        let content = ["raw_content", "content"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            });

        let metadata = value
            .get("metadata")
            .filter(|m| m.is_object())
            .map(MeetingMetadata::from_value)
            .unwrap_or_default();

        Self { content, metadata }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Value>(raw).map(Self::from_value)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn metadata(&self) -> &MeetingMetadata {
        &self.metadata
    }

    pub fn into_context(self) -> MeetingContext {
        MeetingContext {
            metadata_summary: self.metadata.render(),
            content: self.content,
        }
    }
}

/// What a roundtable knows about its meeting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeetingContext {
    /// Meeting body (transcript or notes)
    pub content: String,
    /// Rendered [`MeetingMetadata`]
    pub metadata_summary: String,
}

impl MeetingContext {
    pub fn new(content: impl Into<String>, metadata_summary: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata_summary: metadata_summary.into(),
        }
    }
}
