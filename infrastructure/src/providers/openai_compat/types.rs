//! Chat-completions wire types

use roundtable_domain::{ContextWindow, Message, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub stream: bool,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> From<&'a Message> for ChatMessage<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: &message.content,
        }
    }
}

/// System prompt first, then the window in order.
pub(crate) fn build_messages<'a>(
    system_prompt: &'a str,
    context: &'a ContextWindow,
) -> Vec<ChatMessage<'a>> {
    let mut messages = Vec::with_capacity(context.len() + 1);
    messages.push(ChatMessage {
        role: Role::System.as_str(),
        content: system_prompt,
    });
    messages.extend(context.messages().iter().map(ChatMessage::from));
    messages
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    pub fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatStreamChunk {
    #[serde(default)]
    pub choices: Vec<ChatStreamChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatStreamChoice {
    #[serde(default)]
    pub delta: ChatDelta,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChatDelta {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatStreamChunk {
    pub fn delta_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_leads_the_messages() {
        let mut window = ContextWindow::new();
        window.push_assistant("opening");
        window.push_user("A: reply");

        let messages = build_messages("be brief", &window);
        let roles: Vec<&str> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec!["system", "assistant", "user"]);
        assert_eq!(messages[0].content, "be brief");
    }

    #[test]
    fn request_omits_unset_max_tokens() {
        let window = ContextWindow::new();
        let request = ChatRequest {
            model: "ep-1",
            messages: build_messages("sys", &window),
            stream: false,
            temperature: 0.7,
            max_tokens: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "ep-1");
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["messages"][0]["role"], "system");
    }

    #[test]
    fn response_text_comes_from_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Hi all"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_text(), Some("Hi all".to_string()));

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(empty.into_text(), None);
    }

    #[test]
    fn stream_chunk_delta() {
        let chunk: ChatStreamChunk =
            serde_json::from_str(r#"{"choices":[{"index":0,"delta":{"content":"Hel"}}]}"#)
                .unwrap();
        assert_eq!(chunk.delta_text(), Some("Hel"));

        let role_only: ChatStreamChunk =
            serde_json::from_str(r#"{"choices":[{"index":0,"delta":{"role":"assistant"}}]}"#)
                .unwrap();
        assert_eq!(role_only.delta_text(), None);
    }
}
