//! OpenAI-compatible chat-completions gateway
//!
//! Works against any endpoint implementing `POST {base_url}/chat/completions`
//! with Bearer authentication, including the ARK endpoint used by default.

mod sse;
mod types;

use crate::config::FileProviderConfig;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use roundtable_application::ports::llm_gateway::{GatewayError, LlmGateway, StreamHandle};
use roundtable_domain::{ContextWindow, Message, StreamEvent};
use sse::{SseData, SseLineBuffer};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};
use types::{ChatMessage, ChatRequest, ChatResponse, ChatStreamChunk, build_messages};

/// Resolved settings for [`OpenAiCompatGateway`].
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiCompatConfig {
    pub api_key: Option<String>,
    /// Name of the env var the key was expected in, for error messages
    pub api_key_env: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub summary_temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

impl OpenAiCompatConfig {
    pub fn from_file_config(config: &FileProviderConfig) -> Self {
        Self {
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.trim().to_string(),
            temperature: config.temperature,
            summary_temperature: config.summary_temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Gateway speaking the OpenAI chat-completions protocol over `reqwest`.
pub struct OpenAiCompatGateway {
    client: Client,
    config: OpenAiCompatConfig,
}

impl OpenAiCompatGateway {
    pub fn new(config: OpenAiCompatConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn from_file_config(config: &FileProviderConfig) -> Result<Self, GatewayError> {
        Self::new(OpenAiCompatConfig::from_file_config(config))
    }

    pub fn config(&self) -> &OpenAiCompatConfig {
        &self.config
    }

    fn api_key(&self) -> Result<&str, GatewayError> {
        self.config.api_key.as_deref().ok_or_else(|| {
            GatewayError::Configuration(format!(
                "no API key (set {} or provider.api_key)",
                self.config.api_key_env
            ))
        })
    }

    async fn post(&self, request: &ChatRequest<'_>) -> Result<reqwest::Response, GatewayError> {
        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(self.api_key()?)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, error_text));
        }
        Ok(response)
    }

    #[instrument(skip_all, fields(model = %self.config.model, messages = messages.len()))]
    async fn complete(
        &self,
        messages: Vec<ChatMessage<'_>>,
        temperature: f32,
    ) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            stream: false,
            temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!("Sending chat completion request");
        let response: ChatResponse = self
            .post(&request)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("invalid response body: {}", e)))?;

        response.into_text().ok_or(GatewayError::EmptyResponse)
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

fn map_status_error(status: StatusCode, body: String) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::Configuration(format!("authentication failed ({})", status))
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("API error ({}): {}", status, body)),
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatGateway {
    fn ensure_configured(&self) -> Result<(), GatewayError> {
        self.api_key()?;
        if self.config.model.is_empty() {
            return Err(GatewayError::Configuration(
                "no model configured (set provider.model)".to_string(),
            ));
        }
        Ok(())
    }

    async fn generate(
        &self,
        system_prompt: &str,
        context: &ContextWindow,
    ) -> Result<String, GatewayError> {
        self.complete(
            build_messages(system_prompt, context),
            self.config.temperature,
        )
        .await
    }

    async fn generate_streaming(
        &self,
        system_prompt: &str,
        context: &ContextWindow,
    ) -> Result<StreamHandle, GatewayError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: build_messages(system_prompt, context),
            stream: true,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };
        let response = self.post(&request).await?;

        let (tx, rx) = mpsc::channel(64);
        tokio::spawn(async move {
            let mut bytes = response.bytes_stream();
            let mut buffer = SseLineBuffer::default();
            let mut full_text = String::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                        return;
                    }
                };

                for data in buffer.push(&chunk) {
                    match data {
                        SseData::Done => {
                            let _ = tx.send(StreamEvent::Completed(full_text)).await;
                            return;
                        }
                        SseData::Json(json) => match serde_json::from_str::<ChatStreamChunk>(&json) {
                            Ok(chunk) => {
                                if let Some(text) = chunk.delta_text() {
                                    full_text.push_str(text);
                                    if tx.send(StreamEvent::Delta(text.to_string())).await.is_err() {
                                        return;
                                    }
                                }
                            }
                            Err(e) => warn!("Skipping malformed stream chunk: {}", e),
                        },
                    }
                }
            }

            // Some servers close the stream without [DONE]
            let _ = tx.send(StreamEvent::Completed(full_text)).await;
        });

        Ok(StreamHandle::new(rx))
    }

    async fn summarize(
        &self,
        system_prompt: &str,
        full_text: &str,
    ) -> Result<String, GatewayError> {
        let system = Message::system(system_prompt);
        let user = Message::user(full_text);
        self.complete(
            vec![ChatMessage::from(&system), ChatMessage::from(&user)],
            self.config.summary_temperature,
        )
        .await
    }
}
