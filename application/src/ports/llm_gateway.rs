//! LLM Gateway port
//!
//! Defines the interface for communicating with the language model that
//! voices every participant and writes the closing summary.

use async_trait::async_trait;
use roundtable_domain::{ContextWindow, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Model returned no choices")]
    EmptyResponse,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Fail fast when credentials or endpoint settings are missing.
    fn ensure_configured(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    /// Generate one discussion turn.
    async fn generate(
        &self,
        system_prompt: &str,
        context: &ContextWindow,
    ) -> Result<String, GatewayError>;

    /// Generate one discussion turn as a stream of events.
    ///
    /// Default implementation calls `generate()` and wraps the result in a single
    /// `Completed` event, so non-streaming adapters work without changes.
    async fn generate_streaming(
        &self,
        system_prompt: &str,
        context: &ContextWindow,
    ) -> Result<StreamHandle, GatewayError> {
        let result = self.generate(system_prompt, context).await?;
        let (tx, rx) = mpsc::channel(1);
        // Receiver may already be gone
        let _ = tx.send(StreamEvent::Completed(result)).await;
        Ok(StreamHandle::new(rx))
    }

    /// Single-shot summary of a finished discussion.
    async fn summarize(&self, system_prompt: &str, full_text: &str)
    -> Result<String, GatewayError>;
}

/// Handle for receiving streaming events from a generation call.
///
/// Wraps an `mpsc::Receiver<StreamEvent>` and provides convenience methods
/// for consuming the stream.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Consume the stream and collect all text into a single string.
    pub async fn collect_text(self) -> Result<String, GatewayError> {
        self.collect_text_with(|_| {}).await
    }

    /// Like [`collect_text`](Self::collect_text), handing every delta to
    /// `on_chunk` as it arrives.
    pub async fn collect_text_with<F>(mut self, mut on_chunk: F) -> Result<String, GatewayError>
    where
        F: FnMut(&str) + Send,
    {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => {
                    on_chunk(&chunk);
                    full_text.push_str(&chunk);
                }
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        on_chunk(&text);
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => {
                    return Err(GatewayError::RequestFailed(e));
                }
            }
        }
        // Sender dropped before Completed; keep the partial text
        Ok(full_text)
    }
}
