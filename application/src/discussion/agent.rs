//! Speaking participants

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::ProgressNotifier;
use roundtable_domain::{AgentRole, ContextWindow, EntryDraft, FallbackReason};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What an agent produced for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub content: String,
    /// Set when `content` is substitute text
    pub fallback: Option<FallbackReason>,
}

impl Utterance {
    pub fn spoken(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            fallback: None,
        }
    }

    pub fn fallback(reason: FallbackReason, speaker: &str) -> Self {
        Self {
            content: reason.fallback_text(speaker),
            fallback: Some(reason),
        }
    }

    pub fn into_draft(self, speaker: &str) -> EntryDraft {
        match self.fallback {
            Some(_) => EntryDraft::fallback(speaker, self.content),
            None => EntryDraft::contribution(speaker, self.content),
        }
    }
}

/// A named participant bound to its system prompt and the model.
///
/// Immutable once built; one instance per participant per session.
pub struct Agent<G: LlmGateway + ?Sized> {
    name: String,
    role: AgentRole,
    system_prompt: String,
    gateway: Arc<G>,
}

impl<G: LlmGateway + ?Sized> Agent<G> {
    pub fn new(
        name: impl Into<String>,
        role: AgentRole,
        system_prompt: impl Into<String>,
        gateway: Arc<G>,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            system_prompt: system_prompt.into(),
            gateway,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Produce one reply for `context`.
    ///
    /// Empty output becomes fallback text for either role. A failed call
    /// becomes fallback text for specialists and an error for the host.
    pub async fn speak(
        &self,
        context: &ContextWindow,
        progress: &dyn ProgressNotifier,
    ) -> Result<Utterance, GatewayError> {
        debug!(
            speaker = %self.name,
            messages = context.len(),
            "Requesting turn"
        );

        let result = match self
            .gateway
            .generate_streaming(&self.system_prompt, context)
            .await
        {
            Ok(handle) => {
                handle
                    .collect_text_with(|chunk| progress.on_turn_chunk(&self.name, chunk))
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(text) if text.trim().is_empty() => {
                info!(speaker = %self.name, "Empty reply, recording fallback");
                Ok(Utterance::fallback(FallbackReason::EmptyOutput, &self.name))
            }
            Ok(text) => Ok(Utterance::spoken(text.trim())),
            Err(e) if self.role.failure_is_fatal() => Err(e),
            Err(e) => {
                warn!(speaker = %self.name, error = %e, "Specialist reply failed, recording fallback");
                Ok(Utterance::fallback(
                    FallbackReason::GenerationFailed,
                    &self.name,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;

    struct FixedGateway(Result<&'static str, ()>);

    #[async_trait]
    impl LlmGateway for FixedGateway {
        async fn generate(&self, _: &str, _: &ContextWindow) -> Result<String, GatewayError> {
            self.0
                .map(str::to_string)
                .map_err(|_| GatewayError::RequestFailed("down".into()))
        }

        async fn summarize(&self, _: &str, _: &str) -> Result<String, GatewayError> {
            Ok(String::new())
        }
    }

    fn agent(role: AgentRole, reply: Result<&'static str, ()>) -> Agent<FixedGateway> {
        Agent::new("Dana", role, "prompt", Arc::new(FixedGateway(reply)))
    }

    #[tokio::test]
    async fn reply_is_trimmed() {
        let utterance = agent(AgentRole::Specialist, Ok("  my view \n"))
            .speak(&ContextWindow::new(), &NoProgress)
            .await
            .unwrap();
        assert_eq!(utterance, Utterance::spoken("my view"));
    }

    #[tokio::test]
    async fn specialist_failure_becomes_fallback() {
        let utterance = agent(AgentRole::Specialist, Err(()))
            .speak(&ContextWindow::new(), &NoProgress)
            .await
            .unwrap();
        assert_eq!(utterance.fallback, Some(FallbackReason::GenerationFailed));
        assert!(utterance.content.contains("Dana"));
    }

    #[tokio::test]
    async fn host_failure_is_an_error() {
        let result = agent(AgentRole::Host, Err(()))
            .speak(&ContextWindow::new(), &NoProgress)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn empty_output_becomes_fallback_for_host_too() {
        let utterance = agent(AgentRole::Host, Ok("   "))
            .speak(&ContextWindow::new(), &NoProgress)
            .await
            .unwrap();
        assert_eq!(utterance.fallback, Some(FallbackReason::EmptyOutput));
        assert_eq!(
            utterance.into_draft("Dana").kind(),
            roundtable_domain::EntryKind::Fallback
        );
    }
}
