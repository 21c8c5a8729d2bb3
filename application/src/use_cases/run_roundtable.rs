//! Run Roundtable use case
//!
//! Drives a multi-round discussion between one host and several specialists
//! about a recorded meeting, then asks the model for a closing summary.
//!
//! Turns are strictly sequential: every turn's context depends on all the
//! turns before it. The only concurrency is the live delivery task that
//! drains appended entries toward a subscriber in streaming mode.

use crate::config::DiscussionParams;
use crate::discussion::{Agent, LiveEmitter, Transcript, TurnEmitter};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::meeting_repository::{MeetingLookupError, MeetingRepository};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::turn_sink::TurnSink;
use crate::use_cases::shared::check_cancelled;
use roundtable_domain::{
    AgentRole, ContextWindow, DiscussionEntry, DomainError, EntryDraft, MeetingContext,
    PromptTemplate, RoundState, SessionPlan, SessionRequest, SessionResult, SessionStatus,
    TurnSlot, accumulate_context, least_active,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Summary recorded when the summarizer fails or returns nothing.
pub const SUMMARY_UNAVAILABLE: &str = "(The discussion summary could not be generated)";

/// Errors that can occur while running a roundtable
#[derive(Error, Debug)]
pub enum RunRoundtableError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    #[error("Generation is not configured: {0}")]
    Configuration(#[source] GatewayError),

    #[error("Meeting not found: {0}")]
    MeetingNotFound(String),

    #[error("Meeting unavailable: {0}")]
    MeetingUnavailable(String),

    #[error("Host failed to speak in round {}: {source}", .round + 1)]
    HostGeneration {
        round: usize,
        #[source]
        source: GatewayError,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

impl RunRoundtableError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunRoundtableError::Cancelled)
    }
}

impl From<MeetingLookupError> for RunRoundtableError {
    fn from(err: MeetingLookupError) -> Self {
        match err {
            MeetingLookupError::NotFound(id) => RunRoundtableError::MeetingNotFound(id),
            unavailable @ MeetingLookupError::Unavailable { .. } => {
                RunRoundtableError::MeetingUnavailable(unavailable.to_string())
            }
        }
    }
}

/// Everything built during `Init`, owned by one session.
struct PreparedSession<G: LlmGateway + 'static> {
    plan: SessionPlan,
    meeting: MeetingContext,
    host: Agent<G>,
    specialists: Vec<Agent<G>>,
    deadline: Option<Instant>,
}

/// Use case for running a roundtable discussion
pub struct RunRoundtableUseCase<G: LlmGateway + 'static, M: MeetingRepository + 'static> {
    gateway: Arc<G>,
    meetings: Arc<M>,
    params: DiscussionParams,
    cancellation_token: Option<CancellationToken>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static, M: MeetingRepository + 'static> RunRoundtableUseCase<G, M> {
    pub fn new(gateway: Arc<G>, meetings: Arc<M>) -> Self {
        Self {
            gateway,
            meetings,
            params: DiscussionParams::default(),
            cancellation_token: None,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_params(mut self, params: DiscussionParams) -> Self {
        self.params = params;
        self
    }

    /// Set cancellation token for graceful shutdown
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Run the whole session and return its result.
    ///
    /// Cancellation yields `Ok` with status `aborted` and the partial
    /// transcript. A host failure is returned as an error.
    pub async fn execute(
        &self,
        request: SessionRequest,
    ) -> Result<SessionResult, RunRoundtableError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        request: SessionRequest,
        progress: &dyn ProgressNotifier,
    ) -> Result<SessionResult, RunRoundtableError> {
        let session = self.prepare(&request).await?;
        let transcript = Transcript::detached();
        let outcome = self.run(&session, &transcript, progress).await;
        let entries = transcript.close().await;
        self.finish(outcome, entries, progress)
    }

    /// Run the session, pushing every entry to `sink` as it is appended.
    ///
    /// Returns once the delivery task has flushed. Cancellation and host
    /// failure end the stream with an error; subscribers keep whatever was
    /// already pushed.
    pub async fn execute_streaming(
        &self,
        request: SessionRequest,
        sink: Arc<dyn TurnSink>,
    ) -> Result<(), RunRoundtableError> {
        self.execute_streaming_with_progress(request, sink, &NoProgress)
            .await
    }

    pub async fn execute_streaming_with_progress(
        &self,
        request: SessionRequest,
        sink: Arc<dyn TurnSink>,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), RunRoundtableError> {
        let session = self.prepare(&request).await?;
        let emitter = LiveEmitter::spawn(sink, self.params.emit_buffer, self.params.emit_timeout);
        let transcript = Transcript::new(TurnEmitter::Live(emitter));
        let outcome = self.run(&session, &transcript, progress).await;
        let entries = transcript.close().await;

        let result = self.finish(outcome, entries, progress)?;
        if result.is_aborted() {
            return Err(RunRoundtableError::Cancelled);
        }
        Ok(())
    }

    /// `Init`: validate, check the gateway, resolve the meeting, build agents.
    async fn prepare(
        &self,
        request: &SessionRequest,
    ) -> Result<PreparedSession<G>, RunRoundtableError> {
        let plan = request.validate()?;

        self.gateway
            .ensure_configured()
            .map_err(RunRoundtableError::Configuration)?;

        let meeting = self.meetings.resolve(plan.meeting_id()).await?;
        debug!(
            meeting_id = plan.meeting_id(),
            content_chars = meeting.content.chars().count(),
            "Resolved meeting"
        );

        let host = Agent::new(
            plan.host(),
            AgentRole::Host,
            PromptTemplate::host_system(plan.host(), &meeting, plan.specialists(), plan.topic()),
            Arc::clone(&self.gateway),
        );

        let specialists = plan
            .specialists()
            .iter()
            .map(|name| {
                let others: Vec<String> = plan
                    .specialists()
                    .iter()
                    .filter(|other| *other != name)
                    .cloned()
                    .collect();
                Agent::new(
                    name.clone(),
                    AgentRole::Specialist,
                    PromptTemplate::specialist_system(name, &meeting, plan.host(), &others),
                    Arc::clone(&self.gateway),
                )
            })
            .collect();

        // A timeout too large to represent means no deadline
        let deadline = self
            .params
            .session_timeout
            .and_then(|t| Instant::now().checked_add(t));

        Ok(PreparedSession {
            plan,
            meeting,
            host,
            specialists,
            deadline,
        })
    }

    /// `RoundLoop` and `Summarizing`. Returns the summary text.
    async fn run(
        &self,
        session: &PreparedSession<G>,
        transcript: &Transcript,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, RunRoundtableError> {
        let plan = &session.plan;
        let host = &session.host;

        info!(
            meeting_id = plan.meeting_id(),
            host = plan.host(),
            specialists = plan.specialists().len(),
            rounds = plan.rounds(),
            "Starting roundtable"
        );
        progress.on_session_start(plan.meeting_id(), plan.rounds(), plan.total_turns());
        self.conversation_logger.log(ConversationEvent::new(
            "session_started",
            json!({
                "meeting_id": plan.meeting_id(),
                "host": plan.host(),
                "specialists": plan.specialists(),
                "rounds": plan.rounds(),
                "topic": plan.topic(),
            }),
        ));

        transcript.append(EntryDraft::start()).await;
        let mut round = RoundState::new();

        for r in 0..plan.rounds() {
            self.check(session)?;
            info!("Round {}/{}", r + 1, plan.rounds());
            progress.on_round_start(r, plan.rounds());

            let snapshot = transcript.snapshot();
            let instruction = if round.is_opening_round() {
                PromptTemplate::host_opening_instruction(plan.topic(), plan.specialists())
            } else {
                let quiet = least_active(&snapshot, plan.specialists());
                PromptTemplate::host_followup_instruction(plan.specialists(), &quiet)
            };
            let window = accumulate_context(&snapshot, &round, TurnSlot::HostOpening, host.name())
                .with_instruction(instruction);
            self.take_turn(host, &window, r, transcript, progress).await?;

            for specialist in &session.specialists {
                self.check(session)?;
                transcript
                    .append(EntryDraft::handoff(specialist.name()))
                    .await;

                let snapshot = transcript.snapshot();
                let window =
                    accumulate_context(&snapshot, &round, TurnSlot::SpecialistReply, host.name())
                        .with_instruction(PromptTemplate::specialist_invitation(
                            host.name(),
                            specialist.name(),
                        ));
                self.take_turn(specialist, &window, r, transcript, progress)
                    .await?;
            }

            round.advance(transcript.len() as u64);
        }

        self.check(session)?;
        progress.on_summary_start();
        let summary = self.summarize(session, &transcript.snapshot()).await;
        transcript.append(EntryDraft::summary(&summary)).await;

        Ok(summary)
    }

    /// One agent turn: speak, append, report.
    ///
    /// Only the host propagates generation errors; specialists come back
    /// with fallback text.
    async fn take_turn(
        &self,
        agent: &Agent<G>,
        window: &ContextWindow,
        round: usize,
        transcript: &Transcript,
        progress: &dyn ProgressNotifier,
    ) -> Result<DiscussionEntry, RunRoundtableError> {
        progress.on_turn_start(agent.name(), agent.role(), round);
        debug!(
            speaker = agent.name(),
            round,
            context_messages = window.len(),
            "Turn starting"
        );

        let utterance = match agent.speak(window, progress).await {
            Ok(utterance) => utterance,
            Err(source) => {
                error!(speaker = agent.name(), round, error = %source, "Host failed, aborting session");
                self.conversation_logger.log(ConversationEvent::new(
                    "host_failed",
                    json!({
                        "speaker": agent.name(),
                        "round": round,
                        "error": source.to_string(),
                    }),
                ));
                return Err(RunRoundtableError::HostGeneration { round, source });
            }
        };

        let fallback = utterance.fallback;
        let entry = transcript.append(utterance.into_draft(agent.name())).await;

        match fallback {
            None => self.conversation_logger.log(ConversationEvent::new(
                "turn_completed",
                json!({
                    "sequence": entry.sequence(),
                    "speaker": entry.role(),
                    "role": agent.role().as_str(),
                    "round": round,
                    "content": entry.content(),
                }),
            )),
            Some(reason) => self.conversation_logger.log(ConversationEvent::new(
                "turn_fallback",
                json!({
                    "sequence": entry.sequence(),
                    "speaker": entry.role(),
                    "role": agent.role().as_str(),
                    "round": round,
                    "reason": reason.as_str(),
                }),
            )),
        }

        progress.on_turn_complete(&entry);
        Ok(entry)
    }

    /// Closing summary. Never fatal: failures fall back to fixed text.
    async fn summarize(&self, session: &PreparedSession<G>, snapshot: &[DiscussionEntry]) -> String {
        let input = PromptTemplate::summary_input(&session.meeting.metadata_summary, snapshot);

        let (summary, fallback) = match self
            .gateway
            .summarize(PromptTemplate::summary_system(), &input)
            .await
        {
            Ok(text) if !text.trim().is_empty() => (text.trim().to_string(), false),
            Ok(_) => {
                warn!("Summarizer returned nothing, using fallback summary");
                (SUMMARY_UNAVAILABLE.to_string(), true)
            }
            Err(e) => {
                warn!(error = %e, "Summary generation failed, using fallback summary");
                (SUMMARY_UNAVAILABLE.to_string(), true)
            }
        };

        self.conversation_logger.log(ConversationEvent::new(
            "summary",
            json!({ "content": summary, "fallback": fallback }),
        ));
        summary
    }

    /// `Done` / `Aborted`: turn the run outcome into the caller's result.
    fn finish(
        &self,
        outcome: Result<String, RunRoundtableError>,
        entries: Vec<DiscussionEntry>,
        progress: &dyn ProgressNotifier,
    ) -> Result<SessionResult, RunRoundtableError> {
        let entry_count = entries.len();
        let result = match outcome {
            Ok(summary) => Ok(SessionResult::completed(entries, summary)),
            Err(RunRoundtableError::Cancelled) => {
                info!(entries = entry_count, "Roundtable cancelled");
                Ok(SessionResult::aborted(entries))
            }
            Err(e) => Err(e),
        };

        let status = match &result {
            Ok(r) => r.status,
            Err(_) => SessionStatus::Aborted,
        };
        if status == SessionStatus::Completed {
            info!(entries = entry_count, "Roundtable completed");
        }
        progress.on_session_finish(status);
        self.conversation_logger.log(ConversationEvent::new(
            "session_finished",
            json!({ "status": status, "entries": entry_count }),
        ));

        result
    }

    fn check(&self, session: &PreparedSession<G>) -> Result<(), RunRoundtableError> {
        check_cancelled(&self.cancellation_token, session.deadline)
    }
}
