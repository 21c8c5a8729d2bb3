//! Discussion parameters: use case runtime control.
//!
//! These are application-layer concerns, not domain policy: how deep the
//! live delivery queue is, how long an append may wait for it, and how long
//! a whole session may run.

use std::time::Duration;

/// Runtime parameters for a roundtable session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionParams {
    /// Capacity of the queue between the transcript and the subscriber.
    pub emit_buffer: usize,
    /// Longest an append waits for queue space before live delivery is
    /// disabled.
    pub emit_timeout: Duration,
    /// Session deadline; once passed, no further turn is scheduled.
    pub session_timeout: Option<Duration>,
}

impl Default for DiscussionParams {
    fn default() -> Self {
        Self {
            emit_buffer: 32,
            emit_timeout: Duration::from_secs(5),
            session_timeout: None,
        }
    }
}

impl DiscussionParams {
    pub fn with_emit_buffer(mut self, capacity: usize) -> Self {
        self.emit_buffer = capacity;
        self
    }

    pub fn with_emit_timeout(mut self, timeout: Duration) -> Self {
        self.emit_timeout = timeout;
        self
    }

    pub fn with_session_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.session_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_deadline() {
        let params = DiscussionParams::default();
        assert_eq!(params.emit_buffer, 32);
        assert_eq!(params.session_timeout, None);
    }

    #[test]
    fn builder_overrides() {
        let params = DiscussionParams::default()
            .with_emit_buffer(4)
            .with_emit_timeout(Duration::from_millis(250))
            .with_session_timeout(Some(Duration::from_secs(60)));
        assert_eq!(params.emit_buffer, 4);
        assert_eq!(params.emit_timeout, Duration::from_millis(250));
        assert_eq!(params.session_timeout, Some(Duration::from_secs(60)));
    }
}
