//! Turn sink that prints entries to the console as they arrive

use crate::output::console::ConsoleFormatter;
use async_trait::async_trait;
use roundtable_application::ports::turn_sink::{DeliveryError, TurnSink};
use roundtable_domain::DiscussionEntry;
use std::io::{self, ErrorKind, Stdout, Write};
use std::sync::Mutex;

/// Prints every streamed entry using [`ConsoleFormatter::format_entry`].
pub struct ConsoleTurnSink<W: Write + Send = Stdout> {
    out: Mutex<W>,
}

impl ConsoleTurnSink<Stdout> {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write + Send> ConsoleTurnSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<W: Write + Send> TurnSink for ConsoleTurnSink<W> {
    async fn push(&self, entry: &DiscussionEntry) -> Result<(), DeliveryError> {
        let text = ConsoleFormatter::format_entry(entry);
        let mut out = self
            .out
            .lock()
            .map_err(|_| DeliveryError::Failed("console writer poisoned".to_string()))?;

        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| match e.kind() {
                ErrorKind::BrokenPipe => DeliveryError::SubscriberGone,
                _ => DeliveryError::Failed(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::EntryDraft;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_entries_are_written_in_push_order() {
        colored::control::set_override(false);
        let sink = ConsoleTurnSink::with_writer(Vec::new());

        sink.push(&EntryDraft::start().into_entry(0)).await.unwrap();
        sink.push(&EntryDraft::contribution("Host", "Welcome all.").into_entry(1))
            .await
            .unwrap();
        sink.push(&EntryDraft::handoff("Ana").into_entry(2))
            .await
            .unwrap();

        let printed = String::from_utf8(sink.into_inner()).unwrap();
        let start = printed.find("[Extended discussion started]").unwrap();
        let host = printed.find("Welcome all.").unwrap();
        let handoff = printed.find("[Ana will speak next]").unwrap();
        assert!(start < host && host < handoff);
    }

    #[tokio::test]
    async fn test_broken_pipe_means_subscriber_gone() {
        let sink = ConsoleTurnSink::with_writer(ClosedPipe);
        let err = sink
            .push(&EntryDraft::start().into_entry(0))
            .await
            .unwrap_err();
        assert_eq!(err, DeliveryError::SubscriberGone);
    }
}
