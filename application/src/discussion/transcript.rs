//! Shared, append-only transcript for one session

use super::emitter::TurnEmitter;
use roundtable_domain::{DiscussionEntry, EntryDraft};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Ordered log of every entry produced during a session.
///
/// The lock covers only sequence assignment and storage. Emission happens
/// after it is released, so a slow subscriber never holds up readers.
pub struct Transcript {
    entries: Mutex<Vec<DiscussionEntry>>,
    emitter: TurnEmitter,
}

impl Transcript {
    pub fn new(emitter: TurnEmitter) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            emitter,
        }
    }

    /// Transcript without a live subscriber.
    pub fn detached() -> Self {
        Self::new(TurnEmitter::None)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DiscussionEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Assign the next sequence number, store the entry, then emit it.
    pub async fn append(&self, draft: EntryDraft) -> DiscussionEntry {
        let entry = {
            let mut entries = self.lock();
            let entry = draft.into_entry(entries.len() as u64);
            entries.push(entry.clone());
            entry
        };
        self.emitter.emit(&entry).await;
        entry
    }

    /// Point-in-time copy of every entry appended so far.
    pub fn snapshot(&self) -> Vec<DiscussionEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sequence right after the most recent entry matching `predicate`,
    /// or 0 when nothing matches.
    pub fn last_boundary<P>(&self, predicate: P) -> u64
    where
        P: Fn(&DiscussionEntry) -> bool,
    {
        self.lock()
            .iter()
            .rev()
            .find(|e| predicate(e))
            .map(|e| e.sequence() + 1)
            .unwrap_or(0)
    }

    /// Flush pending deliveries and hand back the entries.
    pub async fn close(self) -> Vec<DiscussionEntry> {
        let Transcript { entries, emitter } = self;
        emitter.close().await;
        entries.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::EntryKind;

    #[tokio::test]
    async fn sequences_start_at_zero_and_increase() {
        let transcript = Transcript::detached();
        let a = transcript.append(EntryDraft::start()).await;
        let b = transcript.append(EntryDraft::contribution("Host", "hi")).await;
        let c = transcript.append(EntryDraft::handoff("A")).await;
        assert_eq!((a.sequence(), b.sequence(), c.sequence()), (0, 1, 2));
        assert_eq!(transcript.len(), 3);
    }

    #[tokio::test]
    async fn snapshot_is_a_copy() {
        let transcript = Transcript::detached();
        transcript.append(EntryDraft::start()).await;
        let snapshot = transcript.snapshot();
        transcript.append(EntryDraft::contribution("Host", "later")).await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(transcript.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn last_boundary_follows_latest_match() {
        let transcript = Transcript::detached();
        assert_eq!(transcript.last_boundary(|e| e.is_system()), 0);

        transcript.append(EntryDraft::start()).await;
        transcript.append(EntryDraft::contribution("Host", "hi")).await;
        transcript.append(EntryDraft::handoff("A")).await;
        transcript.append(EntryDraft::contribution("A", "hello")).await;

        assert_eq!(transcript.last_boundary(|e| e.is_system()), 3);
        assert_eq!(
            transcript.last_boundary(|e| e.kind() == EntryKind::Start),
            1
        );
    }

    #[tokio::test]
    async fn close_returns_entries() {
        let transcript = Transcript::detached();
        transcript.append(EntryDraft::start()).await;
        let entries = transcript.close().await;
        assert_eq!(entries.len(), 1);
    }
}
