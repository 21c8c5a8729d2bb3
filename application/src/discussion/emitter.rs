//! Turn emission toward a live subscriber.
//!
//! The live emitter hands entries to a bounded channel that a background
//! task drains into the [`TurnSink`]. Appending never waits on subscriber
//! I/O, only on buffer space, and only up to the configured timeout.

use crate::ports::turn_sink::TurnSink;
use roundtable_domain::DiscussionEntry;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Pushes appended entries to zero or one subscriber.
pub enum TurnEmitter {
    /// Batch mode: nothing is pushed anywhere
    None,
    Live(LiveEmitter),
}

impl TurnEmitter {
    pub async fn emit(&self, entry: &DiscussionEntry) {
        if let TurnEmitter::Live(live) = self {
            live.emit(entry).await;
        }
    }

    /// Wait until everything accepted so far has reached the subscriber.
    pub async fn close(self) {
        if let TurnEmitter::Live(live) = self {
            live.close().await;
        }
    }
}

/// Bounded-queue emitter with a background drain task.
///
/// Once the subscriber is gone (push failed, drain stopped, or the queue
/// stayed full past the timeout) the emitter disables itself for the rest of
/// the session. Each entry is attempted at most once.
pub struct LiveEmitter {
    tx: mpsc::Sender<DiscussionEntry>,
    drain: JoinHandle<()>,
    disabled: Arc<AtomicBool>,
    /// Entries the subscriber has accepted
    delivered: Arc<AtomicU64>,
    timeout: Duration,
    emit_count: AtomicU64,
}

impl LiveEmitter {
    pub fn spawn(sink: Arc<dyn TurnSink>, capacity: usize, timeout: Duration) -> Self {
        let (tx, mut rx) = mpsc::channel::<DiscussionEntry>(capacity.max(1));
        let disabled = Arc::new(AtomicBool::new(false));

        let delivered = Arc::new(AtomicU64::new(0));

        let drain_disabled = Arc::clone(&disabled);
        let drain_delivered = Arc::clone(&delivered);
        let drain = tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                if drain_disabled.load(Ordering::SeqCst) {
                    break;
                }
                if let Err(e) = sink.push(&entry).await {
                    if !drain_disabled.swap(true, Ordering::SeqCst) {
                        warn!(
                            sequence = entry.sequence(),
                            error = %e,
                            "Subscriber unavailable; live delivery disabled for this session"
                        );
                    }
                    break;
                }
                drain_delivered.fetch_add(1, Ordering::SeqCst);
            }
        });

        Self {
            tx,
            drain,
            disabled,
            delivered,
            timeout,
            emit_count: AtomicU64::new(0),
        }
    }

    pub async fn emit(&self, entry: &DiscussionEntry) {
        if self.is_disabled() {
            return;
        }

        match tokio::time::timeout(self.timeout, self.tx.send(entry.clone())).await {
            Ok(Ok(())) => {
                let _ = self.emit_count.fetch_add(1, Ordering::Relaxed);
            }
            Ok(Err(_)) => self.disable(entry, "delivery task stopped"),
            Err(_) => self.disable(entry, "subscriber too slow"),
        }
    }

    fn disable(&self, entry: &DiscussionEntry, reason: &str) {
        if !self.disabled.swap(true, Ordering::SeqCst) {
            warn!(
                sequence = entry.sequence(),
                reason, "Live delivery disabled for this session"
            );
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    /// Number of entries accepted into the delivery queue.
    pub fn emit_count(&self) -> u64 {
        self.emit_count.load(Ordering::Relaxed)
    }

    /// Number of entries the subscriber has accepted.
    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::SeqCst)
    }

    /// Close the queue and wait for the drain task to deliver what it holds.
    ///
    /// A disabled emitter abandons its queue at once. Otherwise the wait
    /// lasts as long as the subscriber keeps accepting entries within the
    /// emit timeout; a subscriber that stalls longer is abandoned and the
    /// emitter disabled.
    pub async fn close(self) {
        let LiveEmitter {
            tx,
            mut drain,
            disabled,
            delivered,
            timeout,
            ..
        } = self;
        drop(tx);

        loop {
            if disabled.load(Ordering::SeqCst) {
                drain.abort();
                return;
            }

            let before = delivered.load(Ordering::SeqCst);
            match tokio::time::timeout(timeout, &mut drain).await {
                Ok(Ok(())) => return,
                Ok(Err(e)) => {
                    debug!("Delivery task ended abnormally: {}", e);
                    return;
                }
                Err(_) if delivered.load(Ordering::SeqCst) > before => continue,
                Err(_) => {
                    if !disabled.swap(true, Ordering::SeqCst) {
                        warn!(
                            delivered = delivered.load(Ordering::SeqCst),
                            "Subscriber stalled while flushing; live delivery abandoned"
                        );
                    }
                    drain.abort();
                    return;
                }
            }
        }
    }
}
