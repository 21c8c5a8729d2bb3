//! Live subscriber port
//!
//! A [`TurnSink`] receives every transcript entry as soon as it is appended.
//! Presentation adapters print or forward them; a plain
//! `mpsc::Sender<DiscussionEntry>` works as a sink out of the box.

use async_trait::async_trait;
use roundtable_domain::DiscussionEntry;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors raised when delivering an entry to a subscriber
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Subscriber is gone")]
    SubscriberGone,

    #[error("Delivery failed: {0}")]
    Failed(String),
}

/// Push-capable subscriber for transcript entries.
#[async_trait]
pub trait TurnSink: Send + Sync {
    async fn push(&self, entry: &DiscussionEntry) -> Result<(), DeliveryError>;
}

#[async_trait]
impl TurnSink for mpsc::Sender<DiscussionEntry> {
    async fn push(&self, entry: &DiscussionEntry) -> Result<(), DeliveryError> {
        self.send(entry.clone())
            .await
            .map_err(|_| DeliveryError::SubscriberGone)
    }
}
