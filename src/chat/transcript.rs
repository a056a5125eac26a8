//! Chat transcript: append-only message log with broadcast to listeners.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Monotonic within a transcript, starting at 1.
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub sent_at: DateTime<Utc>,
}

/// Change notification sent to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranscriptEvent {
    MessageAppended { message: ChatMessage },
}

#[derive(Default)]
struct Inner {
    messages: Vec<ChatMessage>,
    last_id: u64,
}

/// Ordered chat log for one session. Never persisted, never truncated.
pub struct Transcript {
    inner: RwLock<Inner>,
    tx: broadcast::Sender<TranscriptEvent>,
}

impl Transcript {
    pub fn new() -> Arc<Self> {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        Arc::new(Self {
            inner: RwLock::new(Inner::default()),
            tx,
        })
    }

    /// Subscribe to appended messages.
    pub fn subscribe(&self) -> broadcast::Receiver<TranscriptEvent> {
        self.tx.subscribe()
    }

    /// Append a message and notify subscribers. Ids are assigned under the
    /// write lock, so they follow append order.
    pub async fn append(&self, sender: Sender, text: impl Into<String>) -> ChatMessage {
        let message = {
            let mut inner = self.inner.write().await;
            inner.last_id += 1;
            let message = ChatMessage {
                id: inner.last_id,
                text: text.into(),
                sender,
                sent_at: Utc::now(),
            };
            inner.messages.push(message.clone());
            message
        };

        debug!(id = message.id, sender = ?message.sender, "Message appended");

        // Ok if nobody is listening.
        let _ = self.tx.send(TranscriptEvent::MessageAppended {
            message: message.clone(),
        });
        message
    }

    /// Snapshot of all messages in order.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.inner.read().await.messages.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.messages.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
