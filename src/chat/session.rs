//! Chat session: the "Passport Assistant" widget.
//!
//! A send puts the user's message in the transcript before returning and
//! schedules the bot's reply after a fixed delay. Each reply is its own
//! task; none are cancelled or retried.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::responder::{Answer, ScriptedResponder};
use super::transcript::{ChatMessage, Sender, Transcript};
use crate::config::DEFAULT_BOT_DELAY;

/// A bot reply that has been scheduled but may not have landed yet.
///
/// Dropping it does not cancel the reply.
#[derive(Debug)]
pub struct PendingReply {
    handle: JoinHandle<ChatMessage>,
}

impl PendingReply {
    /// Wait for the bot message to be appended.
    pub async fn wait(self) -> Option<ChatMessage> {
        self.handle.await.ok()
    }
}

pub struct ChatSession {
    responder: Arc<ScriptedResponder>,
    transcript: Arc<Transcript>,
    delay: Duration,
    current_question: Option<String>,
    open: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_BOT_DELAY)
    }
}

impl ChatSession {
    pub fn new(delay: Duration) -> Self {
        Self::with_responder(Arc::new(ScriptedResponder::new()), delay)
    }

    pub fn with_responder(responder: Arc<ScriptedResponder>, delay: Duration) -> Self {
        Self {
            responder,
            transcript: Transcript::new(),
            delay,
            current_question: None,
            open: false,
        }
    }

    pub fn transcript(&self) -> Arc<Transcript> {
        Arc::clone(&self.transcript)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open or close the chat widget. Returns the new state.
    pub fn toggle_open(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Send typed input. Blank input is ignored.
    pub async fn send(&mut self, text: &str) -> Option<PendingReply> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.ask(text).await)
    }

    /// Send a "People also ask" follow-up exactly as shown.
    pub async fn ask_related(&mut self, question: &str) -> PendingReply {
        self.ask(question).await
    }

    /// The Q&A panel for the latest question.
    pub fn current_answer(&self) -> Option<Answer> {
        self.current_question
            .as_deref()
            .map(|q| self.responder.answer(q))
    }

    pub fn current_question(&self) -> Option<&str> {
        self.current_question.as_deref()
    }

    async fn ask(&mut self, question: &str) -> PendingReply {
        let message = self.transcript.append(Sender::User, question).await;
        self.current_question = Some(question.to_string());
        info!(id = message.id, "Chat question received");

        let responder = Arc::clone(&self.responder);
        let transcript = Arc::clone(&self.transcript);
        let delay = self.delay;
        let question = question.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let answer = responder.answer(&question);
            debug!(category = ?answer.category, "Bot reply ready");
            transcript.append(Sender::Bot, answer.body).await
        });

        PendingReply { handle }
    }
}
