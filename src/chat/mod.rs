//! Scripted FAQ chatbot.

pub mod canned;
pub mod responder;
pub mod session;
pub mod transcript;

pub use canned::{QaCategory, QaEntry};
pub use responder::{Answer, ScriptedResponder};
pub use session::{ChatSession, PendingReply};
pub use transcript::{ChatMessage, Sender, Transcript, TranscriptEvent};
