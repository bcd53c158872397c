use chrono::Utc;
use tracing::debug;

use crate::types::message::{ChatMessage, Sender};

/// Opening assistant message shown when a conversation starts.
pub const GREETING: &str = "Hi! I'm your AI travel assistant for Mauritius. I can help you optimize your itinerary, suggest alternatives, or answer questions about your trip. What would you like to know?";

/// Provisional text shown while the assistant call is in flight.
pub const THINKING: &str =
    "Let me analyze your itinerary and find the best recommendations...";

/// Append-only conversation history with two-phase turns: a pending
/// placeholder is inserted first, then replaced in place keyed by its own
/// identifier. Replacement by id (never by position) keeps interleaved turns
/// from clobbering each other.
#[derive(Debug, Clone)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatLog {
    /// New log seeded with the assistant greeting.
    pub fn new() -> Self {
        let mut log = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        let id = log.alloc_id();
        log.messages.push(ChatMessage::new(id, GREETING, Sender::Ai));
        log
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append a user message, returning its id.
    pub fn push_user(&mut self, text: impl Into<String>) -> String {
        let id = self.alloc_id();
        self.messages
            .push(ChatMessage::new(id.clone(), text, Sender::User));
        id
    }

    /// Append the pending "thinking" placeholder, returning its id.
    pub fn push_placeholder(&mut self) -> String {
        let id = self.alloc_id();
        self.messages
            .push(ChatMessage::new(id.clone(), THINKING, Sender::Ai));
        id
    }

    /// Replace the message with the given id in place. The slot keeps its id
    /// and position; text, sender, and timestamp are rewritten. Returns false
    /// when no such id exists.
    pub fn resolve(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.messages.iter_mut().find(|message| message.id == id) {
            Some(message) => {
                message.text = text.into();
                message.sender = Sender::Ai;
                message.timestamp = Utc::now();
                true
            }
            None => {
                debug!(target: "lagoon::chat", id, "no placeholder to resolve");
                false
            }
        }
    }

    fn alloc_id(&mut self) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        id
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}
