use tracing::error;

use crate::core::chat::ChatLog;
use crate::services::assistant::AssistantBridge;
use crate::types::trip::ChatContext;

/// Shown when the bridge returned a payload without a response text.
pub const FALLBACK_REPLY: &str =
    "I couldn't process your request right now. Please try again.";

/// Shown when the assistant call failed outright.
pub const CONNECTION_APOLOGY: &str = "I'm having trouble connecting right now. Please try asking something like 'What should I do today?' or 'Suggest nearby restaurants'.";

/// One user's conversation with the assistant: a chat log plus the bridge
/// that answers it. Each turn is `Idle → Sent → Resolved`; the placeholder
/// inserted at `Sent` is always replaced by exactly one terminal message,
/// whatever the external call does.
#[derive(Debug)]
pub struct ChatSession {
    log: ChatLog,
    bridge: AssistantBridge,
}

impl ChatSession {
    pub fn new(bridge: AssistantBridge) -> Self {
        Self {
            log: ChatLog::new(),
            bridge,
        }
    }

    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    /// Run one chat turn. Returns the id of the terminal assistant message,
    /// or None when the input was blank. Never returns an error: failures
    /// become the fixed apology text.
    pub async fn send(&mut self, text: &str, context: &ChatContext) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        self.log.push_user(text);
        let pending = self.log.push_placeholder();

        let terminal = match self.bridge.ask(text, context).await {
            Ok(answer) => answer
                .response
                .unwrap_or_else(|| FALLBACK_REPLY.to_string()),
            Err(err) => {
                error!(
                    target: "lagoon::session",
                    code = err.error_code(),
                    "assistant call failed: {err}"
                );
                CONNECTION_APOLOGY.to_string()
            }
        };

        self.log.resolve(&pending, terminal);
        Some(pending)
    }
}
