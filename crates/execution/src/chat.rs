//! Conversation state for the Riverr assistant.

use riverr_data::{ChatProvider, ChatTurn, DataError};
use std::sync::Arc;
use tracing::{debug, error};

/// Prompt sent ahead of every conversation.
pub const DEFAULT_CONTEXT_PROMPT: &str = "You are an AI assistant for Riverr, a platform that helps users explore BTC liquidity on Sui blockchain. Your role is to provide information about pools, liquidity, and crypto-related topics. Maintain a knowledgeable but conversational tone. Keep answers concise and focused on crypto, DeFi, and specifically BTC liquidity topics.";

/// Assistant turn recorded when the provider fails.
pub const APOLOGY_REPLY: &str =
    "I'm sorry, I encountered an error processing your request. Please try again later.";

/// A visible conversation with the assistant.
///
/// The provider keeps no memory, so every message resends the context
/// prompt and the full history.
pub struct ChatSession {
    provider: Arc<dyn ChatProvider>,
    context_prompt: String,
    history: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            provider,
            context_prompt: DEFAULT_CONTEXT_PROMPT.to_string(),
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_context_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.context_prompt = prompt.into();
        self
    }

    /// Turns shown to the user, oldest first. Excludes the context prompt.
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Sends `input` and records both it and the reply.
    ///
    /// Blank input is ignored and returns `Ok(None)`.
    ///
    /// # Errors
    /// The provider's error. The user turn and an apology turn are still
    /// recorded.
    pub async fn send(&mut self, input: &str) -> Result<Option<&ChatTurn>, DataError> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let user = ChatTurn::user(text);
        let mut request = Vec::with_capacity(self.history.len() + 2);
        request.push(ChatTurn::user(self.context_prompt.as_str()));
        request.extend(self.history.iter().cloned());
        request.push(user.clone());
        self.history.push(user);

        debug!(turns = request.len(), "Sending chat request");
        match self.provider.complete(&request).await {
            Ok(reply) => {
                self.history.push(reply);
                Ok(self.history.last())
            }
            Err(e) => {
                error!(error = %e, "Chat request failed");
                self.history.push(ChatTurn::assistant(APOLOGY_REPLY));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use riverr_data::ChatRole;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedChat {
        fail: bool,
        requests: Mutex<Vec<Vec<ChatTurn>>>,
    }

    #[async_trait]
    impl ChatProvider for ScriptedChat {
        async fn complete(&self, turns: &[ChatTurn]) -> Result<ChatTurn, DataError> {
            self.requests.lock().unwrap().push(turns.to_vec());
            if self.fail {
                return Err(DataError::Http {
                    service: "anthropic",
                    status: 500,
                    body: "overloaded".to_string(),
                });
            }
            let n = self.requests.lock().unwrap().len();
            Ok(ChatTurn::assistant(format!("reply {n}")))
        }
    }

    #[tokio::test]
    async fn test_send_resends_context_and_history() {
        let provider = Arc::new(ScriptedChat::default());
        let mut session = ChatSession::new(provider.clone());

        let reply = session.send("What is WBTC?").await.unwrap().cloned();
        assert_eq!(reply, Some(ChatTurn::assistant("reply 1")));
        session.send("  Which pool is safest? ").await.unwrap();

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].len(), 2);
        assert_eq!(requests[0][0], ChatTurn::user(DEFAULT_CONTEXT_PROMPT));

        let second = &requests[1];
        assert_eq!(second.len(), 4);
        assert_eq!(second[1], ChatTurn::user("What is WBTC?"));
        assert_eq!(second[2], ChatTurn::assistant("reply 1"));
        assert_eq!(second[3], ChatTurn::user("Which pool is safest?"));

        assert_eq!(session.history().len(), 4);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let provider = Arc::new(ScriptedChat::default());
        let mut session = ChatSession::new(provider.clone());

        assert!(session.send("   ").await.unwrap().is_none());
        assert!(session.history().is_empty());
        assert!(provider.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_records_apology() {
        let provider = Arc::new(ScriptedChat {
            fail: true,
            ..ScriptedChat::default()
        });
        let mut session = ChatSession::new(provider);

        let err = session.send("hello").await.unwrap_err();
        assert!(matches!(err, DataError::Http { status: 500, .. }));

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, ChatRole::Assistant);
        assert_eq!(history[1].content, APOLOGY_REPLY);
    }

    #[tokio::test]
    async fn test_custom_context_prompt() {
        let provider = Arc::new(ScriptedChat::default());
        let mut session = ChatSession::new(provider.clone()).with_context_prompt("Be brief.");
        session.send("hi").await.unwrap();
        session.clear();
        assert!(session.history().is_empty());

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0][0].content, "Be brief.");
    }
}
