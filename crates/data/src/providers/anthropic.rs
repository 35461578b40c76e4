//! Anthropic Messages API client.

use crate::ChatProvider;
use crate::chat::{ChatRole, ChatTurn};
use crate::error::DataError;
use crate::providers::read_json;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const SERVICE: &str = "anthropic";

/// Public Anthropic API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

const API_VERSION: &str = "2023-06-01";

/// Configuration for [`AnthropicProvider`].
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl AnthropicConfig {
    /// Default model settings with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: "claude-3-5-sonnet-20240620".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: &'a [ChatTurn],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Chat completions backed by the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: reqwest::Client,
    config: AnthropicConfig,
}

impl AnthropicProvider {
    /// Creates a client.
    ///
    /// # Errors
    /// [`DataError::Config`] when the API key is empty.
    pub fn new(config: AnthropicConfig) -> Result<Self, DataError> {
        if config.api_key.trim().is_empty() {
            return Err(DataError::Config("Anthropic API key is not configured".into()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    #[instrument(skip(self, turns), fields(turns = turns.len(), model = %self.config.model))]
    async fn complete(&self, turns: &[ChatTurn]) -> Result<ChatTurn, DataError> {
        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: turns,
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;
        let reply: MessagesResponse = read_json(SERVICE, response).await?;

        let text = reply
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| DataError::malformed(SERVICE, "no text block in reply"))?;

        debug!(chars = text.len(), "Received assistant reply");
        Ok(ChatTurn {
            role: ChatRole::Assistant,
            content: text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> AnthropicProvider {
        let mut config = AnthropicConfig::new("test-key");
        config.base_url = server.uri();
        AnthropicProvider::new(config).unwrap()
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let err = AnthropicProvider::new(AnthropicConfig::new("  ")).unwrap_err();
        assert!(matches!(err, DataError::Config(_)));
    }

    #[tokio::test]
    async fn test_complete_sends_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(json!({
                "model": "claude-3-5-sonnet-20240620",
                "max_tokens": 1000,
                "messages": [
                    { "role": "user", "content": "hi" },
                    { "role": "assistant", "content": "hello" },
                    { "role": "user", "content": "best BTC pool?" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "content": [{ "type": "text", "text": "WBTC/SUI has the deepest liquidity." }],
                "model": "claude-3-5-sonnet-20240620",
                "stop_reason": "end_turn",
                "stop_sequence": null,
                "usage": { "input_tokens": 10, "output_tokens": 8 }
            })))
            .mount(&server)
            .await;

        let turns = vec![
            ChatTurn::user("hi"),
            ChatTurn::assistant("hello"),
            ChatTurn::user("best BTC pool?"),
        ];
        let reply = provider(&server).complete(&turns).await.unwrap();
        assert_eq!(reply, ChatTurn::assistant("WBTC/SUI has the deepest liquidity."));
    }

    #[tokio::test]
    async fn test_complete_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "type": "error",
                "error": { "type": "authentication_error", "message": "invalid x-api-key" }
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .complete(&[ChatTurn::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Http { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_complete_without_text_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .complete(&[ChatTurn::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Malformed { .. }));
    }
}
