//! OpenAI-compatible Chat Completions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatModel, ChatRequest};
use crate::config::LlmConfig;
use crate::{Result, TripError};

const SERVICE: &str = "language model";

/// Chat completions client for any OpenAI-compatible gateway
pub struct OpenAiChatClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiChatClient {
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("TripPlanner/0.1.0")
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    fn build_body(&self, request: ChatRequest) -> CompletionBody<'_> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(ChatMessage::system(request.system_prompt));
        messages.extend(request.messages);
        CompletionBody {
            model: &self.model,
            messages,
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChatClient {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let body = self.build_body(request);
        debug!(message_count = body.messages.len(), "complete: sending request");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TripError::upstream(SERVICE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %text, "complete: API error");
            return Err(TripError::upstream(
                SERVICE,
                format!("AI API error: {}", status.as_u16()),
            ));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| TripError::upstream(SERVICE, format!("malformed completion: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        debug!(content_len = content.len(), "complete: received");

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_puts_system_first() {
        let config = LlmConfig::default();
        let client = OpenAiChatClient::new(&config, "key").unwrap();
        let body = client.build_body(ChatRequest::new("be brief", "hello"));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "google/gemini-2.5-flash");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "be brief");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_endpoint() {
        let config = LlmConfig {
            base_url: "http://localhost:1234/v1/".into(),
            ..LlmConfig::default()
        };
        let client = OpenAiChatClient::new(&config, "key").unwrap();
        assert_eq!(client.endpoint, "http://localhost:1234/v1/chat/completions");
    }
}
