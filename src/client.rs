use crate::model::{ApiEnvelope, ChatReply, ChatRequest, ChatbotConfig};
use std::time::Duration;
use thiserror::Error;

/// Production endpoint used when no override is supplied.
pub const DEFAULT_BASE_URL: &str = "https://api.chatdock.dev";

/// Failures surfaced by the remote chatbot API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response, or the body could
    /// not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status. Carries the
    /// status text, e.g. "401 Unauthorized".
    #[error("server returned {0}")]
    Transport(String),
    /// The response envelope reported a failure or carried no payload.
    #[error("{0}")]
    Application(String),
}

/// Stateless client for the chatbot configuration and messaging
/// endpoints. Retains nothing between calls except the credential and
/// base URL.
#[derive(Clone)]
pub struct ChatClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl ChatClient {
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: api_key.into(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }

    /// Fetch the chatbot configuration. Single attempt, no retries.
    pub async fn fetch_config(&self) -> Result<ChatbotConfig, ClientError> {
        let url = format!("{}/api/chatbot/config", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Transport(response.status().to_string()));
        }

        let envelope: ApiEnvelope<ChatbotConfig> = response.json().await?;
        unwrap_envelope(envelope, "Failed to fetch chatbot configuration")
    }

    /// Send one user message, threading the conversation id once the
    /// server has assigned one.
    pub async fn send_message(
        &self,
        text: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatReply, ClientError> {
        let url = format!("{}/api/chatbot/chat", self.base_url);
        let body = ChatRequest {
            message: text,
            conversation_id,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Transport(response.status().to_string()));
        }

        let envelope: ApiEnvelope<ChatReply> = response.json().await?;
        unwrap_envelope(envelope, "Failed to get chat response")
    }
}

/// Unwrap the `{success, data, error}` envelope. A failed envelope uses
/// the server-supplied error text when present, the fallback otherwise.
fn unwrap_envelope<T>(envelope: ApiEnvelope<T>, fallback: &str) -> Result<T, ClientError> {
    match (envelope.success, envelope.data) {
        (true, Some(data)) => Ok(data),
        _ => Err(ClientError::Application(
            envelope.error.unwrap_or_else(|| fallback.to_string()),
        )),
    }
}
