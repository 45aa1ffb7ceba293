use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Chatbot configuration served by the remote API. Fetched once per run
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotConfig {
    pub chatbot_name: String,
    pub welcome_message: String,
    pub business_profile: BusinessProfile,
    pub primary_language: String,
    pub primary_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub position: CornerPosition,
}

/// Kind of business the chatbot is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BusinessProfile {
    Ecommerce,
    Saas,
    Professional,
    Content,
}

/// Screen corner the widget docks to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CornerPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A single entry in the conversation. Append-only; never edited or
/// removed after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Body of a POST to the chat endpoint. The conversation id is omitted
/// entirely on the first send.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<&'a str>,
}

/// Successful payload of the chat endpoint. The returned conversation id
/// supersedes any prior value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub message: String,
    pub conversation_id: String,
}

/// Response envelope shared by both endpoints.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn position_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&CornerPosition::BottomLeft).unwrap();
        assert_eq!(json, "\"bottom-left\"");

        let parsed: CornerPosition = serde_json::from_str("\"top-right\"").unwrap();
        assert_eq!(parsed, CornerPosition::TopRight);
    }

    #[test]
    fn position_parses_from_cli_strings() {
        assert_eq!(
            CornerPosition::from_str("top-left").unwrap(),
            CornerPosition::TopLeft
        );
        assert!(CornerPosition::from_str("middle").is_err());
    }

    #[test]
    fn profile_uses_lowercase_on_the_wire() {
        let parsed: BusinessProfile = serde_json::from_str("\"saas\"").unwrap();
        assert_eq!(parsed, BusinessProfile::Saas);
        assert_eq!(
            serde_json::to_string(&BusinessProfile::Ecommerce).unwrap(),
            "\"ecommerce\""
        );
    }

    #[test]
    fn config_deserializes_camel_case_payload() {
        let payload = serde_json::json!({
            "chatbotName": "Helper",
            "welcomeMessage": "Hi!",
            "businessProfile": "professional",
            "primaryLanguage": "en",
            "primaryColor": "#007bff",
            "position": "bottom-right"
        });

        let config: ChatbotConfig = serde_json::from_value(payload).unwrap();
        assert_eq!(config.chatbot_name, "Helper");
        assert_eq!(config.welcome_message, "Hi!");
        assert_eq!(config.avatar_url, None);
        assert_eq!(config.position, CornerPosition::BottomRight);
    }

    #[test]
    fn reply_deserializes_camel_case_payload() {
        let payload = serde_json::json!({
            "message": "hello there",
            "conversationId": "conv-42"
        });

        let reply: ChatReply = serde_json::from_value(payload).unwrap();
        assert_eq!(reply.message, "hello there");
        assert_eq!(reply.conversation_id, "conv-42");
    }
}
