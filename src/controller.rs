use crate::client::ClientError;
use crate::model::{ChatReply, ChatbotConfig, Message};
use log::{debug, error};

/// Assistant reply shown when a send fails. The real error only goes to
/// the log, never to the end user.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Lifecycle of the widget within one run.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Configuration fetch is outstanding.
    Loading,
    /// Configuration loaded; the widget is usable.
    Ready,
    /// Configuration never loaded. Terminal; the widget stays invisible.
    Failed(String),
}

/// A submission accepted by the controller, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct SendRequest {
    pub text: String,
    pub conversation_id: Option<String>,
}

/// Owns all UI-visible conversation state and decides when the two
/// remote calls may be issued. At most one send is outstanding at a
/// time; a submission while one is in flight is dropped, not queued.
pub struct ChatController {
    phase: Phase,
    config: Option<ChatbotConfig>,
    messages: Vec<Message>,
    conversation_id: Option<String>,
    loading: bool,
    open: bool,
}

impl ChatController {
    /// An empty credential fails the widget up front; no network call is
    /// ever issued for it.
    pub fn new(api_key: &str) -> Self {
        let phase = if api_key.trim().is_empty() {
            Phase::Failed("API key is required".to_string())
        } else {
            Phase::Loading
        };

        Self {
            phase,
            config: None,
            messages: Vec::new(),
            conversation_id: None,
            loading: false,
            open: false,
        }
    }

    /// Apply the outcome of the configuration fetch. Success seeds the
    /// conversation with the welcome message; applying an identical
    /// result again is a no-op, so a remount never duplicates it.
    pub fn apply_config(&mut self, result: Result<ChatbotConfig, ClientError>) {
        match result {
            Ok(config) => {
                if matches!(self.phase, Phase::Ready) {
                    return;
                }
                debug!(
                    "configuration loaded for {} profile",
                    config.business_profile
                );
                self.messages
                    .push(Message::assistant(config.welcome_message.clone()));
                self.config = Some(config);
                self.phase = Phase::Ready;
            }
            Err(err) => {
                error!("failed to load chatbot configuration: {err}");
                self.phase = Phase::Failed("Failed to load chatbot configuration".to_string());
            }
        }
    }

    /// Try to submit user input. Returns the request to dispatch, or
    /// `None` when the trimmed input is empty, a send is already in
    /// flight, or the configuration never loaded. The user message is
    /// appended optimistically before the network call resolves.
    pub fn submit(&mut self, raw: &str) -> Option<SendRequest> {
        let text = raw.trim();
        if text.is_empty() || self.loading || !matches!(self.phase, Phase::Ready) {
            return None;
        }

        self.messages.push(Message::user(text));
        self.loading = true;

        Some(SendRequest {
            text: text.to_string(),
            conversation_id: self.conversation_id.clone(),
        })
    }

    /// Apply the outcome of a send. The optimistic user message is never
    /// rolled back; a failure only appends the fallback reply. Either
    /// way the loading flag is released exactly once, at the end.
    pub fn apply_send(&mut self, result: Result<ChatReply, ClientError>) {
        match result {
            Ok(reply) => {
                self.conversation_id = Some(reply.conversation_id);
                self.messages.push(Message::assistant(reply.message));
            }
            Err(err) => {
                error!("failed to send message: {err}");
                self.messages.push(Message::assistant(FALLBACK_REPLY));
            }
        }
        self.loading = false;
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn config(&self) -> Option<&ChatbotConfig> {
        self.config.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BusinessProfile, CornerPosition, Role};

    fn sample_config() -> ChatbotConfig {
        ChatbotConfig {
            chatbot_name: "Helper".to_string(),
            welcome_message: "Hi!".to_string(),
            business_profile: BusinessProfile::Saas,
            primary_language: "en".to_string(),
            primary_color: "#007bff".to_string(),
            avatar_url: None,
            position: CornerPosition::BottomRight,
        }
    }

    fn ready_controller() -> ChatController {
        let mut controller = ChatController::new("key");
        controller.apply_config(Ok(sample_config()));
        controller
    }

    fn reply(message: &str, conversation_id: &str) -> ChatReply {
        ChatReply {
            message: message.to_string(),
            conversation_id: conversation_id.to_string(),
        }
    }

    #[test]
    fn empty_credential_fails_without_any_request() {
        for key in ["", "   ", "\t\n"] {
            let mut controller = ChatController::new(key);
            assert!(matches!(controller.phase(), Phase::Failed(_)));
            assert!(controller.submit("hello").is_none());
            assert!(controller.messages().is_empty());
        }
    }

    #[test]
    fn config_success_seeds_exactly_one_welcome_message() {
        let controller = ready_controller();
        assert_eq!(controller.phase(), &Phase::Ready);
        assert_eq!(controller.messages().len(), 1);
        assert_eq!(controller.messages()[0].role, Role::Assistant);
        assert_eq!(controller.messages()[0].content, "Hi!");
    }

    #[test]
    fn repeated_config_application_does_not_reseed() {
        let mut controller = ready_controller();
        controller.apply_config(Ok(sample_config()));
        controller.apply_config(Ok(sample_config()));
        assert_eq!(controller.messages().len(), 1);
    }

    #[test]
    fn config_failure_is_terminal_for_both_error_kinds() {
        let failures = [
            ClientError::Transport("401 Unauthorized".to_string()),
            ClientError::Application("bad key".to_string()),
        ];

        for failure in failures {
            let mut controller = ChatController::new("key");
            controller.apply_config(Err(failure));
            assert!(matches!(controller.phase(), Phase::Failed(_)));
            assert!(controller.messages().is_empty());
            assert!(controller.submit("hello").is_none());
        }
    }

    #[test]
    fn blank_submission_is_a_noop() {
        let mut controller = ready_controller();
        assert!(controller.submit("").is_none());
        assert!(controller.submit("   \n\t").is_none());
        assert_eq!(controller.messages().len(), 1);
        assert!(!controller.is_loading());
    }

    #[test]
    fn submission_appends_trimmed_user_message() {
        let mut controller = ready_controller();
        let request = controller.submit("  hello there  ").unwrap();

        assert_eq!(request.text, "hello there");
        assert_eq!(request.conversation_id, None);
        assert!(controller.is_loading());

        let last = controller.messages().last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, "hello there");
    }

    #[test]
    fn submission_while_loading_is_a_noop() {
        let mut controller = ready_controller();
        controller.submit("first").unwrap();

        assert!(controller.submit("second").is_none());
        assert_eq!(controller.messages().len(), 2);
        assert!(controller.is_loading());
    }

    #[test]
    fn reply_updates_conversation_id_for_the_next_send() {
        let mut controller = ready_controller();
        controller.submit("first").unwrap();
        controller.apply_send(Ok(reply("hey", "conv-1")));

        assert!(!controller.is_loading());
        let last = controller.messages().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "hey");

        let next = controller.submit("second").unwrap();
        assert_eq!(next.conversation_id.as_deref(), Some("conv-1"));
    }

    #[test]
    fn server_assigned_id_supersedes_the_previous_one() {
        let mut controller = ready_controller();
        controller.submit("first").unwrap();
        controller.apply_send(Ok(reply("a", "conv-1")));
        controller.submit("second").unwrap();
        controller.apply_send(Ok(reply("b", "conv-2")));

        assert_eq!(controller.conversation_id(), Some("conv-2"));
    }

    #[test]
    fn failed_send_appends_fallback_and_releases_loading() {
        let failures = [
            ClientError::Transport("500 Internal Server Error".to_string()),
            ClientError::Application("model unavailable".to_string()),
        ];

        for failure in failures {
            let mut controller = ready_controller();
            controller.submit("hello").unwrap();
            let before = controller.messages().len();

            controller.apply_send(Err(failure));

            assert_eq!(controller.messages().len(), before + 1);
            let last = controller.messages().last().unwrap();
            assert_eq!(last.role, Role::Assistant);
            assert_eq!(last.content, FALLBACK_REPLY);
            assert!(!controller.is_loading());

            // the optimistic user message is never rolled back
            let user = &controller.messages()[before - 1];
            assert_eq!(user.role, Role::User);
            assert_eq!(user.content, "hello");
        }
    }

    #[test]
    fn failed_send_does_not_touch_conversation_id() {
        let mut controller = ready_controller();
        controller.submit("first").unwrap();
        controller.apply_send(Ok(reply("a", "conv-1")));
        controller.submit("second").unwrap();
        controller.apply_send(Err(ClientError::Application("oops".to_string())));

        assert_eq!(controller.conversation_id(), Some("conv-1"));
    }

    #[test]
    fn open_close_toggles_panel_state() {
        let mut controller = ready_controller();
        assert!(!controller.is_open());
        controller.open();
        assert!(controller.is_open());
        controller.close();
        assert!(!controller.is_open());
    }
}
