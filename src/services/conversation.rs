// src/services/conversation.rs
use serde::{Deserialize, Serialize};

use super::gateway::CompletionGateway;
use super::persona::GREETING;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One entry of the chat log. Never changes once pushed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: MessageRole::User, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: MessageRole::Assistant, text: text.into() }
    }
}

/// What the chat widget draws: the log plus the loading indicator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConversationView {
    pub messages: Vec<Message>,
    pub pending: bool,
}

/// Append-only chat log with the pending flag that guards the in-flight request.
#[derive(Clone, Debug)]
pub struct Conversation {
    messages: Vec<Message>,
    input: String,
    pending: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Fresh conversation seeded with the assistant greeting.
    pub fn new() -> Self {
        Self::with_greeting(GREETING)
    }

    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::assistant(greeting)],
            input: String::new(),
            pending: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Record a user message and mark the conversation pending.
    ///
    /// Returns the prompt to hand to the gateway, or `None` when the text is
    /// blank or a request is already in flight. Rejected submissions leave the
    /// state untouched.
    pub fn submit(&mut self, text: &str) -> Option<String> {
        if text.trim().is_empty() || self.pending {
            return None;
        }
        self.messages.push(Message::user(text));
        self.input.clear();
        self.pending = true;
        Some(text.to_string())
    }

    /// Submit whatever is in the input buffer.
    pub fn submit_input(&mut self) -> Option<String> {
        let text = self.input.clone();
        self.submit(&text)
    }

    /// Append the assistant answer for the outstanding request and go idle.
    ///
    /// Ignored when nothing is pending so every user message gets exactly one answer.
    pub fn settle(&mut self, reply: impl Into<String>) -> bool {
        if !self.pending {
            return false;
        }
        self.messages.push(Message::assistant(reply));
        self.pending = false;
        true
    }

    /// Full exchange for a conversation with a single owner.
    pub async fn send(&mut self, text: &str, gateway: &CompletionGateway) -> bool {
        let Some(prompt) = self.submit(text) else {
            return false;
        };
        let reply = gateway.complete(&prompt).await;
        self.settle(reply)
    }

    pub fn view(&self) -> ConversationView {
        ConversationView {
            messages: self.messages.clone(),
            pending: self.pending,
        }
    }

    pub fn count(&self, role: MessageRole) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::gateway::GatewayError;
    use crate::services::gemini::CompletionService;
    use crate::services::persona::CONNECTION_ERROR;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Fixed(&'static str);

    #[async_trait]
    impl CompletionService for Fixed {
        async fn generate(&self, _system: &str, _prompt: &str) -> Result<Option<String>, GatewayError> {
            Ok(Some(self.0.to_string()))
        }
    }

    struct Broken;

    #[async_trait]
    impl CompletionService for Broken {
        async fn generate(&self, _system: &str, _prompt: &str) -> Result<Option<String>, GatewayError> {
            Err(GatewayError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn greeting_then_reply() {
        let gateway = CompletionGateway::new(Some(Arc::new(Fixed("반갑습니다"))));
        let mut conv = Conversation::with_greeting("greeting");

        assert!(conv.send("안녕하세요", &gateway).await);

        assert_eq!(
            conv.messages(),
            &[
                Message::assistant("greeting"),
                Message::user("안녕하세요"),
                Message::assistant("반갑습니다"),
            ]
        );
        assert!(!conv.is_pending());
    }

    #[tokio::test]
    async fn failing_service_settles_with_connection_error() {
        let gateway = CompletionGateway::new(Some(Arc::new(Broken)));
        let mut conv = Conversation::with_greeting("greeting");

        assert!(conv.send("x", &gateway).await);

        assert_eq!(conv.messages().len(), 3);
        assert_eq!(conv.messages()[1], Message::user("x"));
        assert_eq!(conv.messages()[2], Message::assistant(CONNECTION_ERROR));
        assert!(!conv.is_pending());
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut conv = Conversation::new();
        assert_eq!(conv.submit(""), None);
        assert_eq!(conv.submit("   "), None);
        assert_eq!(conv.messages().len(), 1);
        assert!(!conv.is_pending());
    }

    #[test]
    fn submit_while_pending_is_dropped() {
        let mut conv = Conversation::new();
        assert_eq!(conv.submit("first").as_deref(), Some("first"));
        assert_eq!(conv.submit("second"), None);
        assert_eq!(conv.messages().len(), 2);
        assert!(conv.is_pending());
    }

    #[test]
    fn submit_input_clears_buffer_and_keeps_raw_text() {
        let mut conv = Conversation::new();
        conv.set_input("  강의 문의  ");
        assert_eq!(conv.submit_input().as_deref(), Some("  강의 문의  "));
        assert_eq!(conv.input(), "");
        assert_eq!(conv.messages()[1].text, "  강의 문의  ");
    }

    #[test]
    fn rejected_submit_keeps_input_buffer() {
        let mut conv = Conversation::new();
        conv.submit("first");
        conv.set_input("second");
        assert_eq!(conv.submit_input(), None);
        assert_eq!(conv.input(), "second");
    }

    #[test]
    fn settle_without_request_is_ignored() {
        let mut conv = Conversation::new();
        assert!(!conv.settle("stray"));
        assert_eq!(conv.messages().len(), 1);
    }

    #[test]
    fn view_reflects_pending() {
        let mut conv = Conversation::new();
        conv.submit("hi");
        let view = conv.view();
        assert!(view.pending);
        assert_eq!(view.messages.last(), Some(&Message::user("hi")));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["messages"][0]["role"], "assistant");
        assert_eq!(json["messages"][1]["role"], "user");
    }
}
