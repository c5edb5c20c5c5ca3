// src/services/gateway.rs
use std::{fmt::Debug, sync::Arc};

use serde::Serialize;
use thiserror::Error;

use super::gemini::CompletionService;
use super::persona::{CONNECTION_ERROR, EMPTY_REPLY, SYSTEM_INSTRUCTION, UNAVAILABLE};

/// Failures of the completion service. They stop at the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not decode service response: {0}")]
    Decode(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyOutcome {
    Generated,
    Unavailable,
    Empty,
    ConnectionError,
}

impl ReplyOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ReplyOutcome::Generated => "generated",
            ReplyOutcome::Unavailable => "unavailable",
            ReplyOutcome::Empty => "empty",
            ReplyOutcome::ConnectionError => "connection_error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub outcome: ReplyOutcome,
    pub text: String,
}

/// Turns one user utterance into one displayable answer.
///
/// Without a service (no credential) every call answers [`UNAVAILABLE`]
/// without touching the network. Service failures become [`CONNECTION_ERROR`]
/// and empty answers become [`EMPTY_REPLY`].
#[derive(Clone)]
pub struct CompletionGateway {
    service: Option<Arc<dyn CompletionService>>,
    system_instruction: String,
}

impl Debug for CompletionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionGateway")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl CompletionGateway {
    pub fn new(service: Option<Arc<dyn CompletionService>>) -> Self {
        Self {
            service,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
        }
    }

    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_some()
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub async fn complete(&self, user_text: &str) -> String {
        self.answer(user_text).await.text
    }

    pub async fn answer(&self, user_text: &str) -> Reply {
        let Some(service) = &self.service else {
            return Reply { outcome: ReplyOutcome::Unavailable, text: UNAVAILABLE.to_string() };
        };

        match service.generate(&self.system_instruction, user_text).await {
            Ok(Some(text)) if !text.trim().is_empty() => {
                Reply { outcome: ReplyOutcome::Generated, text }
            }
            Ok(_) => {
                tracing::info!("completion service returned no text");
                Reply { outcome: ReplyOutcome::Empty, text: EMPTY_REPLY.to_string() }
            }
            Err(err) => {
                tracing::warn!(error = %err, "completion request failed");
                Reply { outcome: ReplyOutcome::ConnectionError, text: CONNECTION_ERROR.to_string() }
            }
        }
    }
}
