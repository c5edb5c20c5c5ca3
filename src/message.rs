// src/message.rs
use serde::{Deserialize, Serialize};

use crate::services::conversation::Message;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

/// `reply` is `None` when the submission was dropped (blank text or a request
/// already in flight for this session).
#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub pending: bool,
    pub messages: Vec<Message>,
}
