// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::gateway::CompletionGateway;
use crate::services::gemini::{CompletionService, GeminiClient};
use crate::services::metrics_manager::MetricsManager;
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionManager,
    pub metrics: MetricsManager,
    pub gateway: CompletionGateway,
}

impl AppState {
    pub fn new(session_ttl: Duration, gateway: CompletionGateway) -> Self {
        Self {
            sessions: SessionManager::new(session_ttl),
            metrics: MetricsManager::new(),
            gateway,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let service = config.api_key.as_ref().map(|key| {
            Arc::new(GeminiClient::new(key.clone(), config.model.clone(), &config.base_url))
                as Arc<dyn CompletionService>
        });
        Self::new(config.session_ttl, CompletionGateway::new(service))
    }
}
