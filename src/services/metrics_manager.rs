use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::gateway::ReplyOutcome;

#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    pub replies: HashMap<String, u64>,
    pub dropped: u64,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record_reply(&self, outcome: ReplyOutcome) {
        let mut data = self.inner.write().await;
        *data.replies.entry(outcome.as_str().to_string()).or_insert(0) += 1;
    }

    pub async fn record_dropped(&self) {
        self.inner.write().await.dropped += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
