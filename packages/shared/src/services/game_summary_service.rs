use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::models::{
    game_summary::{GameOverReason, GameSummary},
    room::Room,
};

#[cfg(test)]
use mockall::automock;

/// Destination for finished-game summaries (statistics, rank history).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GameSummarySink: Send + Sync {
    async fn record(&self, summary: &GameSummary);
}

/// Default sink: writes each summary to the log as JSON.
#[derive(Clone, Default)]
pub struct TracingSummarySink;

#[async_trait]
impl GameSummarySink for TracingSummarySink {
    async fn record(&self, summary: &GameSummary) {
        match serde_json::to_string(summary) {
            Ok(json) => info!(room_id = %summary.room_id, "Game summary: {}", json),
            Err(e) => error!("Failed to serialize game summary: {}", e),
        }
    }
}

#[derive(Clone)]
pub struct GameSummaryService {
    sink: Arc<dyn GameSummarySink + Send + Sync>,
}

impl GameSummaryService {
    pub fn new(sink: Arc<dyn GameSummarySink + Send + Sync>) -> Self {
        GameSummaryService { sink }
    }

    pub async fn record_game(&self, room: &Room, reason: GameOverReason) -> GameSummary {
        self.record_game_at(room, reason, Utc::now()).await
    }

    pub async fn record_game_at(
        &self,
        room: &Room,
        reason: GameOverReason,
        finished_at: DateTime<Utc>,
    ) -> GameSummary {
        let summary = GameSummary::from_room(room, reason, finished_at);
        self.sink.record(&summary).await;
        summary
    }
}
