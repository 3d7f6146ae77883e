use std::sync::Arc;

use chrono::Duration;
use shared::{
    models::participant::PlayerProfile,
    repositories::room_repository::InMemoryRoomRepository,
    services::{
        ai_service::AiService,
        game_summary_service::{GameSummaryService, GameSummarySink},
        matchmaking_service::MatchmakingService,
        othello_service::OthelloService,
        session_store::SessionStore,
    },
};

use crate::{config::Config, connections::ConnectionRegistry};

#[derive(Clone)]
pub struct AppState {
    pub session_store: Arc<SessionStore>,
    pub matchmaking_service: Arc<MatchmakingService>,
    pub othello_service: Arc<OthelloService>,
    pub ai_service: Arc<AiService>,
    pub game_summary_service: Arc<GameSummaryService>,
    pub connections: ConnectionRegistry,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, summary_sink: Arc<dyn GameSummarySink + Send + Sync>) -> Self {
        let room_repository = Arc::new(InMemoryRoomRepository::new());
        let session_store = SessionStore::new(room_repository, Duration::seconds(config.room_ttl_secs));
        let matchmaking_service = MatchmakingService::new(session_store.clone());

        AppState {
            session_store: Arc::new(session_store),
            matchmaking_service: Arc::new(matchmaking_service),
            othello_service: Arc::new(OthelloService::new()),
            ai_service: Arc::new(AiService::new()),
            game_summary_service: Arc::new(GameSummaryService::new(summary_sink)),
            connections: ConnectionRegistry::new(),
            config: Arc::new(config),
        }
    }

    /// Profile for a request, filling in the configured default rank.
    pub fn profile(&self, player_id: &str, player_name: Option<String>, rank: Option<i32>) -> PlayerProfile {
        PlayerProfile::new(
            player_id,
            player_name,
            rank.unwrap_or(self.config.default_rank),
        )
    }
}
