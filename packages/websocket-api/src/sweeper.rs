use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::info;

use crate::{errors::action_errors::ErrorCategory, models::ServerMessage, state::AppState};

/// Periodically evicts rooms older than the configured TTL.
pub fn spawn_sweeper(state: AppState) -> JoinHandle<()> {
    let period = Duration::from_secs(state.config.sweep_interval_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // the first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            sweep_once(&state, Utc::now()).await;
        }
    })
}

/// Evicts expired rooms and tells their participants. Returns how many went.
pub async fn sweep_once(state: &AppState, now: DateTime<Utc>) -> usize {
    let evicted = state.session_store.sweep(now).await;

    for room in &evicted {
        state
            .connections
            .broadcast(
                &room.human_ids(),
                &ServerMessage::error("Room expired", ErrorCategory::Conflict),
            )
            .await;
    }

    if !evicted.is_empty() {
        info!("Sweep evicted {} rooms", evicted.len());
    }
    evicted.len()
}
