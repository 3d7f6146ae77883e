use tracing::{error, info};

use shared::models::{game_summary::GameOverReason, room::RoomStatus};

use crate::{actions::announce_game_over, models::ServerMessage, state::AppState};

/// Connection loss. The player's room is always evicted; an Active game is
/// forfeited to whoever is left.
pub async fn handle_disconnect(state: &AppState, player_id: &str) {
    state.connections.unregister(player_id).await;
    info!("Connection closed for {}", player_id);

    let departure = match state.session_store.remove_participant(player_id).await {
        Ok(Some(departure)) => departure,
        Ok(None) => return,
        Err(e) => {
            error!("Failed to remove {} from its room: {}", player_id, e);
            return;
        }
    };

    let remaining: Vec<String> = departure
        .room
        .human_ids()
        .into_iter()
        .filter(|id| id != player_id)
        .collect();

    match departure.previous_status {
        RoomStatus::Waiting => {}
        RoomStatus::Active => {
            state
                .connections
                .broadcast(
                    &remaining,
                    &ServerMessage::PlayerDisconnected {
                        player_id: player_id.to_string(),
                        player: departure.departed.color,
                    },
                )
                .await;
            announce_game_over(state, &departure.room, GameOverReason::Disconnect).await;
        }
        RoomStatus::Finished => {
            state
                .connections
                .broadcast(
                    &remaining,
                    &ServerMessage::PlayerDisconnected {
                        player_id: player_id.to_string(),
                        player: departure.departed.color,
                    },
                )
                .await;
        }
    }
}
