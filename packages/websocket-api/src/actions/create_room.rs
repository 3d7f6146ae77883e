use tracing::info;

use shared::models::board::Color;

use crate::{errors::action_errors::ActionError, models::ServerMessage, state::AppState};

pub async fn handle_create_room(
    state: &AppState,
    player_id: &str,
    player_name: Option<String>,
    rank: Option<i32>,
) -> Result<(), ActionError> {
    let profile = state.profile(player_id, player_name, rank);
    let room = state.session_store.create_room(profile, None).await?;

    info!("{} opened private room {}", player_id, room.room_id);

    state
        .connections
        .notify(
            player_id,
            ServerMessage::RoomCreated {
                room_id: room.room_id.clone(),
                color: Color::Black,
                rank_bucket: None,
            },
        )
        .await;
    state
        .connections
        .notify(
            player_id,
            ServerMessage::WaitingForPlayer {
                room_id: room.room_id,
            },
        )
        .await;

    Ok(())
}
