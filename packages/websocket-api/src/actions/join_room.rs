use shared::models::{board::Color, room::Room};

use crate::{errors::action_errors::ActionError, models::ServerMessage, state::AppState};

pub async fn handle_join_room(
    state: &AppState,
    player_id: &str,
    room_id: &str,
    player_name: Option<String>,
    rank: Option<i32>,
) -> Result<(), ActionError> {
    let profile = state.profile(player_id, player_name, rank);
    let room = state.session_store.join_room(room_id, profile).await?;

    announce_match_start(state, &room).await
}

/// Sends `player-joined` to the founder and `game-ready` to both players.
pub async fn announce_match_start(state: &AppState, room: &Room) -> Result<(), ActionError> {
    let (Some(black), Some(white)) = (
        room.participant_by_color(Color::Black),
        room.participant_by_color(Color::White),
    ) else {
        return Err(ActionError::Internal(format!(
            "room {} started without two players",
            room.room_id
        )));
    };

    state
        .connections
        .notify(
            &black.player_id,
            ServerMessage::PlayerJoined {
                room_id: room.room_id.clone(),
                player: white.clone(),
            },
        )
        .await;

    state
        .connections
        .broadcast(
            &room.human_ids(),
            &ServerMessage::GameReady {
                room_id: room.room_id.clone(),
                mode: room.mode,
                black: black.clone(),
                white: white.clone(),
                game_state: room.game_state.clone(),
            },
        )
        .await;

    Ok(())
}
