use shared::models::{board::Color, game_mode::Difficulty};

use crate::{
    actions::join_room::announce_match_start, errors::action_errors::ActionError,
    models::ServerMessage, state::AppState,
};

pub async fn handle_play_computer(
    state: &AppState,
    player_id: &str,
    difficulty: Difficulty,
    player_name: Option<String>,
) -> Result<(), ActionError> {
    let profile = state.profile(player_id, player_name, None);
    let room = state
        .session_store
        .create_computer_room(profile, difficulty)
        .await?;

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

    announce_match_start(state, &room).await
}
