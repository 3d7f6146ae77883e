use crate::{errors::action_errors::ActionError, models::ServerMessage, state::AppState};

/// Lookup by code; the caller does not have to be in the room.
pub async fn handle_get_room_info(state: &AppState, player_id: &str, room_id: &str) -> Result<(), ActionError> {
    let room = state.session_store.room_snapshot(room_id).await?;
    state
        .connections
        .notify(player_id, ServerMessage::room_info(&room))
        .await;
    Ok(())
}
