use crate::{errors::action_errors::ActionError, models::ServerMessage, state::AppState};

/// Full snapshot for a client that lost track, e.g. after reconnecting.
pub async fn handle_sync_state(state: &AppState, player_id: &str) -> Result<(), ActionError> {
    let guard = state.session_store.lock_room_of(player_id).await?;
    state
        .connections
        .notify(player_id, ServerMessage::game_state(&guard))
        .await;
    Ok(())
}
