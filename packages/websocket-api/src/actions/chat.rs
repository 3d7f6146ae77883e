use chrono::Utc;

use crate::{errors::action_errors::ActionError, models::ServerMessage, state::AppState};

/// Relays a chat line to everyone in the sender's room. Nothing is stored.
pub async fn handle_send_chat(state: &AppState, player_id: &str, message: &str) -> Result<(), ActionError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ActionError::Malformed("chat message is empty".to_string()));
    }

    let guard = state.session_store.lock_room_of(player_id).await?;
    let sender = guard
        .participant(player_id)
        .ok_or_else(|| ActionError::Internal(format!("{} missing from its room", player_id)))?;

    let chat = ServerMessage::ChatMessage {
        player: sender.color,
        player_name: sender.player_name.clone(),
        message: message.to_string(),
        timestamp: Utc::now(),
    };
    state.connections.broadcast(&guard.human_ids(), &chat).await;
    Ok(())
}
