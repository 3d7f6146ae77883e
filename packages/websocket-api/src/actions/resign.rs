use shared::models::{game_summary::GameOverReason, room::RoomStatus};

use crate::{actions::announce_game_over, errors::action_errors::ActionError, state::AppState};

pub async fn handle_resign(state: &AppState, player_id: &str) -> Result<(), ActionError> {
    let mut guard = state.session_store.lock_room_of(player_id).await?;
    if guard.status != RoomStatus::Active {
        return Err(ActionError::GameNotActive);
    }
    let color = guard
        .participant(player_id)
        .map(|participant| participant.color)
        .ok_or(ActionError::GameNotActive)?;

    let resigned = state.othello_service.resign(&guard.game_state, color)?;
    guard.update_state(resigned);

    announce_game_over(state, &guard.snapshot(), GameOverReason::Resign).await;
    Ok(())
}
