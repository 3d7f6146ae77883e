use tracing::info;

use shared::{
    models::{board::Color, game_summary::GameOverReason, room::RoomStatus},
    services::session_store::RoomGuard,
};

use crate::{
    actions::announce_game_over, errors::action_errors::ActionError, models::ServerMessage,
    state::AppState,
};

/// Locks the caller's room and checks a game is in progress.
async fn active_room(state: &AppState, player_id: &str) -> Result<(RoomGuard, Color), ActionError> {
    let guard = state.session_store.lock_room_of(player_id).await?;
    if guard.status != RoomStatus::Active {
        return Err(ActionError::GameNotActive);
    }
    let color = guard
        .participant(player_id)
        .map(|participant| participant.color)
        .ok_or(ActionError::GameNotActive)?;
    Ok((guard, color))
}

pub async fn handle_offer_draw(state: &AppState, player_id: &str) -> Result<(), ActionError> {
    let (mut guard, color) = active_room(state, player_id).await?;

    let offered = state.othello_service.offer_draw(&guard.game_state, color)?;
    guard.update_state(offered);

    let humans = guard.human_ids();
    state
        .connections
        .broadcast(&humans, &ServerMessage::DrawOffered { player: color })
        .await;

    // the computer never agrees to a draw
    if let Some(computer) = guard.computer().map(|participant| participant.color) {
        let declined = state
            .othello_service
            .decline_draw(&guard.game_state, computer)?;
        guard.update_state(declined);
        info!("Computer declined draw in room {}", guard.room_id);
        state
            .connections
            .broadcast(&humans, &ServerMessage::DrawDeclined { player: computer })
            .await;
    }

    Ok(())
}

pub async fn handle_accept_draw(state: &AppState, player_id: &str) -> Result<(), ActionError> {
    let (mut guard, color) = active_room(state, player_id).await?;

    let drawn = state.othello_service.accept_draw(&guard.game_state, color)?;
    guard.update_state(drawn);

    announce_game_over(state, &guard.snapshot(), GameOverReason::DrawAgreed).await;
    Ok(())
}

pub async fn handle_decline_draw(state: &AppState, player_id: &str) -> Result<(), ActionError> {
    let (mut guard, color) = active_room(state, player_id).await?;

    let declined = state.othello_service.decline_draw(&guard.game_state, color)?;
    guard.update_state(declined);

    state
        .connections
        .broadcast(
            &guard.human_ids(),
            &ServerMessage::DrawDeclined { player: color },
        )
        .await;
    Ok(())
}
