use tracing::info;

use shared::{
    models::{board::Color, room::RoomStatus},
    services::session_store::RoomGuard,
};

use crate::{errors::action_errors::ActionError, models::ServerMessage, state::AppState};

async fn finished_room(state: &AppState, player_id: &str) -> Result<(RoomGuard, Color), ActionError> {
    let guard = state.session_store.lock_room_of(player_id).await?;
    if guard.status == RoomStatus::Waiting {
        return Err(ActionError::GameNotActive);
    }
    let color = guard
        .participant(player_id)
        .map(|participant| participant.color)
        .ok_or(ActionError::GameNotActive)?;
    Ok((guard, color))
}

/// Resets the board in place: same room, same seats, same colors.
async fn start_rematch(state: &AppState, guard: &mut RoomGuard, accepted_by: Color) -> Result<(), ActionError> {
    let reset = state
        .othello_service
        .accept_rematch(&guard.game_state, accepted_by)?;
    guard.update_state(reset);

    info!("Rematch started in room {}", guard.room_id);

    let humans = guard.human_ids();
    state
        .connections
        .broadcast(
            &humans,
            &ServerMessage::RematchAccepted {
                game_state: guard.game_state.clone(),
            },
        )
        .await;
    state
        .connections
        .broadcast(&humans, &ServerMessage::game_state(&*guard))
        .await;
    Ok(())
}

pub async fn handle_offer_rematch(state: &AppState, player_id: &str) -> Result<(), ActionError> {
    let (mut guard, color) = finished_room(state, player_id).await?;

    let offered = state
        .othello_service
        .offer_rematch(&guard.game_state, color)?;
    guard.update_state(offered);

    state
        .connections
        .broadcast(
            &guard.human_ids(),
            &ServerMessage::RematchOffered { player: color },
        )
        .await;

    // the computer always takes a rematch
    if let Some(computer) = guard.computer().map(|participant| participant.color) {
        start_rematch(state, &mut guard, computer).await?;
    }

    Ok(())
}

pub async fn handle_accept_rematch(state: &AppState, player_id: &str) -> Result<(), ActionError> {
    let (mut guard, color) = finished_room(state, player_id).await?;
    start_rematch(state, &mut guard, color).await
}

pub async fn handle_decline_rematch(state: &AppState, player_id: &str) -> Result<(), ActionError> {
    let (mut guard, color) = finished_room(state, player_id).await?;

    let declined = state
        .othello_service
        .decline_rematch(&guard.game_state, color)?;
    guard.update_state(declined);

    state
        .connections
        .broadcast(
            &guard.human_ids(),
            &ServerMessage::RematchDeclined { player: color },
        )
        .await;
    Ok(())
}
