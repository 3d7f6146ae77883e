use tracing::{debug, info};

use shared::{
    models::{board::Position, game_summary::GameOverReason, room::RoomStatus},
    services::{othello_service::MoveOutcome, session_store::RoomGuard},
};

use crate::{
    actions::announce_game_over, errors::action_errors::ActionError, models::ServerMessage,
    state::AppState,
};

/// Turn enforcement happens in order: the room must be Active, the sender
/// must be on turn, and the move must be legal. Nothing changes on failure.
pub async fn handle_make_move(
    state: &AppState,
    player_id: &str,
    row: u8,
    col: u8,
) -> Result<(), ActionError> {
    let mut guard = state.session_store.lock_room_of(player_id).await?;

    if guard.status != RoomStatus::Active {
        return Err(ActionError::GameNotActive);
    }
    let color = guard
        .participant(player_id)
        .map(|participant| participant.color)
        .ok_or_else(|| ActionError::Internal(format!("{} missing from its room", player_id)))?;

    let outcome = state.othello_service.validate_and_make_move(
        &guard.game_state,
        color,
        Position::new(row, col),
    )?;

    apply_move(state, &mut guard, outcome).await;

    if guard.status == RoomStatus::Active {
        play_computer_turns(state, &mut guard).await?;
    }

    Ok(())
}

/// Stores a validated move and tells the room about it.
async fn apply_move(state: &AppState, guard: &mut RoomGuard, outcome: MoveOutcome) {
    let move_made = ServerMessage::MoveMade {
        player: outcome.player,
        row: outcome.position.row,
        col: outcome.position.col,
        flipped: outcome.flipped,
        current_player: outcome.state.current_player,
        black_score: outcome.state.black_score,
        white_score: outcome.state.white_score,
        passed: outcome.passed,
    };
    guard.update_state(outcome.state);

    let humans = guard.human_ids();
    state.connections.broadcast(&humans, &move_made).await;
    state
        .connections
        .broadcast(&humans, &ServerMessage::game_state(&*guard))
        .await;

    if guard.game_state.is_game_over {
        announce_game_over(state, &guard.snapshot(), GameOverReason::Completed).await;
    }
}

/// Plays the computer's moves while it is on turn, including repeated moves
/// when the human has to pass. The room stays locked throughout.
async fn play_computer_turns(state: &AppState, guard: &mut RoomGuard) -> Result<(), ActionError> {
    let Some(difficulty) = guard.mode.difficulty() else {
        return Ok(());
    };
    let Some(computer) = guard.computer().map(|participant| participant.color) else {
        return Ok(());
    };

    while guard.status == RoomStatus::Active && guard.game_state.current_player == computer {
        let snapshot = guard.game_state.clone();
        let ai_service = state.ai_service.clone();
        let choice = tokio::task::spawn_blocking(move || ai_service.choose_move(&snapshot, difficulty))
            .await
            .map_err(|e| ActionError::Internal(format!("AI search failed: {}", e)))?;

        let Some(position) = choice else {
            debug!("Computer in room {} has no move", guard.room_id);
            break;
        };
        info!(
            "Computer plays ({}, {}) in room {}",
            position.row, position.col, guard.room_id
        );

        let outcome =
            state
                .othello_service
                .validate_and_make_move(&guard.game_state, computer, position)?;
        apply_move(state, guard, outcome).await;
    }

    Ok(())
}
