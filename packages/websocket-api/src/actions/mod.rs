use tracing::{debug, info, warn};

use shared::models::{game_summary::GameOverReason, room::Room};

use crate::{
    errors::action_errors::ActionError,
    models::{ClientMessage, ServerMessage},
    state::AppState,
};

pub mod chat;
pub mod create_room;
pub mod disconnect;
pub mod draw;
pub mod join_random;
pub mod join_room;
pub mod make_move;
pub mod play_computer;
pub mod rematch;
pub mod resign;
pub mod room_info;
pub mod sync_state;

/// Parses one text frame and dispatches it.
pub async fn dispatch_text(state: &AppState, player_id: &str, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => dispatch(state, player_id, message).await,
        Err(e) => report(state, player_id, "unparsed", ActionError::Malformed(e.to_string())).await,
    }
}

/// Runs one client intent. Failures go back to the sender only.
pub async fn dispatch(state: &AppState, player_id: &str, message: ClientMessage) {
    let kind = message.kind();
    debug!("Dispatching {} from {}", kind, player_id);

    let result = match message {
        ClientMessage::CreateRoom { player_name, rank } => {
            create_room::handle_create_room(state, player_id, player_name, rank).await
        }
        ClientMessage::JoinRoom {
            room_id,
            player_name,
            rank,
        } => join_room::handle_join_room(state, player_id, &room_id, player_name, rank).await,
        ClientMessage::JoinRandom {
            rank_set_type,
            rank,
            player_name,
        } => {
            join_random::handle_join_random(state, player_id, rank_set_type, rank, player_name)
                .await
        }
        ClientMessage::PlayComputer {
            difficulty,
            player_name,
        } => play_computer::handle_play_computer(state, player_id, difficulty, player_name).await,
        ClientMessage::MakeMove { row, col } => {
            make_move::handle_make_move(state, player_id, row, col).await
        }
        ClientMessage::Resign => resign::handle_resign(state, player_id).await,
        ClientMessage::OfferDraw => draw::handle_offer_draw(state, player_id).await,
        ClientMessage::AcceptDraw => draw::handle_accept_draw(state, player_id).await,
        ClientMessage::DeclineDraw => draw::handle_decline_draw(state, player_id).await,
        ClientMessage::OfferRematch => rematch::handle_offer_rematch(state, player_id).await,
        ClientMessage::AcceptRematch => rematch::handle_accept_rematch(state, player_id).await,
        ClientMessage::DeclineRematch => rematch::handle_decline_rematch(state, player_id).await,
        ClientMessage::SendChat { message } => chat::handle_send_chat(state, player_id, &message).await,
        ClientMessage::GetRoomInfo { room_id } => {
            room_info::handle_get_room_info(state, player_id, &room_id).await
        }
        ClientMessage::SyncState => sync_state::handle_sync_state(state, player_id).await,
    };

    if let Err(e) = result {
        report(state, player_id, kind, e).await;
    }
}

async fn report(state: &AppState, player_id: &str, kind: &str, error: ActionError) {
    warn!(
        "{} from {} rejected ({:?}): {}",
        kind,
        player_id,
        error.category(),
        error
    );
    state
        .connections
        .notify(player_id, error.to_server_message())
        .await;
}

/// Tells every human in the room the game ended and records the summary.
pub async fn announce_game_over(state: &AppState, room: &Room, reason: GameOverReason) {
    state
        .connections
        .broadcast(
            &room.human_ids(),
            &ServerMessage::game_over(&room.game_state, reason),
        )
        .await;

    let summary = state.game_summary_service.record_game(room, reason).await;
    info!(
        "Game in room {} over ({:?}), winner {:?}",
        room.room_id,
        reason,
        summary.winner
    );
}
