use tracing::info;

use shared::{
    models::{board::Color, rank::RankBucket},
    services::matchmaking_service::MatchOutcome,
};

use crate::{
    actions::join_room::announce_match_start, errors::action_errors::ActionError,
    models::ServerMessage, state::AppState,
};

/// Matchmaking. Without an explicit bucket the caller's rank decides it.
pub async fn handle_join_random(
    state: &AppState,
    player_id: &str,
    rank_set_type: Option<RankBucket>,
    rank: Option<i32>,
    player_name: Option<String>,
) -> Result<(), ActionError> {
    let profile = state.profile(player_id, player_name, rank);
    let bucket = rank_set_type.unwrap_or_else(|| state.config.rank_thresholds.bucket_for(profile.rank));

    match state
        .matchmaking_service
        .find_or_create_room(profile, bucket)
        .await?
    {
        MatchOutcome::Joined(room) => announce_match_start(state, &room).await,
        MatchOutcome::Created(room) => {
            info!(
                "No {:?} opponent for {}; waiting in {}",
                bucket, player_id, room.room_id
            );
            state
                .connections
                .notify(
                    player_id,
                    ServerMessage::RoomCreated {
                        room_id: room.room_id.clone(),
                        color: Color::Black,
                        rank_bucket: Some(bucket),
                    },
                )
                .await;
            state
                .connections
                .notify(
                    player_id,
                    ServerMessage::WaitingForPlayer {
                        room_id: room.room_id,
                    },
                )
                .await;
            Ok(())
        }
    }
}
