use tracing::{debug, info};

use crate::{
    models::{participant::PlayerProfile, rank::RankBucket, room::Room},
    services::{
        errors::{
            matchmaking_service_errors::MatchmakingServiceError,
            session_store_errors::SessionStoreError,
        },
        session_store::{SessionStore, WaitingRoom},
    },
};

#[derive(Debug, Clone)]
pub enum MatchOutcome {
    /// Seated as White in an existing room; the game has started.
    Joined(Room),
    /// No suitable room; a new Waiting room was created with the caller as Black.
    Created(Room),
}

#[derive(Clone)]
pub struct MatchmakingService {
    session_store: SessionStore,
}

impl MatchmakingService {
    pub fn new(session_store: SessionStore) -> Self {
        MatchmakingService { session_store }
    }

    /// Greedy single pass over the bucket's waiting rooms, closest founder
    /// rank first. A room that fills up before we get to it is skipped.
    pub async fn find_or_create_room(
        &self,
        profile: PlayerProfile,
        bucket: RankBucket,
    ) -> Result<MatchOutcome, MatchmakingServiceError> {
        let mut candidates = self.session_store.waiting_rooms(bucket).await;
        debug!(
            "Matchmaking {} (rank {}) against {} waiting rooms in {:?}",
            profile.player_id,
            profile.rank,
            candidates.len(),
            bucket
        );

        while let Some(best) = select_best_room(&candidates, profile.rank) {
            let candidate = candidates.remove(best);
            match self
                .session_store
                .join_room(&candidate.room_id, profile.clone())
                .await
            {
                Ok(room) => {
                    info!(
                        "Matched {} into room {} (founder rank {})",
                        profile.player_id, room.room_id, candidate.founder_rank
                    );
                    return Ok(MatchOutcome::Joined(room));
                }
                Err(SessionStoreError::RoomFull(_))
                | Err(SessionStoreError::RoomNotWaiting(_))
                | Err(SessionStoreError::RoomNotFound(_)) => {
                    debug!("Room {} no longer available", candidate.room_id);
                }
                Err(e) => return Err(e.into()),
            }
        }

        let room = self
            .session_store
            .create_room(profile, Some(bucket))
            .await?;
        Ok(MatchOutcome::Created(room))
    }
}

/// Index of the room whose founder rank is closest to `rank`.
/// Ties go to the earliest room in scan order.
pub fn select_best_room(rooms: &[WaitingRoom], rank: i32) -> Option<usize> {
    rooms
        .iter()
        .enumerate()
        .min_by_key(|(_, room)| (i64::from(room.founder_rank) - i64::from(rank)).abs())
        .map(|(index, _)| index)
}
