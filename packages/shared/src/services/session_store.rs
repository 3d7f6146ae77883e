use std::{ops::Deref, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info};

use crate::{
    models::{
        board::{Color, Winner},
        game_mode::{Difficulty, GameMode},
        game_state::GameState,
        participant::{Participant, PlayerProfile},
        rank::RankBucket,
        room::{generate_room_code, normalize_room_code, Room, RoomStatus},
    },
    repositories::{
        errors::room_repository_errors::RoomRepositoryError,
        room_repository::{RoomHandle, RoomRepository},
    },
    services::errors::session_store_errors::SessionStoreError,
};

const ROOM_CODE_ATTEMPTS: usize = 16;

/// Exclusive access to one room for the duration of a transition.
///
/// Reads go through `Deref`; the only write path is [`RoomGuard::update_state`],
/// which keeps the room status consistent with the game state.
pub struct RoomGuard {
    guard: OwnedMutexGuard<Room>,
}

impl RoomGuard {
    /// Stores `state` and derives the room status from it.
    pub fn update_state(&mut self, state: GameState) {
        let room = &mut *self.guard;
        let previous = room.status;
        room.game_state = state;

        if room.game_state.is_game_over {
            room.status = RoomStatus::Finished;
        } else if room.is_full() {
            room.status = RoomStatus::Active;
            if previous != RoomStatus::Active {
                room.started_at = Some(Utc::now());
            }
        }
    }

    pub fn snapshot(&self) -> Room {
        self.guard.clone()
    }
}

impl Deref for RoomGuard {
    type Target = Room;

    fn deref(&self) -> &Room {
        &self.guard
    }
}

/// A waiting room as seen by matchmaking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingRoom {
    pub room_id: String,
    pub founder_rank: i32,
    pub created_at: DateTime<Utc>,
}

/// What happened to a room when one of its participants left.
#[derive(Debug, Clone)]
pub struct Departure {
    /// The room as it was at eviction, including any forfeiture.
    pub room: Room,
    pub departed: Participant,
    pub previous_status: RoomStatus,
    /// Set when the departure ended a game in progress.
    pub forfeit_winner: Option<Color>,
}

/// Authoritative registry of live rooms.
///
/// Every transition on a room happens while holding that room's lock, so two
/// messages for the same room are applied one after the other. Different rooms
/// proceed independently.
#[derive(Clone)]
pub struct SessionStore {
    repository: Arc<dyn RoomRepository + Send + Sync>,
    room_ttl: Duration,
}

impl SessionStore {
    pub fn new(repository: Arc<dyn RoomRepository + Send + Sync>, room_ttl: Duration) -> Self {
        SessionStore {
            repository,
            room_ttl,
        }
    }

    pub fn room_ttl(&self) -> Duration {
        self.room_ttl
    }

    /// Creates a Waiting room with the caller seated as Black.
    pub async fn create_room(
        &self,
        profile: PlayerProfile,
        rank_bucket: Option<RankBucket>,
    ) -> Result<Room, SessionStoreError> {
        self.ensure_unseated(&profile.player_id).await?;

        let founder = Participant::seat(profile, Color::Black, 1);
        let room = self
            .register(|room_id| Room::new(room_id, founder.clone(), rank_bucket))
            .await?;

        info!(
            "Room {} created by {} (bucket {:?})",
            room.room_id, founder.player_id, rank_bucket
        );
        Ok(room)
    }

    /// Creates an Active room pairing the caller (Black) with the computer.
    pub async fn create_computer_room(
        &self,
        profile: PlayerProfile,
        difficulty: Difficulty,
    ) -> Result<Room, SessionStoreError> {
        self.ensure_unseated(&profile.player_id).await?;

        let rank = profile.rank;
        let human = Participant::seat(profile, Color::Black, 1);
        let room = self
            .register(|room_id| {
                let mut room = Room::new(room_id, human.clone(), None);
                room.mode = GameMode::Computer { difficulty };
                room.participants
                    .push(Participant::computer(room_id, Color::White, rank));
                room.status = RoomStatus::Active;
                room.started_at = Some(room.created_at);
                room
            })
            .await?;

        info!(
            "Computer room {} created by {} ({:?})",
            room.room_id, human.player_id, difficulty
        );
        Ok(room)
    }

    /// Seats the caller as White and starts the game.
    pub async fn join_room(
        &self,
        room_id: &str,
        profile: PlayerProfile,
    ) -> Result<Room, SessionStoreError> {
        let room_id = normalize_room_code(room_id);
        self.ensure_unseated(&profile.player_id).await?;

        let mut guard = self.lock_room(&room_id).await?;

        if guard.is_full() {
            return Err(SessionStoreError::RoomFull(room_id));
        }
        if guard.status != RoomStatus::Waiting {
            return Err(SessionStoreError::RoomNotWaiting(room_id));
        }

        self.repository
            .bind_participant(&profile.player_id, &room_id)
            .await?;

        let player_id = profile.player_id.clone();
        let room = &mut *guard.guard;
        room.participants
            .push(Participant::seat(profile, Color::White, 2));
        room.status = RoomStatus::Active;
        room.started_at = Some(Utc::now());

        info!("Player {} joined room {}", player_id, room_id);
        Ok(guard.snapshot())
    }

    /// Locks a room by code. Fails if the room was evicted while waiting.
    pub async fn lock_room(&self, room_id: &str) -> Result<RoomGuard, SessionStoreError> {
        let handle = self
            .repository
            .get_room(room_id)
            .await
            .ok_or_else(|| SessionStoreError::RoomNotFound(room_id.to_string()))?;

        self.lock_handle(room_id, handle).await
    }

    /// Locks the room the player is currently seated in.
    pub async fn lock_room_of(&self, player_id: &str) -> Result<RoomGuard, SessionStoreError> {
        let room_id = self
            .repository
            .room_id_for(player_id)
            .await
            .ok_or_else(|| SessionStoreError::NotInRoom(player_id.to_string()))?;

        let guard = match self.lock_room(&room_id).await {
            Ok(guard) => guard,
            Err(SessionStoreError::RoomNotFound(_)) => {
                return Err(SessionStoreError::NotInRoom(player_id.to_string()))
            }
            Err(e) => return Err(e),
        };

        if guard.participant(player_id).is_none() {
            return Err(SessionStoreError::NotInRoom(player_id.to_string()));
        }
        Ok(guard)
    }

    pub async fn room_snapshot(&self, room_id: &str) -> Result<Room, SessionStoreError> {
        let room_id = normalize_room_code(room_id);
        Ok(self.lock_room(&room_id).await?.snapshot())
    }

    pub async fn room_id_for(&self, player_id: &str) -> Option<String> {
        self.repository.room_id_for(player_id).await
    }

    /// Waiting human-vs-human rooms in `bucket`, oldest first.
    ///
    /// Rooms whose lock is currently held are skipped rather than waited on.
    pub async fn waiting_rooms(&self, bucket: RankBucket) -> Vec<WaitingRoom> {
        let mut waiting = Vec::new();

        for entry in self.repository.list_rooms().await {
            let Ok(room) = entry.handle.try_lock() else {
                continue;
            };
            if room.status != RoomStatus::Waiting
                || room.mode != GameMode::Pvp
                || room.rank_bucket != Some(bucket)
            {
                continue;
            }
            if let Some(founder) = room.founder() {
                waiting.push(WaitingRoom {
                    room_id: room.room_id.clone(),
                    founder_rank: founder.rank,
                    created_at: room.created_at,
                });
            }
        }

        waiting
    }

    /// Takes a participant out of their room and evicts the room.
    ///
    /// An Active game is first concluded in favour of the remaining
    /// participant. Returns `None` when the player was not seated anywhere.
    pub async fn remove_participant(
        &self,
        player_id: &str,
    ) -> Result<Option<Departure>, SessionStoreError> {
        let mut guard = match self.lock_room_of(player_id).await {
            Ok(guard) => guard,
            Err(SessionStoreError::NotInRoom(_)) => {
                self.repository.unbind_participant(player_id).await;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let departed = guard
            .participant(player_id)
            .cloned()
            .ok_or_else(|| SessionStoreError::NotInRoom(player_id.to_string()))?;
        let previous_status = guard.status;

        let forfeit_winner = if previous_status == RoomStatus::Active {
            let winner = departed.color.opponent();
            let mut state = guard.game_state.clone();
            state.conclude(Winner::from(winner));
            guard.update_state(state);
            Some(winner)
        } else {
            None
        };

        let room_id = guard.room_id.clone();
        self.repository.remove_room(&room_id).await;

        info!(
            "Player {} left room {} ({:?}); room evicted",
            player_id, room_id, previous_status
        );

        Ok(Some(Departure {
            room: guard.snapshot(),
            departed,
            previous_status,
            forfeit_winner,
        }))
    }

    /// Removes a room regardless of status, returning its final snapshot.
    pub async fn evict_room(&self, room_id: &str) -> Option<Room> {
        let guard = self.lock_room(room_id).await.ok()?;
        self.repository.remove_room(room_id).await;
        Some(guard.snapshot())
    }

    /// Evicts every room older than the TTL as of `now`.
    pub async fn sweep(&self, now: DateTime<Utc>) -> Vec<Room> {
        let rooms: Vec<(String, DateTime<Utc>)> = self
            .repository
            .list_rooms()
            .await
            .into_iter()
            .map(|entry| (entry.room_id, entry.created_at))
            .collect();

        let mut evicted = Vec::new();
        for room_id in expired_rooms(now, &rooms, self.room_ttl) {
            if let Some(room) = self.evict_room(&room_id).await {
                info!("Room {} expired", room_id);
                evicted.push(room);
            }
        }
        evicted
    }

    pub async fn room_count(&self) -> usize {
        self.repository.room_count().await
    }

    async fn ensure_unseated(&self, player_id: &str) -> Result<(), SessionStoreError> {
        match self.repository.room_id_for(player_id).await {
            Some(room_id) => Err(SessionStoreError::AlreadyInRoom(room_id)),
            None => Ok(()),
        }
    }

    async fn register<F>(&self, build: F) -> Result<Room, SessionStoreError>
    where
        F: Fn(&str) -> Room,
    {
        let mut last_error = None;

        for _ in 0..ROOM_CODE_ATTEMPTS {
            let room = build(&generate_room_code());
            let snapshot = room.clone();
            match self.repository.insert_room(room).await {
                Ok(_) => return Ok(snapshot),
                Err(RoomRepositoryError::AlreadyExists(room_id)) => {
                    debug!("Room code {} already taken, retrying", room_id);
                    last_error = Some(RoomRepositoryError::AlreadyExists(room_id));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(last_error
            .unwrap_or_else(|| RoomRepositoryError::AlreadyExists(String::new()))
            .into())
    }

    async fn lock_handle(&self, room_id: &str, handle: RoomHandle) -> Result<RoomGuard, SessionStoreError> {
        let guard = handle.clone().lock_owned().await;

        // the room may have been evicted while we queued for the lock
        match self.repository.get_room(room_id).await {
            Some(current) if Arc::ptr_eq(&current, &handle) => Ok(RoomGuard { guard }),
            _ => Err(SessionStoreError::RoomNotFound(room_id.to_string())),
        }
    }
}

/// Rooms whose age exceeds `ttl` at `now`, in input order.
pub fn expired_rooms(
    now: DateTime<Utc>,
    rooms: &[(String, DateTime<Utc>)],
    ttl: Duration,
) -> Vec<String> {
    rooms
        .iter()
        .filter(|(_, created_at)| now - *created_at > ttl)
        .map(|(room_id, _)| room_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::board::Position, repositories::room_repository::InMemoryRoomRepository,
    };

    fn store() -> SessionStore {
        SessionStore::new(
            Arc::new(InMemoryRoomRepository::new()),
            Duration::seconds(3600),
        )
    }

    fn profile(player_id: &str, rank: i32) -> PlayerProfile {
        PlayerProfile::new(player_id, None, rank)
    }

    #[tokio::test]
    async fn test_create_room_is_waiting_with_black_founder() {
        let store = store();

        let room = store
            .create_room(profile("p1", 1000), Some(RankBucket::Beginner))
            .await
            .unwrap();

        assert_eq!(room.status, RoomStatus::Waiting);
        assert_eq!(room.participants.len(), 1);
        assert_eq!(room.participants[0].color, Color::Black);
        assert_eq!(room.participants[0].player_name, "Player 1");
        assert_eq!(store.room_id_for("p1").await, Some(room.room_id.clone()));
    }

    #[tokio::test]
    async fn test_create_room_while_seated_conflicts() {
        let store = store();
        let room = store.create_room(profile("p1", 1000), None).await.unwrap();

        let result = store.create_room(profile("p1", 1000), None).await;

        assert_eq!(
            result.unwrap_err(),
            SessionStoreError::AlreadyInRoom(room.room_id)
        );
    }

    #[tokio::test]
    async fn test_join_room_activates() {
        let store = store();
        let room = store.create_room(profile("p1", 1000), None).await.unwrap();

        let joined = store
            .join_room(&room.room_id.to_lowercase(), profile("p2", 1100))
            .await
            .unwrap();

        assert_eq!(joined.status, RoomStatus::Active);
        assert_eq!(joined.participants[1].color, Color::White);
        assert_eq!(joined.participants[1].player_name, "Player 2");
        assert!(joined.started_at.is_some());
        assert_eq!(store.room_id_for("p2").await, Some(room.room_id));
    }

    #[tokio::test]
    async fn test_join_room_failures() {
        let store = store();
        let room = store.create_room(profile("p1", 1000), None).await.unwrap();
        store
            .join_room(&room.room_id, profile("p2", 1000))
            .await
            .unwrap();

        assert_eq!(
            store
                .join_room("ZZZZZZ", profile("p3", 1000))
                .await
                .unwrap_err(),
            SessionStoreError::RoomNotFound("ZZZZZZ".to_string())
        );
        assert_eq!(
            store
                .join_room(&room.room_id, profile("p3", 1000))
                .await
                .unwrap_err(),
            SessionStoreError::RoomFull(room.room_id.clone())
        );
        assert_eq!(
            store
                .join_room(&room.room_id, profile("p1", 1000))
                .await
                .unwrap_err(),
            SessionStoreError::AlreadyInRoom(room.room_id.clone())
        );
    }

    #[tokio::test]
    async fn test_computer_room_is_active_immediately() {
        let store = store();

        let room = store
            .create_computer_room(profile("p1", 1000), Difficulty::Medium)
            .await
            .unwrap();

        assert_eq!(room.status, RoomStatus::Active);
        assert_eq!(
            room.mode,
            GameMode::Computer {
                difficulty: Difficulty::Medium
            }
        );
        let computer = room.computer().unwrap();
        assert_eq!(computer.color, Color::White);
        assert!(store.room_id_for(&computer.player_id).await.is_none());
        assert!(store.waiting_rooms(RankBucket::Beginner).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_state_finishes_room() {
        let store = store();
        let room = store.create_room(profile("p1", 1000), None).await.unwrap();
        store
            .join_room(&room.room_id, profile("p2", 1000))
            .await
            .unwrap();

        let mut guard = store.lock_room_of("p1").await.unwrap();
        let mut state = guard.game_state.clone();
        state.conclude(Winner::Black);
        guard.update_state(state);
        assert_eq!(guard.status, RoomStatus::Finished);

        // a rematch resets the state and reactivates the room
        guard.update_state(GameState::new());
        assert_eq!(guard.status, RoomStatus::Active);
    }

    #[tokio::test]
    async fn test_lock_serializes_transitions() {
        let store = store();
        let room = store.create_room(profile("p1", 1000), None).await.unwrap();
        store
            .join_room(&room.room_id, profile("p2", 1000))
            .await
            .unwrap();

        let guard = store.lock_room(&room.room_id).await.unwrap();
        let contender = {
            let store = store.clone();
            let room_id = room.room_id.clone();
            tokio::spawn(async move {
                let mut guard = store.lock_room(&room_id).await.unwrap();
                let state = guard.game_state.clone();
                let moved = crate::services::othello_service::OthelloService::new()
                    .validate_and_make_move(&state, Color::Black, Position::new(2, 3));
                if let Ok(outcome) = moved {
                    guard.update_state(outcome.state);
                }
                guard.game_state.move_history.len()
            })
        };

        tokio::task::yield_now().await;
        assert!(!contender.is_finished());
        drop(guard);

        assert_eq!(contender.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_participant_from_active_room_forfeits() {
        let store = store();
        let room = store.create_room(profile("p1", 1000), None).await.unwrap();
        store
            .join_room(&room.room_id, profile("p2", 1000))
            .await
            .unwrap();

        let departure = store.remove_participant("p1").await.unwrap().unwrap();

        assert_eq!(departure.previous_status, RoomStatus::Active);
        assert_eq!(departure.forfeit_winner, Some(Color::White));
        assert_eq!(departure.room.game_state.winner, Some(Winner::White));
        assert_eq!(departure.room.status, RoomStatus::Finished);
        assert!(store.room_id_for("p2").await.is_none());
        assert_eq!(store.room_count().await, 0);
    }

    #[tokio::test]
    async fn test_remove_participant_from_waiting_room() {
        let store = store();
        store.create_room(profile("p1", 1000), None).await.unwrap();

        let departure = store.remove_participant("p1").await.unwrap().unwrap();

        assert_eq!(departure.previous_status, RoomStatus::Waiting);
        assert!(departure.forfeit_winner.is_none());
        assert_eq!(store.room_count().await, 0);
        assert!(store.remove_participant("p1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_waiting_rooms_filters_bucket_and_status() {
        let store = store();
        let beginner = store
            .create_room(profile("p1", 900), Some(RankBucket::Beginner))
            .await
            .unwrap();
        store
            .create_room(profile("p2", 1500), Some(RankBucket::Intermediate))
            .await
            .unwrap();
        store.create_room(profile("p3", 900), None).await.unwrap();

        let waiting = store.waiting_rooms(RankBucket::Beginner).await;

        assert_eq!(waiting.len(), 1);
        assert_eq!(waiting[0].room_id, beginner.room_id);
        assert_eq!(waiting[0].founder_rank, 900);
    }

    #[tokio::test]
    async fn test_sweep_evicts_expired_rooms() {
        let store = store();
        let room = store.create_room(profile("p1", 1000), None).await.unwrap();

        assert!(store.sweep(Utc::now()).await.is_empty());

        let later = Utc::now() + Duration::seconds(3601);
        let evicted = store.sweep(later).await;

        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].room_id, room.room_id);
        assert!(store.room_id_for("p1").await.is_none());
        assert!(matches!(
            store.lock_room(&room.room_id).await,
            Err(SessionStoreError::RoomNotFound(_))
        ));
    }

    #[test]
    fn test_expired_rooms_is_pure() {
        let now = Utc::now();
        let rooms = vec![
            ("OLD".to_string(), now - Duration::seconds(120)),
            ("EDGE".to_string(), now - Duration::seconds(60)),
            ("NEW".to_string(), now - Duration::seconds(5)),
        ];

        let expired = expired_rooms(now, &rooms, Duration::seconds(60));

        assert_eq!(expired, vec!["OLD".to_string()]);
    }
}
