use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::{
    models::room::Room,
    repositories::errors::room_repository_errors::RoomRepositoryError,
};

/// Shared handle to one room. Holding its lock is the only way to mutate it.
pub type RoomHandle = Arc<Mutex<Room>>;

#[derive(Clone)]
pub struct RoomEntry {
    pub room_id: String,
    pub created_at: DateTime<Utc>,
    pub handle: RoomHandle,
    sequence: u64,
}

/// Room registry plus the participant -> room index.
///
/// Implementations never lock a room themselves, so callers may hold a room
/// lock while calling in here but not the other way round.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Registers `room` and binds every human participant to it.
    async fn insert_room(&self, room: Room) -> Result<RoomHandle, RoomRepositoryError>;
    async fn get_room(&self, room_id: &str) -> Option<RoomHandle>;
    /// Deregisters a room and drops every binding that points at it.
    async fn remove_room(&self, room_id: &str) -> Option<RoomHandle>;
    /// All rooms, oldest first.
    async fn list_rooms(&self) -> Vec<RoomEntry>;
    async fn bind_participant(&self, player_id: &str, room_id: &str) -> Result<(), RoomRepositoryError>;
    async fn unbind_participant(&self, player_id: &str) -> Option<String>;
    async fn room_id_for(&self, player_id: &str) -> Option<String>;
    async fn room_count(&self) -> usize;
}

#[derive(Default)]
struct RoomIndex {
    rooms: HashMap<String, RoomEntry>,
    participants: HashMap<String, String>,
    next_sequence: u64,
}

#[derive(Default)]
pub struct InMemoryRoomRepository {
    index: RwLock<RoomIndex>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert_room(&self, room: Room) -> Result<RoomHandle, RoomRepositoryError> {
        let mut index = self.index.write().await;

        if index.rooms.contains_key(&room.room_id) {
            return Err(RoomRepositoryError::AlreadyExists(room.room_id));
        }

        let humans = room.human_ids();
        if let Some(bound) = humans
            .iter()
            .find(|player_id| index.participants.contains_key(*player_id))
        {
            return Err(RoomRepositoryError::ParticipantAlreadyBound(bound.clone()));
        }

        let room_id = room.room_id.clone();
        let created_at = room.created_at;
        let handle = Arc::new(Mutex::new(room));
        let sequence = index.next_sequence;
        index.next_sequence += 1;

        for player_id in humans {
            index.participants.insert(player_id, room_id.clone());
        }
        index.rooms.insert(
            room_id.clone(),
            RoomEntry {
                room_id: room_id.clone(),
                created_at,
                handle: handle.clone(),
                sequence,
            },
        );

        debug!("Registered room {}", room_id);
        Ok(handle)
    }

    async fn get_room(&self, room_id: &str) -> Option<RoomHandle> {
        let index = self.index.read().await;
        index.rooms.get(room_id).map(|entry| entry.handle.clone())
    }

    async fn remove_room(&self, room_id: &str) -> Option<RoomHandle> {
        let mut index = self.index.write().await;
        let entry = index.rooms.remove(room_id)?;
        index.participants.retain(|_, bound| bound != room_id);

        debug!("Deregistered room {}", room_id);
        Some(entry.handle)
    }

    async fn list_rooms(&self) -> Vec<RoomEntry> {
        let index = self.index.read().await;
        let mut entries: Vec<RoomEntry> = index.rooms.values().cloned().collect();
        entries.sort_by_key(|entry| (entry.created_at, entry.sequence));
        entries
    }

    async fn bind_participant(&self, player_id: &str, room_id: &str) -> Result<(), RoomRepositoryError> {
        let mut index = self.index.write().await;
        if index.participants.contains_key(player_id) {
            return Err(RoomRepositoryError::ParticipantAlreadyBound(
                player_id.to_string(),
            ));
        }
        index
            .participants
            .insert(player_id.to_string(), room_id.to_string());
        Ok(())
    }

    async fn unbind_participant(&self, player_id: &str) -> Option<String> {
        let mut index = self.index.write().await;
        index.participants.remove(player_id)
    }

    async fn room_id_for(&self, player_id: &str) -> Option<String> {
        let index = self.index.read().await;
        index.participants.get(player_id).cloned()
    }

    async fn room_count(&self) -> usize {
        self.index.read().await.rooms.len()
    }
}
