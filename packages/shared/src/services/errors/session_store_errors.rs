use crate::repositories::errors::room_repository_errors::RoomRepositoryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStoreError {
    RoomNotFound(String),
    RoomFull(String),
    RoomNotWaiting(String),
    AlreadyInRoom(String),
    NotInRoom(String),
    RepositoryError(RoomRepositoryError),
}

impl std::fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStoreError::RoomNotFound(room_id) => write!(f, "Room {} not found", room_id),
            SessionStoreError::RoomFull(room_id) => write!(f, "Room {} is full", room_id),
            SessionStoreError::RoomNotWaiting(room_id) => {
                write!(f, "Room {} is not accepting players", room_id)
            }
            SessionStoreError::AlreadyInRoom(room_id) => {
                write!(f, "You are already in room {}", room_id)
            }
            SessionStoreError::NotInRoom(player_id) => {
                write!(f, "Player {} is not in a room", player_id)
            }
            SessionStoreError::RepositoryError(err) => write!(f, "Repository error: {}", err),
        }
    }
}

impl std::error::Error for SessionStoreError {}

impl From<RoomRepositoryError> for SessionStoreError {
    fn from(err: RoomRepositoryError) -> Self {
        SessionStoreError::RepositoryError(err)
    }
}
