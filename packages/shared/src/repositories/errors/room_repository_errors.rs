#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomRepositoryError {
    AlreadyExists(String),
    ParticipantAlreadyBound(String),
}

impl std::fmt::Display for RoomRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomRepositoryError::AlreadyExists(room_id) => {
                write!(f, "Room {} already exists", room_id)
            }
            RoomRepositoryError::ParticipantAlreadyBound(player_id) => {
                write!(f, "Player {} is already seated in a room", player_id)
            }
        }
    }
}

impl std::error::Error for RoomRepositoryError {}
