use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{
    board::Color,
    game_mode::GameMode,
    game_state::GameState,
    participant::Participant,
    rank::RankBucket,
};

pub const ROOM_CODE_LENGTH: usize = 6;
const ROOM_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Active,
    Finished,
}

/// A game room holding at most two participants.
///
/// Rooms live inside the session store; everything outside the store only
/// ever sees a locked, read-only view or a cloned snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: String,
    pub participants: Vec<Participant>,
    pub status: RoomStatus,
    pub rank_bucket: Option<RankBucket>,
    pub mode: GameMode,
    pub game_state: GameState,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
}

impl Room {
    pub fn new(room_id: &str, founder: Participant, rank_bucket: Option<RankBucket>) -> Self {
        Room {
            room_id: room_id.to_string(),
            participants: vec![founder],
            status: RoomStatus::Waiting,
            rank_bucket,
            mode: GameMode::Pvp,
            game_state: GameState::new(),
            created_at: Utc::now(),
            started_at: None,
        }
    }

    pub fn participant(&self, player_id: &str) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|participant| participant.player_id == player_id)
    }

    pub fn participant_by_color(&self, color: Color) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|participant| participant.color == color)
    }

    /// The participant who created the room.
    pub fn founder(&self) -> Option<&Participant> {
        self.participants.first()
    }

    pub fn computer(&self) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|participant| participant.is_computer)
    }

    pub fn human_ids(&self) -> Vec<String> {
        self.participants
            .iter()
            .filter(|participant| !participant.is_computer)
            .map(|participant| participant.player_id.clone())
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= 2
    }
}

/// Six uniformly random characters from `[A-Z0-9]`.
pub fn generate_room_code() -> String {
    let mut rng = rand::thread_rng();
    (0..ROOM_CODE_LENGTH)
        .map(|_| ROOM_CODE_CHARSET[rng.gen_range(0..ROOM_CODE_CHARSET.len())] as char)
        .collect()
}

/// Room codes are case-insensitive on input.
pub fn normalize_room_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
