use serde::{Deserialize, Serialize};

use crate::models::board::Color;

/// What a connection tells us about itself when it asks for a seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub player_id: String,
    pub player_name: Option<String>,
    pub rank: i32,
}

impl PlayerProfile {
    pub fn new(player_id: &str, player_name: Option<String>, rank: i32) -> Self {
        PlayerProfile {
            player_id: player_id.to_string(),
            player_name: player_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            rank,
        }
    }
}

/// A seated player. The color is fixed when the seat is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub player_id: String,
    pub player_name: String,
    pub rank: i32,
    pub color: Color,
    pub is_computer: bool,
}

impl Participant {
    /// Seats a human; `seat_number` is 1-based and names anonymous players.
    pub fn seat(profile: PlayerProfile, color: Color, seat_number: usize) -> Self {
        Participant {
            player_name: profile
                .player_name
                .unwrap_or_else(|| format!("Player {}", seat_number)),
            player_id: profile.player_id,
            rank: profile.rank,
            color,
            is_computer: false,
        }
    }

    pub fn computer(room_id: &str, color: Color, rank: i32) -> Self {
        Participant {
            player_id: format!("computer-{}", room_id),
            player_name: "Computer".to_string(),
            rank,
            color,
            is_computer: true,
        }
    }
}
