use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    board::{Color, Winner},
    game_mode::GameMode,
    room::Room,
};

const ELO_K_FACTOR: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameOverReason {
    Completed,
    Resign,
    DrawAgreed,
    Disconnect,
}

/// Post-game facts handed to whatever keeps statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub room_id: String,
    pub winner: Option<Winner>,
    pub black_score: u8,
    pub white_score: u8,
    pub duration_secs: i64,
    pub mode: GameMode,
    pub reason: GameOverReason,
    /// Rank change for the black participant; white's is the negation.
    pub rank_delta: i32,
    pub finished_at: DateTime<Utc>,
}

impl GameSummary {
    pub fn from_room(room: &Room, reason: GameOverReason, finished_at: DateTime<Utc>) -> Self {
        let started_at = room.started_at.unwrap_or(room.created_at);
        let rank_delta = match (
            room.mode,
            room.participant_by_color(Color::Black),
            room.participant_by_color(Color::White),
            room.game_state.winner,
        ) {
            (GameMode::Pvp, Some(black), Some(white), Some(winner)) => {
                rank_delta(black.rank, white.rank, winner)
            }
            _ => 0,
        };

        GameSummary {
            room_id: room.room_id.clone(),
            winner: room.game_state.winner,
            black_score: room.game_state.black_score,
            white_score: room.game_state.white_score,
            duration_secs: (finished_at - started_at).num_seconds().max(0),
            mode: room.mode,
            reason,
            rank_delta,
            finished_at,
        }
    }
}

/// Elo change for black after a game against white.
pub fn rank_delta(black_rank: i32, white_rank: i32, winner: Winner) -> i32 {
    let gap = f64::from(white_rank) - f64::from(black_rank);
    let expected = 1.0 / (1.0 + 10f64.powf(gap / 400.0));
    let actual = match winner {
        Winner::Black => 1.0,
        Winner::White => 0.0,
        Winner::Draw => 0.5,
    };
    (ELO_K_FACTOR * (actual - expected)).round() as i32
}
