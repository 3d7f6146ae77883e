use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared::models::{
    board::{Color, Position, Winner},
    game_mode::{Difficulty, GameMode},
    game_state::GameState,
    game_summary::GameOverReason,
    participant::Participant,
    rank::RankBucket,
    room::{Room, RoomStatus},
};

use crate::errors::action_errors::ErrorCategory;

/// Messages a client may send. Tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    CreateRoom {
        player_name: Option<String>,
        rank: Option<i32>,
    },
    JoinRoom {
        room_id: String,
        player_name: Option<String>,
        rank: Option<i32>,
    },
    JoinRandom {
        rank_set_type: Option<RankBucket>,
        rank: Option<i32>,
        player_name: Option<String>,
    },
    PlayComputer {
        difficulty: Difficulty,
        player_name: Option<String>,
    },
    MakeMove {
        row: u8,
        col: u8,
    },
    Resign,
    OfferDraw,
    AcceptDraw,
    DeclineDraw,
    OfferRematch,
    AcceptRematch,
    DeclineRematch,
    SendChat {
        message: String,
    },
    GetRoomInfo {
        room_id: String,
    },
    SyncState,
}

impl ClientMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::CreateRoom { .. } => "create-room",
            ClientMessage::JoinRoom { .. } => "join-room",
            ClientMessage::JoinRandom { .. } => "join-random",
            ClientMessage::PlayComputer { .. } => "play-computer",
            ClientMessage::MakeMove { .. } => "make-move",
            ClientMessage::Resign => "resign",
            ClientMessage::OfferDraw => "offer-draw",
            ClientMessage::AcceptDraw => "accept-draw",
            ClientMessage::DeclineDraw => "decline-draw",
            ClientMessage::OfferRematch => "offer-rematch",
            ClientMessage::AcceptRematch => "accept-rematch",
            ClientMessage::DeclineRematch => "decline-rematch",
            ClientMessage::SendChat { .. } => "send-chat",
            ClientMessage::GetRoomInfo { .. } => "get-room-info",
            ClientMessage::SyncState => "sync-state",
        }
    }
}

/// Messages the server pushes to clients. Tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    Connected {
        player_id: String,
    },
    RoomCreated {
        room_id: String,
        color: Color,
        rank_bucket: Option<RankBucket>,
    },
    WaitingForPlayer {
        room_id: String,
    },
    PlayerJoined {
        room_id: String,
        player: Participant,
    },
    GameReady {
        room_id: String,
        mode: GameMode,
        black: Participant,
        white: Participant,
        game_state: GameState,
    },
    GameState {
        room_id: String,
        game_state: GameState,
    },
    MoveMade {
        player: Color,
        row: u8,
        col: u8,
        flipped: Vec<Position>,
        current_player: Color,
        black_score: u8,
        white_score: u8,
        passed: Option<Color>,
    },
    GameOver {
        winner: Option<Winner>,
        black_score: u8,
        white_score: u8,
        reason: GameOverReason,
    },
    DrawOffered {
        player: Color,
    },
    DrawDeclined {
        player: Color,
    },
    RematchOffered {
        player: Color,
    },
    RematchAccepted {
        game_state: GameState,
    },
    RematchDeclined {
        player: Color,
    },
    PlayerDisconnected {
        player_id: String,
        player: Color,
    },
    ChatMessage {
        player: Color,
        player_name: String,
        message: String,
        timestamp: DateTime<Utc>,
    },
    RoomInfo {
        room_id: String,
        status: RoomStatus,
        mode: GameMode,
        rank_bucket: Option<RankBucket>,
        players: Vec<Participant>,
        is_full: bool,
    },
    Error {
        message: String,
        code: ErrorCategory,
    },
}

impl ServerMessage {
    pub fn game_state(room: &Room) -> Self {
        ServerMessage::GameState {
            room_id: room.room_id.clone(),
            game_state: room.game_state.clone(),
        }
    }

    pub fn game_over(state: &GameState, reason: GameOverReason) -> Self {
        ServerMessage::GameOver {
            winner: state.winner,
            black_score: state.black_score,
            white_score: state.white_score,
            reason,
        }
    }

    pub fn room_info(room: &Room) -> Self {
        ServerMessage::RoomInfo {
            room_id: room.room_id.clone(),
            status: room.status,
            mode: room.mode,
            rank_bucket: room.rank_bucket,
            players: room.participants.clone(),
            is_full: room.is_full(),
        }
    }

    pub fn error(message: &str, code: ErrorCategory) -> Self {
        ServerMessage::Error {
            message: message.to_string(),
            code,
        }
    }
}
