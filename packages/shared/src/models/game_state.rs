use serde::{Deserialize, Serialize};

use crate::models::board::{Board, Color, Position, Winner};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Color,
    pub row: u8,
    pub col: u8,
}

/// Full snapshot of a game, sent to clients as `gameState`.
///
/// `valid_moves`, the scores and the game-over fields are derived from the
/// board and `current_player`; they are recomputed on every transition by
/// [`GameState::from_position`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub current_player: Color,
    pub valid_moves: Vec<Position>,
    pub last_move: Option<Position>,
    pub black_score: u8,
    pub white_score: u8,
    pub is_game_over: bool,
    pub winner: Option<Winner>,
    pub draw_offered_by: Option<Color>,
    pub rematch_offered_by: Option<Color>,
    pub move_history: Vec<MoveRecord>,
}

impl GameState {
    pub fn new() -> Self {
        Self::from_position(Board::initial(), Color::Black)
    }

    /// Builds a state for `board` with `to_move` nominally on turn.
    ///
    /// If `to_move` cannot play the turn passes to the opponent; if neither
    /// side can play the game is over and the winner is settled.
    pub fn from_position(board: Board, to_move: Color) -> Self {
        let mut state = GameState {
            board,
            current_player: to_move,
            valid_moves: Vec::new(),
            last_move: None,
            black_score: 0,
            white_score: 0,
            is_game_over: false,
            winner: None,
            draw_offered_by: None,
            rematch_offered_by: None,
            move_history: Vec::new(),
        };
        state.settle(to_move);
        state
    }

    /// Recomputes every derived field after the board changed.
    pub(crate) fn settle(&mut self, to_move: Color) {
        let (black_score, white_score) = self.board.score();
        self.black_score = black_score;
        self.white_score = white_score;

        let current = if self.board.has_legal_move(to_move) {
            Some(to_move)
        } else if self.board.has_legal_move(to_move.opponent()) {
            Some(to_move.opponent())
        } else {
            None
        };

        match current {
            Some(player) => {
                self.current_player = player;
                self.valid_moves = self.board.legal_moves(player);
            }
            None => {
                self.current_player = to_move;
                self.valid_moves.clear();
                self.is_game_over = true;
                self.winner = Some(self.board.winner());
            }
        }
    }

    /// Ends the game with an explicit winner (resign, draw, forfeiture).
    pub(crate) fn conclude(&mut self, winner: Winner) {
        self.is_game_over = true;
        self.winner = Some(winner);
        self.valid_moves.clear();
        self.draw_offered_by = None;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
