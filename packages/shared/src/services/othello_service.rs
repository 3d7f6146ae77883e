use crate::{
    models::{
        board::{Board, Color, Position, Winner},
        game_state::{GameState, MoveRecord},
    },
    services::errors::othello_service_errors::OthelloServiceError,
};

/// Who plays after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextTurn {
    /// The opponent has a legal move.
    Opponent(Color),
    /// The opponent must pass; the mover plays again.
    Pass(Color),
    GameOver(Winner),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub state: GameState,
    pub player: Color,
    pub position: Position,
    pub flipped: Vec<Position>,
    /// Set when the opponent had to pass after this move.
    pub passed: Option<Color>,
}

/// Game rules on top of the board engine: turn order, passes, and the
/// draw/resign/rematch transitions. Every method takes the current state by
/// reference and returns the next one.
#[derive(Clone, Default)]
pub struct OthelloService;

impl OthelloService {
    pub fn new() -> Self {
        OthelloService
    }

    pub fn new_game(&self) -> GameState {
        GameState::new()
    }

    pub fn next_turn(board: &Board, mover: Color) -> NextTurn {
        let opponent = mover.opponent();
        if board.has_legal_move(opponent) {
            NextTurn::Opponent(opponent)
        } else if board.has_legal_move(mover) {
            NextTurn::Pass(mover)
        } else {
            NextTurn::GameOver(board.winner())
        }
    }

    /// Validates and plays a move for `player`.
    /// Updates the board, scores, move history, turn, and game-over fields.
    pub fn validate_and_make_move(
        &self,
        state: &GameState,
        player: Color,
        position: Position,
    ) -> Result<MoveOutcome, OthelloServiceError> {
        if state.is_game_over {
            return Err(OthelloServiceError::GameOver);
        }

        if state.current_player != player {
            return Err(OthelloServiceError::NotYourTurn);
        }

        if !position.is_on_board() {
            return Err(OthelloServiceError::OutOfBounds {
                row: position.row,
                col: position.col,
            });
        }

        if !state.valid_moves.contains(&position) {
            return Err(OthelloServiceError::IllegalMove {
                row: position.row,
                col: position.col,
            });
        }

        let flipped = state.board.flipped_positions(player, position);
        let board = state.board.apply_move(player, position)?;

        let mut next = state.clone();
        next.board = board;
        next.last_move = Some(position);
        next.move_history.push(MoveRecord {
            player,
            row: position.row,
            col: position.col,
        });
        // a move answers any pending draw offer
        next.draw_offered_by = None;

        let passed = match Self::next_turn(&board, player) {
            NextTurn::Pass(_) => Some(player.opponent()),
            _ => None,
        };
        next.settle(player.opponent());

        Ok(MoveOutcome {
            state: next,
            player,
            position,
            flipped,
            passed,
        })
    }

    pub fn resign(&self, state: &GameState, player: Color) -> Result<GameState, OthelloServiceError> {
        if state.is_game_over {
            return Err(OthelloServiceError::GameOver);
        }
        let mut next = state.clone();
        next.conclude(Winner::from(player.opponent()));
        Ok(next)
    }

    /// Records a draw offer. Offering again simply overwrites the flag.
    pub fn offer_draw(&self, state: &GameState, player: Color) -> Result<GameState, OthelloServiceError> {
        if state.is_game_over {
            return Err(OthelloServiceError::GameOver);
        }
        let mut next = state.clone();
        next.draw_offered_by = Some(player);
        Ok(next)
    }

    pub fn accept_draw(&self, state: &GameState, player: Color) -> Result<GameState, OthelloServiceError> {
        if state.is_game_over {
            return Err(OthelloServiceError::GameOver);
        }
        match state.draw_offered_by {
            None => Err(OthelloServiceError::NoDrawOffer),
            Some(offered_by) if offered_by == player => Err(OthelloServiceError::OwnDrawOffer),
            Some(_) => {
                let mut next = state.clone();
                next.conclude(Winner::Draw);
                Ok(next)
            }
        }
    }

    pub fn decline_draw(&self, state: &GameState, player: Color) -> Result<GameState, OthelloServiceError> {
        if state.is_game_over {
            return Err(OthelloServiceError::GameOver);
        }
        match state.draw_offered_by {
            None => Err(OthelloServiceError::NoDrawOffer),
            Some(offered_by) if offered_by == player => Err(OthelloServiceError::OwnDrawOffer),
            Some(_) => {
                let mut next = state.clone();
                next.draw_offered_by = None;
                Ok(next)
            }
        }
    }

    pub fn offer_rematch(&self, state: &GameState, player: Color) -> Result<GameState, OthelloServiceError> {
        if !state.is_game_over {
            return Err(OthelloServiceError::GameInProgress);
        }
        let mut next = state.clone();
        next.rematch_offered_by = Some(player);
        Ok(next)
    }

    /// Accepting a rematch starts over from the opening position.
    pub fn accept_rematch(&self, state: &GameState, player: Color) -> Result<GameState, OthelloServiceError> {
        if !state.is_game_over {
            return Err(OthelloServiceError::GameInProgress);
        }
        match state.rematch_offered_by {
            None => Err(OthelloServiceError::NoRematchOffer),
            Some(offered_by) if offered_by == player => Err(OthelloServiceError::OwnRematchOffer),
            Some(_) => Ok(self.new_game()),
        }
    }

    pub fn decline_rematch(&self, state: &GameState, player: Color) -> Result<GameState, OthelloServiceError> {
        if !state.is_game_over {
            return Err(OthelloServiceError::GameInProgress);
        }
        match state.rematch_offered_by {
            None => Err(OthelloServiceError::NoRematchOffer),
            Some(offered_by) if offered_by == player => Err(OthelloServiceError::OwnRematchOffer),
            Some(_) => {
                let mut next = state.clone();
                next.rematch_offered_by = None;
                Ok(next)
            }
        }
    }

    /// Ends the game in favour of `winner` because the other side left.
    pub fn forfeit(&self, state: &GameState, winner: Color) -> GameState {
        let mut next = state.clone();
        next.conclude(Winner::from(winner));
        next
    }
}
