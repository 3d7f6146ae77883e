use rand::{seq::SliceRandom, Rng};
use tracing::debug;

use crate::models::{
    board::{Board, Color, Position, BOARD_SIZE},
    game_mode::Difficulty,
    game_state::GameState,
};

const CORNER_WEIGHT: i32 = 25;
const EDGE_WEIGHT: i32 = 5;

const CORNER_MASK: u64 = 1 | (1 << 7) | (1 << 56) | (1 << 63);
const TOP_ROW: u64 = 0xff;
const BOTTOM_ROW: u64 = 0xff << 56;
const LEFT_COLUMN: u64 = 0x0101_0101_0101_0101;
const RIGHT_COLUMN: u64 = LEFT_COLUMN << (BOARD_SIZE - 1);
const EDGE_MASK: u64 = (TOP_ROW | BOTTOM_ROW | LEFT_COLUMN | RIGHT_COLUMN) & !CORNER_MASK;

/// Computer opponent. Easy plays a random legal move; medium and hard run a
/// depth-limited minimax with alpha-beta pruning over the immutable board.
#[derive(Clone, Default)]
pub struct AiService;

impl AiService {
    pub fn new() -> Self {
        AiService
    }

    pub fn choose_move(&self, state: &GameState, difficulty: Difficulty) -> Option<Position> {
        self.choose_move_with_rng(state, difficulty, &mut rand::thread_rng())
    }

    /// Same as [`AiService::choose_move`] with a caller-supplied random source.
    pub fn choose_move_with_rng<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<Position> {
        if state.is_game_over {
            return None;
        }

        let engine = state.current_player;
        let moves = state.board.legal_moves(engine);
        if moves.is_empty() {
            return None;
        }

        let Some(depth) = difficulty.search_depth() else {
            return moves.choose(rng).copied();
        };

        let mut best_move = None;
        let mut best_score = i32::MIN;
        let mut alpha = i32::MIN;

        for position in moves {
            let Ok(child) = state.board.apply_move(engine, position) else {
                continue;
            };
            let score = minimax(&child, engine.opponent(), engine, depth - 1, alpha, i32::MAX);
            // strictly better only, so ties keep the earliest move in row-major order
            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(position);
            }
            alpha = alpha.max(best_score);
        }

        debug!(
            "AI ({:?}) chose {:?} with score {} for {}",
            difficulty, best_move, best_score, engine
        );

        best_move
    }
}

fn minimax(board: &Board, to_move: Color, engine: Color, depth: u8, mut alpha: i32, mut beta: i32) -> i32 {
    let moves = board.legal_moves(to_move);

    if moves.is_empty() {
        if !board.has_legal_move(to_move.opponent()) {
            return evaluate(board, engine);
        }
        // forced pass: the other side moves on the same board, depth unchanged
        return minimax(board, to_move.opponent(), engine, depth, alpha, beta);
    }

    if depth == 0 {
        return evaluate(board, engine);
    }

    let maximizing = to_move == engine;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for position in moves {
        let Ok(child) = board.apply_move(to_move, position) else {
            continue;
        };
        let score = minimax(&child, to_move.opponent(), engine, depth - 1, alpha, beta);

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }

        if beta <= alpha {
            break;
        }
    }

    best
}

/// Static score of `board` from `engine`'s side: disc difference plus
/// corner and edge occupancy bonuses.
pub fn evaluate(board: &Board, engine: Color) -> i32 {
    let (me, opp) = board.sides(engine);

    let discs = me.count_ones() as i32 - opp.count_ones() as i32;
    let corners = (me & CORNER_MASK).count_ones() as i32 - (opp & CORNER_MASK).count_ones() as i32;
    let edges = (me & EDGE_MASK).count_ones() as i32 - (opp & EDGE_MASK).count_ones() as i32;

    discs + CORNER_WEIGHT * corners + EDGE_WEIGHT * edges
}
