use serde::{Deserialize, Serialize};

use crate::models::errors::board_errors::BoardError;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    Black,
    White,
}

/// Final result of a game. Serialized as `"black"`, `"white"` or `"draw"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Winner::Black,
            Color::White => Winner::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Position { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    fn from_index(index: usize) -> Self {
        Position {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }
}

/// An immutable Othello position stored as one bitboard per color.
///
/// Every rule operation takes `&self` and returns a fresh value, so a board
/// can be shared freely between the game state and AI search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<Cell>>", try_from = "Vec<Vec<Cell>>")]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// The canonical opening: white on d4/e5, black on e4/d5.
    pub fn initial() -> Self {
        Board {
            black: bit(3 * BOARD_SIZE + 4) | bit(4 * BOARD_SIZE + 3),
            white: bit(3 * BOARD_SIZE + 3) | bit(4 * BOARD_SIZE + 4),
        }
    }

    /// Builds a board from a grid of cells, row-major.
    pub fn from_cells(cells: &[[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = Board { black: 0, white: 0 };
        for (row, line) in cells.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                let square = bit(row * BOARD_SIZE + col);
                match cell {
                    Cell::Black => board.black |= square,
                    Cell::White => board.white |= square,
                    Cell::Empty => {}
                }
            }
        }
        board
    }

    pub fn cell(&self, pos: Position) -> Cell {
        if !pos.is_on_board() {
            return Cell::Empty;
        }
        let square = bit(pos.index());
        if self.black & square != 0 {
            Cell::Black
        } else if self.white & square != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Bitmask of every square `player` may legally play.
    pub fn legal_mask(&self, player: Color) -> u64 {
        let (me, opp) = self.sides(player);
        let occupied = me | opp;
        let mut legal = 0u64;

        for index in 0..NUM_SQUARES {
            let square = bit(index);
            if occupied & square != 0 {
                continue;
            }
            if collect_flips(index, me, opp) != 0 {
                legal |= square;
            }
        }

        legal
    }

    /// Legal moves for `player` in row-major order.
    pub fn legal_moves(&self, player: Color) -> Vec<Position> {
        mask_to_positions(self.legal_mask(player))
    }

    pub fn has_legal_move(&self, player: Color) -> bool {
        self.legal_mask(player) != 0
    }

    pub fn is_legal(&self, player: Color, pos: Position) -> bool {
        pos.is_on_board() && self.flip_mask(player, pos) != 0
    }

    /// Squares that would flip if `player` played `pos`. Zero when illegal.
    pub fn flip_mask(&self, player: Color, pos: Position) -> u64 {
        if !pos.is_on_board() {
            return 0;
        }
        let (me, opp) = self.sides(player);
        collect_flips(pos.index(), me, opp)
    }

    pub fn flipped_positions(&self, player: Color, pos: Position) -> Vec<Position> {
        mask_to_positions(self.flip_mask(player, pos))
    }

    /// Returns the board after `player` plays `pos`, leaving `self` untouched.
    pub fn apply_move(&self, player: Color, pos: Position) -> Result<Board, BoardError> {
        if !pos.is_on_board() {
            return Err(BoardError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            });
        }

        let flips = self.flip_mask(player, pos);
        if flips == 0 {
            return Err(BoardError::IllegalMove {
                row: pos.row,
                col: pos.col,
            });
        }

        let (me, opp) = self.sides(player);
        let next_me = me | bit(pos.index()) | flips;
        let next_opp = opp & !flips;

        Ok(match player {
            Color::Black => Board {
                black: next_me,
                white: next_opp,
            },
            Color::White => Board {
                black: next_opp,
                white: next_me,
            },
        })
    }

    /// Returns `(black_count, white_count)`.
    pub fn score(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn count(&self, player: Color) -> u8 {
        let (me, _) = self.sides(player);
        me.count_ones() as u8
    }

    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - (self.black | self.white).count_ones() as u8
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Terminal when the board is full or neither side can move.
    pub fn is_terminal(&self) -> bool {
        self.is_full() || (!self.has_legal_move(Color::Black) && !self.has_legal_move(Color::White))
    }

    /// Winner by strict disc comparison; equal counts are a draw.
    pub fn winner(&self) -> Winner {
        let (black, white) = self.score();
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Winner::Black,
            std::cmp::Ordering::Less => Winner::White,
            std::cmp::Ordering::Equal => Winner::Draw,
        }
    }

    /// Raw `(own, opponent)` bitboards from `player`'s point of view.
    pub fn sides(&self, player: Color) -> (u64, u64) {
        match player {
            Color::Black => (self.black, self.white),
            Color::White => (self.white, self.black),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl From<Board> for Vec<Vec<Cell>> {
    fn from(board: Board) -> Self {
        (0..BOARD_SIZE as u8)
            .map(|row| {
                (0..BOARD_SIZE as u8)
                    .map(|col| board.cell(Position::new(row, col)))
                    .collect()
            })
            .collect()
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Board {
    type Error = String;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_SIZE || rows.iter().any(|row| row.len() != BOARD_SIZE) {
            return Err(format!("board must be {}x{}", BOARD_SIZE, BOARD_SIZE));
        }
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in rows.iter().enumerate() {
            cells[row].copy_from_slice(line);
        }
        Ok(Board::from_cells(&cells))
    }
}

pub fn mask_to_positions(mut mask: u64) -> Vec<Position> {
    let mut positions = Vec::with_capacity(mask.count_ones() as usize);
    while mask != 0 {
        let index = mask.trailing_zeros() as usize;
        positions.push(Position::from_index(index));
        mask &= mask - 1;
    }
    positions
}

fn collect_flips(index: usize, me: u64, opp: u64) -> u64 {
    let square = bit(index);
    if (me | opp) & square != 0 {
        return 0;
    }

    let row = (index / BOARD_SIZE) as i32;
    let col = (index % BOARD_SIZE) as i32;
    let mut flips = 0u64;

    for (dr, dc) in DIRECTIONS {
        let mut r = row + dr;
        let mut c = col + dc;
        let mut line = 0u64;

        while in_bounds(r, c) {
            let next = bit(r as usize * BOARD_SIZE + c as usize);
            if opp & next != 0 {
                line |= next;
            } else {
                if me & next != 0 {
                    flips |= line;
                }
                break;
            }
            r += dr;
            c += dc;
        }
    }

    flips
}

fn bit(index: usize) -> u64 {
    1u64 << index
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
