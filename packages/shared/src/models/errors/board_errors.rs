#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    OutOfBounds { row: u8, col: u8 },
    IllegalMove { row: u8, col: u8 },
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "Position ({}, {}) is off the board", row, col)
            }
            BoardError::IllegalMove { row, col } => {
                write!(f, "Move ({}, {}) is not legal", row, col)
            }
        }
    }
}

impl std::error::Error for BoardError {}
