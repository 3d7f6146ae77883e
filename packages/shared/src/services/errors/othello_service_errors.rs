use crate::models::errors::board_errors::BoardError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OthelloServiceError {
    OutOfBounds { row: u8, col: u8 },
    IllegalMove { row: u8, col: u8 },
    NotYourTurn,
    GameOver,
    GameInProgress,
    NoDrawOffer,
    OwnDrawOffer,
    NoRematchOffer,
    OwnRematchOffer,
}

impl std::fmt::Display for OthelloServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OthelloServiceError::OutOfBounds { row, col } => {
                write!(f, "Position ({}, {}) is off the board", row, col)
            }
            OthelloServiceError::IllegalMove { row, col } => {
                write!(f, "Move ({}, {}) is not legal", row, col)
            }
            OthelloServiceError::NotYourTurn => write!(f, "Not your turn"),
            OthelloServiceError::GameOver => write!(f, "Game is already over"),
            OthelloServiceError::GameInProgress => write!(f, "Game is still in progress"),
            OthelloServiceError::NoDrawOffer => write!(f, "There is no draw offer to answer"),
            OthelloServiceError::OwnDrawOffer => {
                write!(f, "You cannot answer your own draw offer")
            }
            OthelloServiceError::NoRematchOffer => {
                write!(f, "There is no rematch offer to answer")
            }
            OthelloServiceError::OwnRematchOffer => {
                write!(f, "You cannot answer your own rematch offer")
            }
        }
    }
}

impl std::error::Error for OthelloServiceError {}

impl From<BoardError> for OthelloServiceError {
    fn from(error: BoardError) -> Self {
        match error {
            BoardError::OutOfBounds { row, col } => OthelloServiceError::OutOfBounds { row, col },
            BoardError::IllegalMove { row, col } => OthelloServiceError::IllegalMove { row, col },
        }
    }
}
