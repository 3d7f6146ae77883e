use serde::{Deserialize, Serialize};

/// AI strength. Easy plays a random legal move; the others search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Search depth in plies, `None` for random play.
    pub fn search_depth(self) -> Option<u8> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(3),
            Difficulty::Hard => Some(6),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GameMode {
    Pvp,
    Computer { difficulty: Difficulty },
}

impl GameMode {
    pub fn difficulty(&self) -> Option<Difficulty> {
        match self {
            GameMode::Pvp => None,
            GameMode::Computer { difficulty } => Some(*difficulty),
        }
    }
}
