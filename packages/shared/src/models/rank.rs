use serde::{Deserialize, Serialize};

/// Coarse skill tier used to scope matchmaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankBucket {
    Beginner,
    Intermediate,
    Advanced,
}

/// Bucket boundaries; supplied by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankThresholds {
    pub intermediate_min: i32,
    pub advanced_min: i32,
}

impl RankThresholds {
    pub fn bucket_for(&self, rank: i32) -> RankBucket {
        if rank >= self.advanced_min {
            RankBucket::Advanced
        } else if rank >= self.intermediate_min {
            RankBucket::Intermediate
        } else {
            RankBucket::Beginner
        }
    }
}

impl Default for RankThresholds {
    fn default() -> Self {
        RankThresholds {
            intermediate_min: 1200,
            advanced_min: 1800,
        }
    }
}
