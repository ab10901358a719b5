//! Typed completion metadata reported by the mini-games.

use serde::{Deserialize, Serialize};

/// Timing and checkpoint stats from one maze run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeStats {
    pub scenario_theme: String,
    pub total_checkpoints: u32,
    pub completed_checkpoints: u32,
    pub time_remaining: u32,
    pub time_taken: u32,
    pub grid_size: u32,
    pub success: bool,
}

/// A voucher claimed from the certification scratch cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationClaim {
    pub domain: String,
    pub voucher: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_link: Option<String>,
}

/// Metadata attached to a completion, tagged by game type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gameType", rename_all = "snake_case")]
pub enum GameMetadata {
    #[default]
    None,
    Maze(MazeStats),
    Certification(CertificationClaim),
    #[serde(rename_all = "camelCase")]
    Wheel { question_id: String, option_id: String },
    Match { correct: u32, required: u32 },
    Flow { attempt: Vec<String> },
    Quiz { answer: String },
    Tap { score: u32 },
    #[serde(rename_all = "camelCase")]
    ErrorSpot {
        scenario_id: String,
        found: u32,
        total: u32,
        false_flags: u32,
    },
    Ar { details: serde_json::Map<String, serde_json::Value> },
}

impl GameMetadata {
    /// Reward reference to include in the completion notice, if any.
    #[must_use]
    pub fn reward_link(&self) -> Option<&str> {
        match self {
            Self::Certification(claim) => claim.reward_link.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
