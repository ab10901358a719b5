use serde::{Deserialize, Serialize};

/// Per-game status stored in a player's progress map.
///
/// The variants are ordered: `Locked < Unlocked < Participated < Won`.
/// `Locked` exists for stored data compatibility but no transition produces it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Locked,
    #[default]
    Unlocked,
    Participated,
    Won,
}

impl GameStatus {
    #[must_use]
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }

    /// Whether the player has finished at least one attempt.
    #[must_use]
    pub const fn is_attempted(self) -> bool {
        matches!(self, Self::Participated | Self::Won)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Locked => "LOCKED",
            Self::Unlocked => "UNLOCKED",
            Self::Participated => "PARTICIPATED",
            Self::Won => "WON",
        }
    }
}

/// Result of one finished mini-game attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Participated,
    Won,
}

impl Outcome {
    #[must_use]
    pub const fn from_win(won: bool) -> Self {
        if won { Self::Won } else { Self::Participated }
    }

    #[must_use]
    pub const fn status(self) -> GameStatus {
        match self {
            Self::Participated => GameStatus::Participated,
            Self::Won => GameStatus::Won,
        }
    }
}

impl From<bool> for Outcome {
    fn from(won: bool) -> Self {
        Self::from_win(won)
    }
}

impl From<Outcome> for GameStatus {
    fn from(outcome: Outcome) -> Self {
        outcome.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_ordered() {
        assert!(GameStatus::Locked < GameStatus::Unlocked);
        assert!(GameStatus::Unlocked < GameStatus::Participated);
        assert!(GameStatus::Participated < GameStatus::Won);
    }

    #[test]
    fn status_serializes_in_upper_case() {
        let json = serde_json::to_string(&GameStatus::Participated).unwrap();
        assert_eq!(json, "\"PARTICIPATED\"");
        let parsed: GameStatus = serde_json::from_str("\"WON\"").unwrap();
        assert_eq!(parsed, GameStatus::Won);
        assert_eq!(GameStatus::Won.as_str(), "WON");
    }

    #[test]
    fn outcome_maps_from_win_flag() {
        assert_eq!(Outcome::from(true), Outcome::Won);
        assert_eq!(Outcome::from(false), Outcome::Participated);
        assert_eq!(GameStatus::from(Outcome::Won), GameStatus::Won);
        assert!(!GameStatus::Unlocked.is_attempted());
        assert!(GameStatus::Participated.is_attempted());
    }
}
