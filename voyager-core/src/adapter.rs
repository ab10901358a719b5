//! Normalizes mini-game completion callbacks into completion events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::GameId;
use crate::metadata::GameMetadata;
use crate::session::UserId;
use crate::status::Outcome;

/// Raw callback from a mini-game: which game, whether it was won, and what it
/// chose to report.
#[derive(Debug, Clone, PartialEq)]
pub struct GameFinish {
    pub game_id: GameId,
    pub won: bool,
    pub metadata: GameMetadata,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl GameFinish {
    /// A finish reported with only a win flag.
    #[must_use]
    pub fn bare(game_id: GameId, won: bool, started_at: DateTime<Utc>) -> Self {
        Self {
            game_id,
            won,
            metadata: GameMetadata::None,
            started_at,
            completed_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: GameMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// The single event shape consumed by the progress state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionEvent {
    pub game_id: GameId,
    pub outcome: Outcome,
    pub metadata: GameMetadata,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl CompletionEvent {
    #[must_use]
    pub fn reward_link(&self) -> Option<&str> {
        self.metadata.reward_link()
    }

    /// Durable audit row for this attempt.
    #[must_use]
    pub fn audit_record(&self, user_id: &UserId) -> AuditRecord {
        AuditRecord {
            user_id: user_id.clone(),
            game_id: self.game_id,
            outcome: self.outcome,
            metadata: self.metadata.clone(),
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }
}

/// Append-only log entry for one attempt, win or participation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub user_id: UserId,
    pub game_id: GameId,
    pub outcome: Outcome,
    pub metadata: GameMetadata,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Map any mini-game callback to a [`CompletionEvent`].
#[must_use]
pub fn on_game_finished(finish: GameFinish) -> CompletionEvent {
    CompletionEvent {
        game_id: finish.game_id,
        outcome: Outcome::from_win(finish.won),
        metadata: finish.metadata,
        started_at: finish.started_at,
        completed_at: finish.completed_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::CertificationClaim;

    #[test]
    fn bare_finish_normalizes_to_participation() {
        let event = on_game_finished(GameFinish::bare(GameId(3), false, Utc::now()));
        assert_eq!(event.outcome, Outcome::Participated);
        assert!(event.metadata.is_none());
        assert_eq!(event.reward_link(), None);
    }

    #[test]
    fn certification_reward_is_threaded_through() {
        let finish = GameFinish::bare(GameId(6), true, Utc::now()).with_metadata(
            GameMetadata::Certification(CertificationClaim {
                domain: "Logistics".into(),
                voucher: "EWM Associate".into(),
                reward_link: Some("https://example.com/ewm".into()),
            }),
        );
        let event = on_game_finished(finish);
        assert_eq!(event.outcome, Outcome::Won);
        assert_eq!(event.reward_link(), Some("https://example.com/ewm"));

        let record = event.audit_record(&UserId("u-9".into()));
        assert_eq!(record.game_id, GameId(6));
        assert_eq!(record.outcome, Outcome::Won);
        assert_eq!(record.metadata, event.metadata);
    }
}
