//! Per-player progress map and the monotonic update rule.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{GameCatalog, GameId};
use crate::status::{GameStatus, Outcome};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgressError {
    #[error("game {0} is not part of this passport")]
    UnknownGame(GameId),
}

/// One stored progress row as returned by the identity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRow {
    pub game_id: GameId,
    pub status: GameStatus,
}

/// Mapping from catalog game id to status.
///
/// Keys are fixed when the map is created; updates only change values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap {
    games: BTreeMap<GameId, GameStatus>,
}

impl ProgressMap {
    /// Every catalog game at `UNLOCKED`.
    #[must_use]
    pub fn fresh(catalog: &GameCatalog) -> Self {
        Self {
            games: catalog.ids().map(|id| (id, GameStatus::Unlocked)).collect(),
        }
    }

    /// Rebuild a map from stored rows.
    ///
    /// The key set is the catalog's; catalog ids without a row default to
    /// `UNLOCKED` and rows for ids no longer in the catalog are dropped.
    #[must_use]
    pub fn from_rows(catalog: &GameCatalog, rows: &[ProgressRow]) -> Self {
        let games = catalog
            .ids()
            .map(|id| {
                let status = rows
                    .iter()
                    .find(|row| row.game_id == id)
                    .map_or(GameStatus::Unlocked, |row| row.status);
                (id, status)
            })
            .collect();
        Self { games }
    }

    #[must_use]
    pub fn status(&self, id: GameId) -> Option<GameStatus> {
        self.games.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GameId, GameStatus)> + '_ {
        self.games.iter().map(|(id, status)| (*id, *status))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    #[must_use]
    pub fn won_count(&self) -> usize {
        self.games.values().filter(|status| status.is_won()).count()
    }

    /// Apply a finished attempt; see [`apply_outcome`].
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::UnknownGame`] when `id` is not a key of this map.
    pub fn apply(&self, id: GameId, outcome: Outcome) -> Result<Self, ProgressError> {
        apply_outcome(self, id, outcome)
    }

    /// True iff every catalog game has an entry and every entry is `WON`.
    #[must_use]
    pub fn all_won(&self, catalog: &GameCatalog) -> bool {
        all_won(self, catalog)
    }
}

/// Produce the map that results from recording `outcome` for `id`.
///
/// A `WON` entry never goes back to `PARTICIPATED`; in that case the input map
/// is returned unchanged. Every other key is left untouched.
///
/// # Errors
///
/// Returns [`ProgressError::UnknownGame`] when `id` is not a key of `current`.
pub fn apply_outcome(
    current: &ProgressMap,
    id: GameId,
    outcome: Outcome,
) -> Result<ProgressMap, ProgressError> {
    let existing = current
        .status(id)
        .ok_or(ProgressError::UnknownGame(id))?;
    if existing.is_won() && outcome == Outcome::Participated {
        return Ok(current.clone());
    }
    let mut next = current.clone();
    next.games.insert(id, outcome.status());
    Ok(next)
}

#[must_use]
pub fn all_won(map: &ProgressMap, catalog: &GameCatalog) -> bool {
    catalog
        .ids()
        .all(|id| map.status(id).is_some_and(GameStatus::is_won))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> GameCatalog {
        GameCatalog::load_from_static()
    }

    #[test]
    fn fresh_map_unlocks_every_catalog_game() {
        let catalog = catalog();
        let map = ProgressMap::fresh(&catalog);
        assert_eq!(map.len(), catalog.len());
        assert!(map.iter().all(|(_, status)| status == GameStatus::Unlocked));
        assert!(!map.all_won(&catalog));
    }

    #[test]
    fn win_is_sticky_against_participation() {
        let map = ProgressMap::fresh(&catalog());
        let won = map.apply(GameId(2), Outcome::Won).unwrap();
        let after = won.apply(GameId(2), Outcome::Participated).unwrap();
        assert_eq!(after, won);
        assert_eq!(after.status(GameId(2)), Some(GameStatus::Won));
    }

    #[test]
    fn participation_can_be_upgraded_to_win() {
        let map = ProgressMap::fresh(&catalog())
            .apply(GameId(1), Outcome::Participated)
            .unwrap();
        assert_eq!(map.status(GameId(1)), Some(GameStatus::Participated));
        let map = map.apply(GameId(1), Outcome::Won).unwrap();
        assert_eq!(map.status(GameId(1)), Some(GameStatus::Won));
    }

    #[test]
    fn apply_touches_only_the_target_key() {
        let catalog = catalog();
        let base = ProgressMap::fresh(&catalog)
            .apply(GameId(4), Outcome::Won)
            .unwrap();
        for target in catalog.ids() {
            for outcome in [Outcome::Participated, Outcome::Won] {
                let next = base.apply(target, outcome).unwrap();
                for (id, status) in base.iter() {
                    if id != target {
                        assert_eq!(next.status(id), Some(status));
                    }
                }
            }
        }
    }

    #[test]
    fn unknown_game_is_rejected() {
        let map = ProgressMap::fresh(&catalog());
        assert_eq!(
            map.apply(GameId(42), Outcome::Won),
            Err(ProgressError::UnknownGame(GameId(42)))
        );
    }

    #[test]
    fn all_won_requires_every_catalog_id() {
        let catalog = catalog();
        let mut map = ProgressMap::fresh(&catalog);
        let ids: Vec<GameId> = catalog.ids().collect();
        for (index, id) in ids.iter().enumerate() {
            assert!(!map.all_won(&catalog));
            map = map.apply(*id, Outcome::Won).unwrap();
            assert_eq!(map.won_count(), index + 1);
        }
        assert!(map.all_won(&catalog));

        let partial = ProgressMap::from_rows(
            &catalog,
            &[ProgressRow {
                game_id: GameId(1),
                status: GameStatus::Won,
            }],
        );
        assert!(!partial.all_won(&catalog));
        assert!(!ProgressMap::default().all_won(&catalog));
    }

    #[test]
    fn rows_merge_over_catalog_defaults() {
        let catalog = catalog();
        let rows = [
            ProgressRow {
                game_id: GameId(3),
                status: GameStatus::Participated,
            },
            ProgressRow {
                game_id: GameId(99),
                status: GameStatus::Won,
            },
        ];
        let map = ProgressMap::from_rows(&catalog, &rows);
        assert_eq!(map.len(), catalog.len());
        assert_eq!(map.status(GameId(3)), Some(GameStatus::Participated));
        assert_eq!(map.status(GameId(5)), Some(GameStatus::Unlocked));
        assert_eq!(map.status(GameId(99)), None);
    }

    #[test]
    fn map_serializes_as_object_keyed_by_id() {
        let map = ProgressMap::fresh(&catalog())
            .apply(GameId(1), Outcome::Won)
            .unwrap();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["1"], "WON");
        assert_eq!(json["2"], "UNLOCKED");
        let back: ProgressMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
    }
}
