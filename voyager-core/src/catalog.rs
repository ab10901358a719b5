//! Static game catalog.
//!
//! The catalog is configuration, not user state: an ordered list of mini-games
//! whose ids become the keys of every player's progress map.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CATALOG_DATA: &str =
    include_str!("../../voyager-web/static/assets/data/catalog.json");

/// Identifier of a catalog entry. Always a small positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u16);

impl GameId {
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for GameId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// Selects which mini-game implementation renders an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Match,
    Flow,
    Quiz,
    Wheel,
    Maze,
    Certification,
    // Retired kinds kept so older catalogs still parse.
    Tap,
    Error,
    Ar,
}

impl GameKind {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Flow => "flow",
            Self::Quiz => "quiz",
            Self::Wheel => "wheel",
            Self::Maze => "maze",
            Self::Certification => "certification",
            Self::Tap => "tap",
            Self::Error => "error",
            Self::Ar => "ar",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDescriptor {
    pub id: GameId,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: GameKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no games")]
    Empty,
    #[error("game id must be positive")]
    ZeroId,
    #[error("duplicate game id {0}")]
    DuplicateId(GameId),
    #[error("catalog JSON invalid: {0}")]
    Parse(String),
}

/// Ordered, validated list of games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCatalog {
    games: Vec<GameDescriptor>,
}

impl GameCatalog {
    /// Build a catalog, rejecting empty lists, zero ids and duplicates.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] describing the first violated rule.
    pub fn new(games: Vec<GameDescriptor>) -> Result<Self, CatalogError> {
        if games.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = BTreeSet::new();
        for game in &games {
            if game.id.get() == 0 {
                return Err(CatalogError::ZeroId);
            }
            if !seen.insert(game.id) {
                return Err(CatalogError::DuplicateId(game.id));
            }
        }
        Ok(Self { games })
    }

    /// Parse and validate a catalog document of the form `{"games": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON and the validation
    /// errors of [`GameCatalog::new`] otherwise.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        #[derive(Deserialize)]
        struct Document {
            games: Vec<GameDescriptor>,
        }
        let doc: Document =
            serde_json::from_str(json).map_err(|err| CatalogError::Parse(err.to_string()))?;
        Self::new(doc.games)
    }

    /// Load the catalog embedded with the web assets.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::default_config()
    }

    /// Embedded catalog, or the built-in six-game list if the asset is unusable.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(DEFAULT_CATALOG_DATA).unwrap_or_else(|err| {
            log::warn!("embedded catalog rejected ({err}); using built-in list");
            Self {
                games: builtin_games(),
            }
        })
    }

    #[must_use]
    pub fn games(&self) -> &[GameDescriptor] {
        &self.games
    }

    pub fn ids(&self) -> impl Iterator<Item = GameId> + '_ {
        self.games.iter().map(|game| game.id)
    }

    #[must_use]
    pub fn get(&self, id: GameId) -> Option<&GameDescriptor> {
        self.games.iter().find(|game| game.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: GameId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for GameCatalog {
    fn default() -> Self {
        Self::default_config()
    }
}

fn builtin_games() -> Vec<GameDescriptor> {
    let entry = |id: u16, title: &str, description: &str, icon: &str, kind| GameDescriptor {
        id: GameId(id),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        kind,
    };
    vec![
        entry(1, "Module Match", "Match business scenarios to SAP modules.", "🏢", GameKind::Match),
        entry(2, "Founder Quest", "A final trivia challenge.", "👑", GameKind::Quiz),
        entry(3, "ERP Flow Builder", "Sequence the sales-to-cash process.", "🔄", GameKind::Flow),
        entry(4, "SAP Astrology", "Spin the wheel and read your SAP horoscope.", "🔮", GameKind::Wheel),
        entry(5, "Maze Airplane", "Fly through every checkpoint before time runs out.", "✈️", GameKind::Maze),
        entry(6, "Certification", "Scratch a card to claim your certification voucher.", "🎓", GameKind::Certification),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: u16, kind: GameKind) -> GameDescriptor {
        GameDescriptor {
            id: GameId(id),
            title: format!("Game {id}"),
            description: String::new(),
            icon: String::new(),
            kind,
        }
    }

    #[test]
    fn embedded_catalog_has_six_games_in_order() {
        let catalog = GameCatalog::load_from_static();
        let ids: Vec<u16> = catalog.ids().map(GameId::get).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.get(GameId(6)).map(|g| g.kind), Some(GameKind::Certification));
    }

    #[test]
    fn embedded_catalog_matches_builtin_fallback() {
        let embedded = GameCatalog::from_json(DEFAULT_CATALOG_DATA).unwrap();
        assert_eq!(embedded.games(), builtin_games().as_slice());
    }

    #[test]
    fn validation_rejects_bad_catalogs() {
        assert_eq!(GameCatalog::new(Vec::new()), Err(CatalogError::Empty));
        assert_eq!(
            GameCatalog::new(vec![descriptor(0, GameKind::Quiz)]),
            Err(CatalogError::ZeroId)
        );
        assert_eq!(
            GameCatalog::new(vec![descriptor(2, GameKind::Quiz), descriptor(2, GameKind::Maze)]),
            Err(CatalogError::DuplicateId(GameId(2)))
        );
        assert!(matches!(
            GameCatalog::from_json("{\"games\": 3}"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn retired_kinds_still_parse() {
        let json = r#"{"games":[{"id":3,"title":"Term Fast Tap","description":"","icon":"⚡","type":"tap"}]}"#;
        let catalog = GameCatalog::from_json(json).unwrap();
        assert_eq!(catalog.games()[0].kind, GameKind::Tap);
        assert_eq!(GameKind::Ar.key(), "ar");
    }
}
