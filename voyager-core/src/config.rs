use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::NAME_MAX_LEN;

const DEFAULT_PASSPORT_DATA: &str =
    include_str!("../../voyager-web/static/assets/data/passport.json");

/// Errors raised when passport configuration invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("celebrationDelayMs must be between {min} and {max} (got {value})")]
    CelebrationDelay { min: u64, max: u64, value: u64 },
    #[error("cacheKey must not be empty")]
    EmptyCacheKey,
    #[error("nameMaxLen must be at least 1")]
    NameMaxLen,
    #[error("config JSON invalid: {0}")]
    Parse(String),
}

/// Tunables for the passport controller and browser adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportConfig {
    #[serde(default = "PassportConfig::default_celebration_delay_ms")]
    pub celebration_delay_ms: u64,
    #[serde(default = "PassportConfig::default_cache_key")]
    pub cache_key: String,
    #[serde(default = "PassportConfig::default_name_max_len")]
    pub name_max_len: usize,
}

impl PassportConfig {
    const MIN_DELAY_MS: u64 = 1;
    const MAX_DELAY_MS: u64 = 60_000;

    const fn default_celebration_delay_ms() -> u64 {
        2_500
    }

    fn default_cache_key() -> String {
        String::from("voyager.session")
    }

    const fn default_name_max_len() -> usize {
        NAME_MAX_LEN
    }

    #[must_use]
    pub const fn celebration_delay(&self) -> Duration {
        Duration::from_millis(self.celebration_delay_ms)
    }

    /// Check every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_DELAY_MS..=Self::MAX_DELAY_MS).contains(&self.celebration_delay_ms) {
            return Err(ConfigError::CelebrationDelay {
                min: Self::MIN_DELAY_MS,
                max: Self::MAX_DELAY_MS,
                value: self.celebration_delay_ms,
            });
        }
        if self.cache_key.trim().is_empty() {
            return Err(ConfigError::EmptyCacheKey);
        }
        if self.name_max_len == 0 {
            return Err(ConfigError::NameMaxLen);
        }
        Ok(())
    }

    /// Parse and validate a config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or a document that is
    /// not an object, and a validation error otherwise.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        if !value.is_object() {
            return Err(ConfigError::Parse(String::from(
                "expected a JSON object at the top level",
            )));
        }
        let cfg: Self =
            serde_json::from_value(value).map_err(|err| ConfigError::Parse(err.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_PASSPORT_DATA).unwrap_or_else(|err| {
            log::warn!("embedded passport config rejected ({err}); using defaults");
            Self::default_config()
        })
    }

    #[must_use]
    pub fn default_config() -> Self {
        Self {
            celebration_delay_ms: Self::default_celebration_delay_ms(),
            cache_key: Self::default_cache_key(),
            name_max_len: Self::default_name_max_len(),
        }
    }
}

impl Default for PassportConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_matches_defaults() {
        assert_eq!(PassportConfig::load_from_static(), PassportConfig::default_config());
        assert_eq!(
            PassportConfig::default().celebration_delay(),
            Duration::from_millis(2_500)
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg = PassportConfig::from_json(r#"{"celebrationDelayMs": 500}"#).unwrap();
        assert_eq!(cfg.celebration_delay_ms, 500);
        assert_eq!(cfg.cache_key, "voyager.session");
        assert_eq!(cfg.name_max_len, NAME_MAX_LEN);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert_eq!(
            PassportConfig::from_json(r#"{"celebrationDelayMs": 0}"#),
            Err(ConfigError::CelebrationDelay {
                min: 1,
                max: 60_000,
                value: 0
            })
        );
        assert_eq!(
            PassportConfig::from_json(r#"{"cacheKey": "  "}"#),
            Err(ConfigError::EmptyCacheKey)
        );
        assert_eq!(
            PassportConfig::from_json(r#"{"nameMaxLen": 0}"#),
            Err(ConfigError::NameMaxLen)
        );
        assert!(matches!(
            PassportConfig::from_json("[]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn positional_documents_are_rejected() {
        for doc in ["[500]", r#"[500, "cache", 10]"#, "42", "null"] {
            assert!(
                matches!(PassportConfig::from_json(doc), Err(ConfigError::Parse(_))),
                "{doc} should not parse as a config"
            );
        }
        assert!(PassportConfig::from_json("{}").is_ok());
    }
}
