use voyager_core::{CacheError, CachedSession, SessionCache};

use crate::dom::{js_error_message, local_storage};

/// Session cache kept in `localStorage` as JSON under a single key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStorageCache {
    key: String,
}

impl LocalStorageCache {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Decode a stored entry. Blank entries count as absent.
///
/// # Errors
///
/// Returns [`CacheError::Corrupt`] for text that is not a cached session.
pub fn decode_entry(raw: Option<&str>) -> Result<Option<CachedSession>, CacheError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => serde_json::from_str(text)
            .map(Some)
            .map_err(|err| CacheError::Corrupt(err.to_string())),
    }
}

impl SessionCache for LocalStorageCache {
    fn read_last_session(&self) -> Result<Option<CachedSession>, CacheError> {
        let storage =
            local_storage().map_err(|err| CacheError::Unavailable(js_error_message(&err)))?;
        let raw = storage
            .get_item(&self.key)
            .map_err(|err| CacheError::Unavailable(js_error_message(&err)))?;
        decode_entry(raw.as_deref())
    }

    fn write_last_session(&self, session: &CachedSession) -> Result<(), CacheError> {
        let json =
            serde_json::to_string(session).map_err(|err| CacheError::Corrupt(err.to_string()))?;
        local_storage()
            .and_then(|storage| storage.set_item(&self.key, &json))
            .map_err(|err| CacheError::Unavailable(js_error_message(&err)))
    }

    fn clear_last_session(&self) -> Result<(), CacheError> {
        local_storage()
            .and_then(|storage| storage.remove_item(&self.key))
            .map_err(|err| CacheError::Unavailable(js_error_message(&err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_entries_are_absent() {
        assert_eq!(decode_entry(None), Ok(None));
        assert_eq!(decode_entry(Some("  ")), Ok(None));
    }

    #[test]
    fn identity_only_entry_decodes() {
        let cached = decode_entry(Some(r#"{"identity":"a@x.com","displayName":"Ada"}"#))
            .unwrap()
            .unwrap();
        assert_eq!(cached.identity.as_str(), "a@x.com");
        assert_eq!(cached.display_name, "Ada");
    }

    #[test]
    fn garbage_is_reported_corrupt() {
        assert!(matches!(
            decode_entry(Some("{not json")),
            Err(CacheError::Corrupt(_))
        ));
    }
}
