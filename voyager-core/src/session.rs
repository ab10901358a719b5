use serde::{Deserialize, Serialize};

use crate::catalog::GameCatalog;
use crate::identity::Email;
use crate::progress::ProgressMap;

/// Store-assigned account id used for progress and audit writes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account row returned by the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub passport_id: String,
}

/// The signed-in player and their progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub user_id: UserId,
    pub identity: Email,
    pub display_name: String,
    pub is_admin: bool,
    #[serde(default)]
    pub passport_id: String,
    pub progress: ProgressMap,
}

impl UserSession {
    #[must_use]
    pub fn from_record(record: UserRecord, progress: ProgressMap) -> Self {
        Self {
            user_id: record.id,
            identity: record.email,
            display_name: record.name,
            is_admin: record.is_admin,
            passport_id: record.passport_id,
            progress,
        }
    }

    #[must_use]
    pub fn all_won(&self, catalog: &GameCatalog) -> bool {
        self.progress.all_won(catalog)
    }

    /// Snapshot written to the device cache.
    #[must_use]
    pub fn to_cached(&self) -> CachedSession {
        CachedSession {
            identity: self.identity.clone(),
            display_name: self.display_name.clone(),
            progress: Some(self.progress.clone()),
        }
    }
}

/// Last-known session kept on the device.
///
/// Only `identity` is trusted on startup; the rest is a display hint and is
/// always replaced by the store's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedSession {
    pub identity: Email,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub progress: Option<ProgressMap>,
}
