//! Collaborator interfaces consumed by the passport core.
//!
//! Platform-specific crates provide the implementations: the browser app talks
//! to the hosted store and the mailer over HTTP, tests use [`crate::memory`].
//! Every trait is `?Send` because the client runs on a single event loop.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapter::AuditRecord;
use crate::catalog::GameId;
use crate::identity::Email;
use crate::progress::ProgressRow;
use crate::session::{CachedSession, UserId, UserRecord};
use crate::status::GameStatus;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("store rejected the request: HTTP {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Transport(String),
    #[error("notification service answered HTTP {0}")]
    Status(u16),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("device storage unavailable: {0}")]
    Unavailable(String),
    #[error("cached session unreadable: {0}")]
    Corrupt(String),
}

/// Congratulatory notice sent once all games are won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionNotice {
    pub identity: Email,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_link: Option<String>,
}

/// Every account with every stored progress row, for the admin view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSnapshot {
    pub users: Vec<UserRecord>,
    pub progress: Vec<UserProgressRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgressRow {
    pub user_id: UserId,
    pub game_id: GameId,
    pub status: GameStatus,
}

/// Accounts and per-game progress.
#[async_trait(?Send)]
pub trait IdentityStore {
    /// Create-or-fetch keyed by normalized email. Never fails for an unknown user.
    async fn resolve_or_create_user(&self, email: &Email, name: &str)
    -> Result<UserRecord, StoreError>;

    /// Look up an existing account without creating one.
    async fn find_user(&self, email: &Email) -> Result<Option<UserRecord>, StoreError>;

    /// Stored rows only; missing games are implicitly `UNLOCKED`.
    async fn fetch_progress(&self, user_id: &UserId) -> Result<Vec<ProgressRow>, StoreError>;

    /// Idempotent write keyed by `(user_id, game_id)`.
    async fn upsert_progress(
        &self,
        user_id: &UserId,
        game_id: GameId,
        status: GameStatus,
    ) -> Result<(), StoreError>;

    async fn fetch_all_users_and_progress(&self) -> Result<AdminSnapshot, StoreError>;
}

/// Append-only log of attempts.
#[async_trait(?Send)]
pub trait AuditLog {
    async fn append_session(&self, record: &AuditRecord) -> Result<(), StoreError>;
}

#[async_trait(?Send)]
pub trait Notifier {
    async fn send_completion_notice(&self, notice: &CompletionNotice) -> Result<(), NotifyError>;
}

/// Last-known session on the device. A hint, never an authority.
pub trait SessionCache {
    /// # Errors
    ///
    /// Returns [`CacheError`] when storage is unavailable or the entry is corrupt.
    fn read_last_session(&self) -> Result<Option<CachedSession>, CacheError>;

    /// # Errors
    ///
    /// Returns [`CacheError`] when storage is unavailable.
    fn write_last_session(&self, session: &CachedSession) -> Result<(), CacheError>;

    /// # Errors
    ///
    /// Returns [`CacheError`] when storage is unavailable.
    fn clear_last_session(&self) -> Result<(), CacheError>;
}
